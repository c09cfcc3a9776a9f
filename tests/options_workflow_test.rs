//! Options Store Workflow Integration Tests
//!
//! End-to-end flows over the layered store:
//! - Declaring defaults and layering overrides
//! - Type-consistency enforcement in both write directions
//! - Strict vs lenient lookup behavior
//! - Forking a default-only snapshot
//! - Forwarded pair-list construction

mod common;

use std::time::Duration;

use common::server_options;
use dynopt::{Error, Mode, Options, Value, opt, opts};

// =============================================================================
// Defaults and Overrides
// =============================================================================

#[test]
fn test_server_defaults_resolve_without_overrides() {
    let options = server_options();

    assert_eq!(options.get_string("host").unwrap(), "0.0.0.0");
    assert_eq!(options.get_int("port").unwrap(), 8080);
    assert_eq!(
        options.get_duration("timeout").unwrap(),
        Duration::from_secs(300)
    );
}

#[test]
fn test_overrides_take_precedence() {
    let mut options = server_options();
    options.apply([opt("host", "127.0.0.1")]).unwrap();

    assert_eq!(options.get_string("host").unwrap(), "127.0.0.1");
    // Defaults still resolve for untouched keys.
    assert_eq!(options.get_int("port").unwrap(), 8080);
}

#[test]
fn test_defaults_close_the_key_set() {
    let mut options = server_options();

    let err = options.apply([opt("retries", 3)]).unwrap_err();
    assert!(matches!(err, Error::UnknownKey { .. }));
    // Declared keys are never rejected for unknown-key reasons.
    options.apply([opt("port", 9090)]).unwrap();
}

// =============================================================================
// Type Consistency
// =============================================================================

#[test]
fn test_apply_rejects_type_change() {
    let mut options = server_options();

    let err = options.apply([opt("port", "eightyeighty")]).unwrap_err();
    match err {
        Error::TypeMismatch { key, .. } => assert_eq!(key, "port"),
        other => panic!("expected type mismatch, got: {other}"),
    }
}

#[test]
fn test_set_defaults_rejects_conflict_with_override() {
    let mut options = Options::new();
    options.apply([opt("port", "eightyeighty")]).unwrap();

    let err = options.set_defaults([("port", 8080)]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_replace_is_the_escape_hatch() {
    let mut options = server_options();

    // Changes a declared key's type and introduces an undeclared key.
    options.replace(opts! {
        "port" => "eightyeighty",
        "debug" => true,
    });

    assert_eq!(options.get_string("port").unwrap(), "eightyeighty");
    assert!(options.get_bool("debug").unwrap());
}

#[test]
fn test_null_default_defers_typing() {
    let mut options = Options::new();
    options.set_defaults([("backend", Value::Null)]).unwrap();

    options.apply([opt("backend", "drive")]).unwrap();
    let err = options.apply([opt("backend", 42)]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

// =============================================================================
// Lookup Modes
// =============================================================================

#[test]
fn test_strict_mode_fails_missing_lookup() {
    let options = server_options();
    assert!(options.get("nope").unwrap_err().is_not_found());
}

#[test]
fn test_lenient_mode_returns_not_found() {
    let options = server_options().with([Mode::Lenient]);

    assert!(options.get("nope").unwrap().is_none());
    assert_eq!(options.get_int("nope").unwrap(), 0);
    assert_eq!(options.get_string("nope").unwrap(), "");
}

#[test]
fn test_mode_can_be_toggled_back() {
    let options = server_options().with([Mode::Lenient]).with([Mode::Strict]);
    assert!(options.get("nope").is_err());
}

// =============================================================================
// Snapshots and Construction
// =============================================================================

#[test]
fn test_get_defaults_forks_unmodified_configuration() {
    let mut options = Options::new()
        .with_defaults(opts! { "a" => 1, "b" => 2 })
        .unwrap();
    options.apply([opt("a", 3)]).unwrap();

    let fork = options.get_defaults();
    assert_eq!(fork.get_int("a").unwrap(), 1);
    assert_eq!(fork.get_int("b").unwrap(), 2);

    // The fork is independent and starts with an open overrides layer.
    assert!(fork.all().is_empty());
    assert_eq!(options.get_int("a").unwrap(), 3);
}

#[test]
fn test_forwarded_pairs_build_the_same_store() {
    let pairs = opts! {
        "host" => "0.0.0.0",
        "port" => 8080,
    };

    // A helper that gathered variadic arguments hands over the whole list.
    let forwarded = Options::from_nested([pairs.clone()]).unwrap();
    let direct = Options::from_pairs(pairs).unwrap();

    assert_eq!(forwarded.merged(), direct.merged());
    assert_eq!(forwarded.get_int("port").unwrap(), 8080);
}

#[test]
fn test_set_then_get_round_trip() {
    let mut options = Options::new();
    options.set("host", "0.0.0.0").unwrap();

    assert_eq!(
        options.get("host").unwrap(),
        Some(&Value::from("0.0.0.0"))
    );
}

#[test]
fn test_display_renders_merged_view() {
    let mut options = server_options();
    options.apply([opt("port", 9090)]).unwrap();

    let rendered = options.to_string();
    assert!(rendered.contains("host: 0.0.0.0"));
    assert!(rendered.contains("port: 9090"));
    assert!(rendered.contains("timeout: 300s"));
    assert_eq!(rendered.lines().count(), 3);
}
