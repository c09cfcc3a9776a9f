//! Common test utilities for dynopt integration tests
//!
//! Provides the shared server-style options fixture and logging init.

#![allow(dead_code)]

use std::time::Duration;

use dynopt::{Options, opts};

/// Initialize the log facade once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A store with the usual server defaults declared and no overrides.
pub fn server_options() -> Options {
    init_logging();
    Options::new()
        .with_defaults(opts! {
            "host" => "0.0.0.0",
            "port" => 8080,
            "timeout" => Duration::from_secs(300),
        })
        .expect("failed to declare defaults")
}
