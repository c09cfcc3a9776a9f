//! Runtime-typed option values
//!
//! Every value stored in an [`Options`](crate::Options) store is one of a
//! closed set of kinds, and type-consistency checking is a comparison of
//! [`Kind`] tags.

use std::fmt;
use std::time::Duration;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

// =============================================================================
// Kind
// =============================================================================

/// The type tag of a [`Value`].
///
/// Used by the type-consistency check and named in error messages so a
/// configuration author can locate a mismatch immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Declared but untyped; accepts the first assigned type.
    Null,
    Bool,
    Int,
    Str,
    Duration,
    Time,
    Url,
    /// Structured value carried as JSON.
    Opaque,
}

impl Kind {
    /// Name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Str => "string",
            Kind::Duration => "duration",
            Kind::Time => "time",
            Kind::Url => "url",
            Kind::Opaque => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Value
// =============================================================================

/// A single runtime-typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Placeholder for a declared-but-untyped key.
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Duration(Duration),
    Time(OffsetDateTime),
    Url(Url),
    /// Anything structured; carried as JSON and matched structurally by
    /// [`Options::get_object`](crate::Options::get_object).
    Opaque(serde_json::Value),
}

impl Value {
    /// The type tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Str(_) => Kind::Str,
            Value::Duration(_) => Kind::Duration,
            Value::Time(_) => Kind::Time,
            Value::Url(_) => Kind::Url,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// Whether this is the untyped placeholder.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Project this value into JSON for structural matching.
    ///
    /// Durations become fractional seconds, times become RFC 3339 strings,
    /// URLs become their string form.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Duration(d) => serde_json::Value::from(d.as_secs_f64()),
            Value::Time(t) => serde_json::Value::String(
                t.format(&Rfc3339).unwrap_or_else(|_| t.to_string()),
            ),
            Value::Url(u) => serde_json::Value::String(u.to_string()),
            Value::Opaque(v) => v.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => f.write_str(s),
            Value::Duration(d) => write!(f, "{d:?}"),
            Value::Time(t) => match t.format(&Rfc3339) {
                Ok(s) => f.write_str(&s),
                Err(_) => write!(f, "{t}"),
            },
            Value::Url(u) => write!(f, "{u}"),
            Value::Opaque(v) => write!(f, "{v}"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(v: OffsetDateTime) -> Self {
        Value::Time(v)
    }
}

impl From<Url> for Value {
    fn from(v: Url) -> Self {
        Value::Url(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Opaque(v)
    }
}

// =============================================================================
// Tests
// =============================================================================
