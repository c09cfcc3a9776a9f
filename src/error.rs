//! Error types for the dynopt library
//!
//! Fatal conditions (unknown keys, type-consistency violations, strict-mode
//! lookup misses, accessor conversion failures) surface as explicit error
//! values rather than panics, so callers choose how the operation aborts.

use thiserror::Error;

use crate::value::Kind;

/// Result type alias for dynopt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the dynopt library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Write Errors
    // -------------------------------------------------------------------------
    #[error("Invalid option '{key}': not declared in defaults")]
    UnknownKey { key: String },

    #[error("Option '{key}' must be value of type '{expected}', received type '{actual}'")]
    TypeMismatch {
        key: String,
        expected: Kind,
        actual: Kind,
    },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Unable to find value for '{0}'")]
    KeyNotFound(String),

    #[error("Unable to convert option '{key}' of type '{kind}' into {target}")]
    InvalidConversion {
        key: String,
        kind: Kind,
        target: &'static str,
    },

    #[error("Option '{key}' is not assignable to the requested type: {reason}")]
    IncompatibleObject { key: String, reason: String },
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }

    /// Check if this is a type-consistency or conversion error
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. }
                | Error::InvalidConversion { .. }
                | Error::IncompatibleObject { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_key_and_types() {
        let err = Error::TypeMismatch {
            key: "port".into(),
            expected: Kind::Int,
            actual: Kind::Str,
        };
        let msg = err.to_string();
        assert!(msg.contains("port"));
        assert!(msg.contains("int"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn test_predicates() {
        assert!(Error::KeyNotFound("host".into()).is_not_found());
        assert!(!Error::UnknownKey { key: "host".into() }.is_not_found());
        assert!(
            Error::InvalidConversion {
                key: "port".into(),
                kind: Kind::Int,
                target: "string",
            }
            .is_type_error()
        );
    }
}
