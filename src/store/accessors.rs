//! Lookup and typed accessors
//!
//! Lookups resolve the overrides layer first, then defaults. The scalar
//! accessors (`get_bool`, `get_int`, `get_duration`, `get_time`) coerce a
//! type mismatch to the type's zero value, while `get_string`, `get_url`
//! and `get_object` fail on mismatch. Callers relying on the scalar
//! accessors for validation should check [`Options::get`] directly.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use url::Url;

use crate::error::{Error, Result};
use crate::store::{Opt, Options};
use crate::value::Value;

impl Options {
    /// Resolve a key: overrides first, falling back to defaults.
    fn resolve(&self, key: &str) -> Option<&Value> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    /// Lenient lookup: a missing key is `None`, regardless of the store's
    /// lookup mode.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.resolve(key)
    }

    /// Strict lookup: a missing key is [`Error::KeyNotFound`], regardless
    /// of the store's lookup mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent from both
    /// layers.
    pub fn try_get(&self, key: &str) -> Result<&Value> {
        self.resolve(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Look up a key under the store's lookup mode.
    ///
    /// In strict mode a missing key is an error (it signals a
    /// configuration authoring bug); in lenient mode it is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent
    /// from both layers.
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        match self.resolve(key) {
            Some(value) => Ok(Some(value)),
            None if self.strict => Err(Error::KeyNotFound(key.to_string())),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Coercing scalar accessors
    // =========================================================================
    // A found value of the wrong type degrades silently to the zero value.

    /// Boolean accessor; a non-bool value yields `false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        Ok(match self.get(key)? {
            Some(Value::Bool(b)) => *b,
            _ => false,
        })
    }

    /// Integer accessor; a non-int value yields `0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        Ok(match self.get(key)? {
            Some(Value::Int(i)) => *i,
            _ => 0,
        })
    }

    /// Duration accessor; a non-duration value yields `Duration::ZERO`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent.
    pub fn get_duration(&self, key: &str) -> Result<Duration> {
        Ok(match self.get(key)? {
            Some(Value::Duration(d)) => *d,
            _ => Duration::ZERO,
        })
    }

    /// Timestamp accessor; a non-time value yields the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent.
    pub fn get_time(&self, key: &str) -> Result<OffsetDateTime> {
        Ok(match self.get(key)? {
            Some(Value::Time(t)) => *t,
            _ => OffsetDateTime::UNIX_EPOCH,
        })
    }

    // =========================================================================
    // Strict accessors
    // =========================================================================

    /// String accessor.
    ///
    /// Accepts a string value directly, or any kind with a canonical
    /// textual rendering (durations, times, URLs). A missing key in
    /// lenient mode yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent,
    /// or [`Error::InvalidConversion`] for a value with no textual form.
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.get(key)? {
            None => Ok(String::new()),
            Some(Value::Str(s)) => Ok(s.clone()),
            Some(v @ (Value::Duration(_) | Value::Time(_) | Value::Url(_))) => Ok(v.to_string()),
            Some(v) => Err(Error::InvalidConversion {
                key: key.to_string(),
                kind: v.kind(),
                target: "string",
            }),
        }
    }

    /// URL accessor. Accepts only a pre-parsed URL value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent,
    /// or [`Error::InvalidConversion`] for any non-URL value.
    pub fn get_url(&self, key: &str) -> Result<Option<Url>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Url(u)) => Ok(Some(u.clone())),
            Some(v) => Err(Error::InvalidConversion {
                key: key.to_string(),
                kind: v.kind(),
                target: "url",
            }),
        }
    }

    /// Generic accessor: deserialize the found value into `T`.
    ///
    /// The stored value is projected into JSON and matched structurally,
    /// so `T` needs a compatible shape rather than an identical type.
    /// Returns `Ok(None)` for a missing key in lenient mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] in strict mode if the key is absent,
    /// or [`Error::IncompatibleObject`] if the value's shape does not fit
    /// `T`.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            None => Ok(None),
            Some(v) => serde_json::from_value(v.to_json())
                .map(Some)
                .map_err(|e| Error::IncompatibleObject {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// The overrides layer as a pair list, in unspecified order.
    #[must_use]
    pub fn all(&self) -> Vec<Opt> {
        self.overrides
            .iter()
            .map(|(k, v)| Opt::new(k.clone(), v.clone()))
            .collect()
    }

    /// The merged view: defaults overlaid by overrides.
    #[must_use]
    pub fn merged(&self) -> HashMap<String, Value> {
        let mut merged = self.defaults.clone();
        for (k, v) in &self.overrides {
            merged.insert(k.clone(), v.clone());
        }
        merged
    }
}

/// Newline-separated `key: value` lines over the merged view, in
/// unspecified order.
impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.merged() {
            writeln!(f, "{k}: {v}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
