//! Write operations: defaults management, apply, replace

use log::debug;

use crate::error::{Error, Result};
use crate::store::{Opt, Options};
use crate::value::Value;

impl Options {
    /// Type-consistency check for a candidate write.
    ///
    /// The incoming value's kind must match any existing overrides value
    /// and any existing non-null defaults value for the key. A `Null`
    /// default declares the key without fixing its type.
    pub(crate) fn check_kind(&self, key: &str, value: &Value) -> Result<()> {
        if let Some(existing) = self.overrides.get(key) {
            if existing.kind() != value.kind() {
                return Err(Error::TypeMismatch {
                    key: key.to_string(),
                    expected: existing.kind(),
                    actual: value.kind(),
                });
            }
        }
        if let Some(existing) = self.defaults.get(key) {
            if !existing.is_null() && existing.kind() != value.kind() {
                return Err(Error::TypeMismatch {
                    key: key.to_string(),
                    expected: existing.kind(),
                    actual: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Merge entries into the defaults layer.
    ///
    /// Existing defaults are not cleared. Each entry is checked against any
    /// existing non-null default and any existing override for its key
    /// before it is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] on a type-consistency violation.
    /// Entries before the offending one have already been merged.
    pub fn set_defaults<P: Into<Opt>>(
        &mut self,
        defaults: impl IntoIterator<Item = P>,
    ) -> Result<()> {
        for pair in defaults {
            let Opt { key, value } = pair.into();
            self.check_kind(&key, &value)?;
            self.defaults.insert(key, value);
        }
        Ok(())
    }

    /// Chainable form of [`Options::set_defaults`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] on a type-consistency violation.
    pub fn with_defaults<P: Into<Opt>>(
        mut self,
        defaults: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        self.set_defaults(defaults)?;
        Ok(self)
    }

    /// Produce a new, independent store from the current defaults.
    ///
    /// The snapshot's defaults layer is exactly this store's defaults
    /// mapping; its overrides layer is empty and strict mode is on. Useful
    /// for forking configuration before overrides are layered on.
    #[must_use]
    pub fn get_defaults(&self) -> Options {
        Options {
            defaults: self.defaults.clone(),
            overrides: std::collections::HashMap::new(),
            strict: true,
        }
    }

    /// Validated write into the overrides layer.
    ///
    /// For each pair: once the defaults layer is non-empty, keys absent
    /// from it are rejected; the type-consistency check runs; the value is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] or [`Error::TypeMismatch`]. Pairs
    /// before the offending one have already been applied.
    pub fn apply<P: Into<Opt>>(&mut self, pairs: impl IntoIterator<Item = P>) -> Result<()> {
        for pair in pairs {
            let pair = pair.into();
            if !self.defaults.is_empty() && !self.defaults.contains_key(&pair.key) {
                return Err(Error::UnknownKey { key: pair.key });
            }
            self.check_kind(&pair.key, &pair.value)?;
            debug!("applied option '{}'", pair.key);
            self.overrides.insert(pair.key, pair.value);
        }
        Ok(())
    }

    /// Unchecked write into the overrides layer.
    ///
    /// Bypasses both the unknown-key check and the type-consistency check.
    /// The escape hatch for callers that need to override a key's type or
    /// structure.
    pub fn replace<P: Into<Opt>>(&mut self, pairs: impl IntoIterator<Item = P>) {
        for pair in pairs {
            let pair = pair.into();
            debug!("replaced option '{}'", pair.key);
            self.overrides.insert(pair.key, pair.value);
        }
    }

    /// Validated write of a single pair; equivalent to a one-pair
    /// [`Options::apply`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] or [`Error::TypeMismatch`].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.apply([Opt::new(key, value)])
    }
}

// =============================================================================
// Tests
// =============================================================================
