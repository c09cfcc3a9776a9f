//! Layered options store
//!
//! An [`Options`] store holds two mappings: a *defaults* layer declared up
//! front and an *overrides* layer written through the apply path. Lookups
//! resolve overrides first and fall back to defaults. Once the defaults
//! layer is non-empty it also fixes the set of permitted keys, and every
//! validated write runs a type-consistency check against both layers.
//!
//! The store performs no internal locking. It is designed for single-owner,
//! sequential construction-then-read usage; share it across threads only
//! behind external synchronization.

mod accessors;
mod ops;

use std::collections::HashMap;

use crate::error::Result;
use crate::value::Value;

// =============================================================================
// Option Pair
// =============================================================================

/// A single key/value option pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Opt {
    pub key: String,
    pub value: Value,
}

impl Opt {
    /// Create a pair from anything convertible into a key and a [`Value`].
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Opt {
    fn from((key, value): (K, V)) -> Self {
        Opt::new(key, value)
    }
}

/// Shorthand for creating an [`Opt`]
///
/// # Example
/// ```rust
/// use dynopt::opt;
/// let pairs = vec![opt("host", "0.0.0.0"), opt("port", 8080)];
/// ```
pub fn opt(key: impl Into<String>, value: impl Into<Value>) -> Opt {
    Opt::new(key, value)
}

/// Macro for building a pair list from heterogeneous literals
///
/// # Example
/// ```rust
/// use dynopt::{opts, Options};
///
/// let store = Options::from_pairs(opts! {
///     "host" => "0.0.0.0",
///     "port" => 8080,
/// }).unwrap();
/// ```
#[macro_export]
macro_rules! opts {
    ($($key:expr => $value:expr),* $(,)?) => {{
        vec![$($crate::Opt::new($key, $value)),*]
    }};
}

// =============================================================================
// Lookup Mode
// =============================================================================

/// Lookup-failure policy for [`Options::get`] and the typed accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A lookup of a missing key fails with [`Error::KeyNotFound`](crate::Error::KeyNotFound).
    Strict,
    /// A lookup of a missing key returns "not found" with no value.
    Lenient,
}

// =============================================================================
// Options Store
// =============================================================================

/// Runtime-typed key/value configuration store with layered defaults.
///
/// # Example
///
/// ```rust
/// use dynopt::{opts, Options};
/// use std::time::Duration;
///
/// let opts = Options::new().with_defaults(opts! {
///     "host" => "0.0.0.0",
///     "port" => 8080,
///     "timeout" => Duration::from_secs(300),
/// })?;
///
/// assert_eq!(opts.get_string("host")?, "0.0.0.0");
/// assert_eq!(opts.get_int("port")?, 8080);
/// # Ok::<(), dynopt::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Base values declared up front; once non-empty, also the closed set
    /// of permitted keys for [`Options::apply`].
    pub(crate) defaults: HashMap<String, Value>,

    /// Explicitly applied values; take precedence over defaults.
    pub(crate) overrides: HashMap<String, Value>,

    /// Whether lookups of missing keys fail (strict) or return not-found.
    pub(crate) strict: bool,
}

impl Options {
    /// Create an empty store: no defaults, no overrides, strict mode on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
            strict: true,
        }
    }

    /// Create a store from a bulk key/value mapping.
    ///
    /// Each pair is routed through the apply path. With no defaults layer
    /// in place yet, arbitrary keys are permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the apply path rejects a pair (not possible for
    /// a mapping with unique keys and an empty defaults layer, but the
    /// signature matches the other constructors).
    pub fn from_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::from_pairs(map)
    }

    /// Create a store from a sequence of pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the apply path rejects a pair (e.g. two pairs
    /// for the same key with different types).
    pub fn from_pairs<P: Into<Opt>>(pairs: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut opts = Self::new();
        opts.apply(pairs)?;
        Ok(opts)
    }

    /// Create a store from pair lists that were collected for forwarding.
    ///
    /// Flattens one level of grouping, so a helper that gathered its
    /// arguments into a list can hand the list over directly:
    /// `from_nested([pairs])` builds the same store as `from_pairs(pairs)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the apply path rejects a pair.
    pub fn from_nested(groups: impl IntoIterator<Item = Vec<Opt>>) -> Result<Self> {
        Self::from_pairs(groups.into_iter().flatten())
    }

    /// Toggle the lookup-failure policy. Last mode in the list wins.
    ///
    /// # Example
    /// ```rust
    /// use dynopt::{Mode, Options};
    ///
    /// let opts = Options::new().with([Mode::Lenient]);
    /// assert!(opts.get("missing").unwrap().is_none());
    /// ```
    #[must_use]
    pub fn with(mut self, modes: impl IntoIterator<Item = Mode>) -> Self {
        for mode in modes {
            self.strict = match mode {
                Mode::Strict => true,
                Mode::Lenient => false,
            };
        }
        self
    }

    /// Whether lookups of missing keys fail.
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
