//! # dynopt - Dynamic Options
//!
//! A runtime-typed key/value options store with layered defaults, plus the
//! small utilities that usually travel with one: an error fan-in channel
//! and a structured line logger.
//!
//! ## Features
//!
//! - **Layered Store**: a *defaults* layer declared up front and an
//!   *overrides* layer written through a validated apply path
//! - **Type Consistency**: the first non-null value observed for a key
//!   fixes that key's type; later writes of a different type fail
//! - **Strict/Lenient Lookup**: missing keys fail in strict mode (the
//!   default) or yield "not found" in lenient mode
//! - **Typed Accessors**: bool/int/duration/time accessors coerce
//!   mismatches to zero values; string/URL/object accessors fail instead
//! - **Error Fan-In**: a bounded, never-blocking error channel with
//!   call-site tracing
//! - **Line Logging**: one JSON record per line, merged over a
//!   default-fields template, synchronized for concurrent callers
//!
//! ## Quick Start
//!
//! ```rust
//! use dynopt::{opt, opts, Options};
//! use std::time::Duration;
//!
//! let mut options = Options::new().with_defaults(opts! {
//!     "host" => "0.0.0.0",
//!     "port" => 8080,
//!     "timeout" => Duration::from_secs(300),
//! })?;
//!
//! options.apply([opt("port", 9090)])?;
//!
//! println!("Serving on '{}:{}'", options.get_string("host")?, options.get_int("port")?);
//! # Ok::<(), dynopt::Error>(())
//! ```
//!
//! ## Declaring Keys Without Fixing a Type
//!
//! A `Value::Null` default declares a key and accepts the first assigned
//! type:
//!
//! ```rust
//! use dynopt::{opt, Options, Value};
//!
//! let mut options = Options::new();
//! options.set_defaults([("port", Value::Null)])?;
//! options.apply([opt("port", 8080)])?;  // fixes the type to int
//! # Ok::<(), dynopt::Error>(())
//! ```
//!
//! ## Lookup Modes
//!
//! ```rust
//! use dynopt::{Mode, Options};
//!
//! // Strict (default): missing keys are configuration authoring bugs.
//! assert!(Options::new().get("missing").is_err());
//!
//! // Lenient: missing keys are "not found".
//! let options = Options::new().with([Mode::Lenient]);
//! assert!(options.get("missing")?.is_none());
//! # Ok::<(), dynopt::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! The store performs no internal locking; it is designed for
//! single-owner, sequential construction-then-read usage. Wrap it in a
//! lock to share across threads. The [`ErrorSink`] and [`LineLogger`]
//! utilities are internally synchronized.

// Core modules
mod error;
mod logline;
mod sink;
mod store;
mod value;

// Re-exports from core
pub use error::{Error, Result};
pub use logline::{Fields, LineLogger};
pub use sink::{BoxError, ErrorSink, Traced};
pub use store::{Mode, Opt, Options, opt};
pub use value::{Kind, Value};
