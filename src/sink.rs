//! Error fan-in channel
//!
//! An [`ErrorSink`] aggregates errors from many producers into one bounded
//! stream. Delivery is fire-and-forget: a push never blocks, and errors
//! arriving while the buffer is full are dropped. A consumer drains the
//! receiving end for as long as producers exist.

use std::panic::Location;
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};
use std::thread;

use log::debug;
use thiserror::Error;

/// Boxed error type carried through the sink; any error type flows.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error wrapped with the source location that reported it.
#[derive(Debug, Error)]
#[error("{file}:{line} {source}")]
pub struct Traced {
    file: &'static str,
    line: u32,
    #[source]
    source: BoxError,
}

impl Traced {
    /// Wrap an error with an explicit call site.
    pub fn new(location: &'static Location<'static>, source: BoxError) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            source,
        }
    }
}

/// Bounded, non-blocking error aggregator.
///
/// # Example
///
/// ```rust
/// use dynopt::ErrorSink;
///
/// let sink = ErrorSink::new(100);
/// sink.trace("connection refused");
/// let err = sink.errors().recv().unwrap();
/// assert!(err.to_string().ends_with("connection refused"));
/// ```
pub struct ErrorSink {
    tx: SyncSender<BoxError>,
    rx: Receiver<BoxError>,
}

impl ErrorSink {
    /// Create a sink buffering up to `capacity` undelivered errors.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = sync_channel(capacity);
        Self { tx, rx }
    }

    /// The read-only receiving end.
    ///
    /// Iterating blocks until every sending handle is gone, so a consumer
    /// may drain indefinitely and stops when the producers shut down.
    pub fn errors(&self) -> &Receiver<BoxError> {
        &self.rx
    }

    /// A sending handle for producers that feed this sink directly.
    #[must_use]
    pub fn sender(&self) -> SyncSender<BoxError> {
        self.tx.clone()
    }

    /// Deliver an error without blocking.
    ///
    /// If the buffer is full the error is dropped.
    pub fn push(&self, err: impl Into<BoxError>) {
        if let Err(TrySendError::Full(dropped)) = self.tx.try_send(err.into()) {
            debug!("error buffer full, dropping: {dropped}");
        }
    }

    /// Deliver an error annotated with the caller's source location.
    #[track_caller]
    pub fn trace(&self, err: impl Into<BoxError>) {
        self.push(Traced::new(Location::caller(), err.into()));
    }

    /// Forward every error from another producer's stream into this sink.
    ///
    /// Spawns a thread that drains `errors` until the producer closes its
    /// sending side. Forwarded errors obey the same drop-on-full rule.
    pub fn drain_from(&self, errors: Receiver<BoxError>) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            for err in errors {
                match tx.try_send(err) {
                    Ok(()) => {}
                    Err(TrySendError::Full(dropped)) => {
                        debug!("error buffer full, dropping: {dropped}");
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
