//! Structured line logger
//!
//! A [`LineLogger`] writes one newline-terminated record per call to any
//! [`Write`] destination, either as a JSON field record or as a flat
//! timestamped message. Records are merged over a default-fields template
//! whose entries may be static values or computed at call time. The writer
//! is mutex-guarded, so a shared logger is safe for concurrent callers.

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Field mapping for one record. Keys serialize in sorted order.
pub type Fields = serde_json::Map<String, Value>;

/// Macro for building a [`Fields`] record from heterogeneous literals
///
/// # Example
/// ```rust
/// use dynopt::fields;
///
/// let record = fields! {
///     "msg" => "listener started",
///     "port" => 8080,
/// };
/// assert_eq!(record["port"], 8080);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::Fields::new();
        $(
            map.insert($key.to_string(), ::serde_json::json!($value));
        )*
        map
    }};
}

enum FieldSource {
    Static(Value),
    Computed(Box<dyn Fn() -> Value + Send + Sync>),
}

fn now_rfc3339() -> Value {
    Value::String(
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    )
}

/// Synchronized structured logger writing one encoded record per line.
///
/// # Example
///
/// ```rust
/// use dynopt::{fields, LineLogger};
///
/// let logger = LineLogger::new(Vec::new())
///     .with_field("service", "gateway");
/// logger.fields(fields! { "msg" => "ready" });
/// ```
pub struct LineLogger<W: Write> {
    writer: Mutex<W>,
    template: Vec<(String, FieldSource)>,
}

impl<W: Write> LineLogger<W> {
    /// Create a logger over `writer`.
    ///
    /// The default template carries a single computed `ts` field rendering
    /// the current UTC time as RFC 3339.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            template: vec![("ts".to_string(), FieldSource::Computed(Box::new(now_rfc3339)))],
        }
    }

    /// Add or replace a static template field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.upsert(key.into(), FieldSource::Static(value.into()));
        self
    }

    /// Add or replace a template field computed at call time.
    #[must_use]
    pub fn with_computed(
        mut self,
        key: impl Into<String>,
        f: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.upsert(key.into(), FieldSource::Computed(Box::new(f)));
        self
    }

    fn upsert(&mut self, key: String, source: FieldSource) {
        if let Some(entry) = self.template.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = source;
        } else {
            self.template.push((key, source));
        }
    }

    /// Evaluate the template into a starting record.
    fn template_fields(&self) -> Fields {
        let mut record = Fields::new();
        for (key, source) in &self.template {
            let value = match source {
                FieldSource::Static(v) => v.clone(),
                FieldSource::Computed(f) => f(),
            };
            record.insert(key.clone(), value);
        }
        record
    }

    /// Write one JSON record: the template evaluated, then the caller's
    /// fields merged over it.
    pub fn fields(&self, fields: Fields) {
        let mut record = self.template_fields();
        for (key, value) in fields {
            record.insert(key, value);
        }
        let mut line = serde_json::to_vec(&record).unwrap_or_default();
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.write_all(&line);
    }

    /// Write one flat `<ts> - <msg>` line.
    ///
    /// Takes anything displayable; pass [`format_args!`] for a format
    /// string with positional arguments, formatted straight into the
    /// writer:
    ///
    /// ```rust
    /// use dynopt::LineLogger;
    ///
    /// let logger = LineLogger::new(Vec::new());
    /// logger.print(format_args!("{}'n like a sultan", "jolt"));
    /// ```
    pub fn print(&self, msg: impl fmt::Display) {
        let ts = match self.template_fields().get("ts") {
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
            None => match now_rfc3339() {
                Value::String(s) => s,
                _ => String::new(),
            },
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{ts} - {msg}");
    }

    /// Consume the logger and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Tests
// =============================================================================
