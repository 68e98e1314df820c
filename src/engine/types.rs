//! Singer messages, where they are written, and per-run bookkeeping

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::time::Duration;

/// One line of connector output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Precedes the records of a stream
    Schema {
        stream: String,
        schema: Value,
        key_properties: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bookmark_properties: Vec<String>,
    },
    Record {
        stream: String,
        record: Value,
        time_extracted: DateTime<Utc>,
    },
    /// The full bookmark document, `{"bookmarks": {...}}`
    State { value: Value },
}

impl Message {
    pub fn schema(
        stream: impl Into<String>,
        schema: Value,
        key_properties: Vec<String>,
        bookmark_properties: Vec<String>,
    ) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties,
            bookmark_properties,
        }
    }

    /// A record stamped with the current time
    pub fn record(stream: impl Into<String>, record: Value) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now(),
        }
    }

    pub fn state(value: Value) -> Self {
        Self::State { value }
    }
}

#[cfg(test)]
impl Message {
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Serialize without the trailing newline
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }
}

/// Where the engine sends its messages
pub trait MessageSink {
    fn emit(&mut self, message: &Message) -> Result<()>;
}

impl MessageSink for Vec<Message> {
    fn emit(&mut self, message: &Message) -> Result<()> {
        self.push(message.clone());
        Ok(())
    }
}

/// Newline-delimited JSON, flushed after every line so a downstream target
/// sees records as soon as they are read
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl JsonLinesSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write any serializable value as one line. Used for the non-Singer
    /// control output of `spec`, `check` and `discover` too.
    pub fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let line = serde_json::to_string(value)?;
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::output(format!("Failed to write message: {e}")))
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn emit(&mut self, message: &Message) -> Result<()> {
        self.write_json(message)
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Sent as `page[size]` alongside a page cursor
    pub page_size: u32,
    /// Pages per stream before stopping early, 0 for no limit
    pub max_pages: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            max_pages: 0,
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }
}

/// Totals across every stream one engine has synced
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    pub records_synced: usize,
    /// Records dropped for lacking an `id`
    pub records_skipped: usize,
    pub pages_fetched: usize,
    pub streams_synced: usize,
    /// Streams that failed part way
    pub errors: usize,
    pub elapsed: Duration,
}

impl std::fmt::Display for SyncStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records ({} skipped), {} pages, {} streams, {} failed in {:.1?}",
            self.records_synced,
            self.records_skipped,
            self.pages_fetched,
            self.streams_synced,
            self.errors,
            self.elapsed
        )
    }
}
