//! Engine types
//!
//! Message types and configuration for the sync engine.

use crate::types::{JsonValue, LogLevel, Record};
use chrono::{DateTime, Utc};
use serde_json::json;

/// A message emitted during sync
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A single record
    Record {
        /// Stream name
        stream: String,
        /// The record, exactly as found in the page
        data: Record,
        /// When the record was emitted
        emitted_at: DateTime<Utc>,
    },
    /// Next-page cursor checkpoint
    State {
        /// Stream name
        stream: String,
        /// Serialized cursor
        cursor: JsonValue,
    },
    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create a record message
    pub fn record(stream: impl Into<String>, data: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            data,
            emitted_at: Utc::now(),
        }
    }

    /// Create a state message
    pub fn state(stream: impl Into<String>, cursor: JsonValue) -> Self {
        Self::State {
            stream: stream.into(),
            cursor,
        }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create an info log
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a debug log
    pub fn debug(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Debug, message)
    }

    /// Create an error log
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Wire representation, one JSON object per message
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Record {
                stream,
                data,
                emitted_at,
            } => json!({
                "type": "RECORD",
                "record": {
                    "stream": stream,
                    "data": data,
                    "emitted_at": emitted_at.timestamp_millis(),
                }
            }),
            Self::State { stream, cursor } => json!({
                "type": "STATE",
                "state": {
                    "stream": stream,
                    "cursor": cursor,
                }
            }),
            Self::Log { level, message } => json!({
                "type": "LOG",
                "log": {
                    "level": level,
                    "message": message,
                }
            }),
        }
    }
}

/// Configuration for sync operation
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Whether to emit state after each page
    pub emit_state_per_page: bool,
    /// Maximum records to sync per stream, unlimited when `None`
    pub max_records: Option<usize>,
    /// Whether to fail fast on errors
    pub fail_fast: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            emit_state_per_page: false,
            max_records: None,
            fail_fast: true,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit state after each page
    #[must_use]
    pub fn with_state_per_page(mut self, emit: bool) -> Self {
        self.emit_state_per_page = emit;
        self
    }

    /// Set max records
    #[must_use]
    pub fn with_max_records(mut self, max: Option<usize>) -> Self {
        self.max_records = max;
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: usize,
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Total streams synced
    pub streams_synced: usize,
    /// Errors encountered
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
