// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ChartMogul Source
//!
//! A Rust-native connector that pulls customers and activities from the
//! ChartMogul API and hands them to an ingestion pipeline as a uniform
//! stream of records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use source_chartmogul::config::SourceConfig;
//! use source_chartmogul::engine::SyncConfig;
//! use source_chartmogul::source::{ChartmogulSource, Connector};
//! use source_chartmogul::streams::StreamKind;
//!
//! #[tokio::main]
//! async fn main() -> source_chartmogul::Result<()> {
//!     let config = SourceConfig::new("api-key").with_start_date("2022-01-01");
//!     let source = ChartmogulSource::new(config)?;
//!
//!     let status = source.check().await?;
//!
//!     let mut messages = source.read(&StreamKind::ALL, SyncConfig::new()).await?;
//!     while let Some(msg) = messages.next().await {
//!         // Process messages
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    Connector Interface                    │
//! │   check() → Status   streams() → [StreamInfo]             │
//! │   read(streams, config) → Stream<Message>                 │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴───────┬──────────────────────┐
//! │   Streams    │     Pagination      │        HTTP          │
//! ├──────────────┼─────────────────────┼──────────────────────┤
//! │ Customers    │ Page number cursor  │ Basic auth           │
//! │ Activities   │ Start-after cursor  │ Retry policy         │
//! │              │ Start → Fetch → Done│ Rate limit / Backoff │
//! └──────────────┴─────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the source
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination cursors and state machine
pub mod pagination;

/// Customer and activity streams
pub mod streams;

/// Main execution engine
pub mod engine;

/// Source configuration
pub mod config;

/// Connector trait and the ChartMogul source
pub mod source;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use source::{ChartmogulSource, Connector};
pub use streams::{ActivityStream, ChartmogulStream, CustomerStream, Page, StreamKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
