//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Pulls every page of a stream and collects its messages
//! - `SyncConfig` - Configuration for sync operations
//! - Message types for output (Record, State, Log)

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::Pagination;
use crate::streams::ChartmogulStream;
use std::time::Instant;
use tracing::{debug, info};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the sync configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Get mutable statistics
    pub fn stats_mut(&mut self) -> &mut SyncStats {
        &mut self.stats
    }

    /// Sync a single stream, page by page, until it reports no next cursor
    ///
    /// Messages are appended to `messages` as pages arrive, so whatever was
    /// pulled before a failure stays there when an error is returned.
    pub async fn sync_stream<S: ChartmogulStream>(
        &mut self,
        stream: &S,
        messages: &mut Vec<Message>,
    ) -> Result<()> {
        let start = Instant::now();
        let name = stream.name();
        messages.push(Message::info(format!("Starting sync for stream: {name}")));

        let mut pagination = Pagination::new(stream);
        let mut emitted = 0usize;
        let limit = self.config.max_records;
        let reached = |emitted: usize| limit.is_some_and(|max| emitted >= max);

        'pages: while let Some(params) = pagination.next_request() {
            if reached(emitted) {
                break;
            }

            let page = self.client.fetch_page(stream, &params).await?;
            self.stats.add_page();

            let mut page_records = 0;
            for record in stream.parse_records(&page)? {
                if reached(emitted) {
                    self.stats.add_records(page_records);
                    debug!("Reached max_records ({limit:?}) for {name}");
                    break 'pages;
                }
                messages.push(Message::record(name, record));
                emitted += 1;
                page_records += 1;
            }
            self.stats.add_records(page_records);

            messages.push(Message::debug(format!(
                "Page {}: fetched {page_records} records",
                pagination.pages_fetched() + 1
            )));

            if let Some(cursor) = pagination.advance(&page)? {
                if self.config.emit_state_per_page {
                    messages.push(Message::state(name, serde_json::to_value(cursor)?));
                }
            }
        }

        self.stats.add_stream();
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Completed sync for {name}: {emitted} records in {} pages",
            pagination.pages_fetched()
        );
        messages.push(Message::info(format!(
            "Completed sync for {name}: {emitted} records in {} pages",
            pagination.pages_fetched()
        )));

        Ok(())
    }
}
