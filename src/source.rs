//! Connector trait and the ChartMogul source
//!
//! Defines the operations a pipeline calls on a source (`check`, `streams`,
//! `read`) and wires the ChartMogul streams to the engine.

use crate::config::SourceConfig;
use crate::engine::{Message, SyncConfig, SyncEngine};
use crate::error::Result;
use crate::http::HttpClient;
use crate::streams::{ActivityStream, ChartmogulStream, CustomerStream, StreamKind};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tracing::{info, warn};

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Stream Info
// ============================================================================

/// Name, endpoint and key of a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream name
    pub name: String,
    /// Endpoint path
    pub path: String,
    /// Primary key field
    pub primary_key: Vec<String>,
}

impl StreamInfo {
    fn of<S: ChartmogulStream>(stream: &S) -> Self {
        Self {
            name: stream.name().to_string(),
            path: stream.path().to_string(),
            primary_key: vec![stream.primary_key().to_string()],
        }
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Type alias for the message stream returned by read()
pub type MessageStream = Pin<Box<dyn Stream<Item = Result<Message>> + Send>>;

/// Core trait the source implements
#[async_trait]
pub trait Connector: Send + Sync {
    /// Tests if credentials and configuration are valid
    async fn check(&self) -> Result<CheckResult>;

    /// Lists the streams this source exposes
    fn streams(&self) -> Vec<StreamInfo>;

    /// Reads the selected streams, one after the other
    ///
    /// Returns a stream of messages (records, state checkpoints, logs).
    /// Each stream's messages are yielded once that stream finishes; a
    /// terminal failure in fail-fast mode arrives as the last item.
    async fn read(&self, selected: &[StreamKind], sync: SyncConfig) -> Result<MessageStream>;
}

// ============================================================================
// ChartMogul Source
// ============================================================================

/// The ChartMogul source
#[derive(Debug, Clone)]
pub struct ChartmogulSource {
    config: SourceConfig,
}

impl ChartmogulSource {
    /// Create a source from a validated config
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The source configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn client(&self) -> Result<HttpClient> {
        HttpClient::new(self.config.http_client_config())
    }
}

// ============================================================================
// Read Run
// ============================================================================

/// State of one `read` call, advanced one stream at a time
struct ReadRun {
    engine: SyncEngine,
    start_date: Option<String>,
    pending: std::vec::IntoIter<StreamKind>,
    fail_fast: bool,
    finished: bool,
}

impl ReadRun {
    /// Messages of the next stream, the closing summary, or `None` when over
    async fn next_batch(&mut self) -> Option<Vec<Result<Message>>> {
        if self.finished {
            return None;
        }

        let Some(kind) = self.pending.next() else {
            self.finished = true;
            return Some(vec![Ok(self.summary())]);
        };

        let mut messages = Vec::new();
        let outcome = self.sync_kind(kind, &mut messages).await;
        let mut batch: Vec<Result<Message>> = messages.into_iter().map(Ok).collect();

        if let Err(e) = outcome {
            self.engine.stats_mut().add_error();
            warn!("Stream {kind} failed: {e}");
            if self.fail_fast {
                self.finished = true;
                batch.push(Err(e));
            } else {
                batch.push(Ok(Message::error(format!("Error in stream {kind}: {e}"))));
            }
        }

        Some(batch)
    }

    async fn sync_kind(&mut self, kind: StreamKind, messages: &mut Vec<Message>) -> Result<()> {
        match kind {
            StreamKind::Customers => {
                self.engine
                    .sync_stream(&CustomerStream::new(), messages)
                    .await
            }
            StreamKind::Activities => {
                let stream = ActivityStream::new(self.start_date.clone());
                self.engine.sync_stream(&stream, messages).await
            }
        }
    }

    fn summary(&self) -> Message {
        let stats = self.engine.stats();
        info!(
            "Sync finished: {} records, {} pages, {} streams, {} errors",
            stats.records_synced, stats.pages_fetched, stats.streams_synced, stats.errors
        );
        Message::info(format!(
            "Sync finished: {} records in {} pages across {} streams",
            stats.records_synced, stats.pages_fetched, stats.streams_synced
        ))
    }
}

#[async_trait]
impl Connector for ChartmogulSource {
    async fn check(&self) -> Result<CheckResult> {
        let client = self.client()?;
        match client.check_connection().await {
            Ok(()) => Ok(CheckResult::success()),
            Err(e) => {
                warn!("Connection check failed: {e}");
                Ok(CheckResult::failure(format!("Connection failed: {e}")))
            }
        }
    }

    fn streams(&self) -> Vec<StreamInfo> {
        StreamKind::ALL
            .iter()
            .map(|kind| match kind {
                StreamKind::Customers => StreamInfo::of(&CustomerStream::new()),
                StreamKind::Activities => {
                    StreamInfo::of(&ActivityStream::new(self.config.start_date_owned()))
                }
            })
            .collect()
    }

    async fn read(&self, selected: &[StreamKind], sync: SyncConfig) -> Result<MessageStream> {
        let run = ReadRun {
            fail_fast: sync.fail_fast,
            engine: SyncEngine::new(self.client()?).with_config(sync),
            start_date: self.config.start_date_owned(),
            pending: selected.to_vec().into_iter(),
            finished: false,
        };

        let messages = futures::stream::unfold(run, |mut run| async move {
            let batch = run.next_batch().await?;
            Some((batch, run))
        })
        .flat_map(futures::stream::iter);

        Ok(Box::pin(messages))
    }
}
