//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::engine::{Message, SyncConfig};
use crate::error::{Error, Result};
use crate::source::{ChartmogulSource, Connector};
use crate::streams::StreamKind;
use crate::types::LogLevel;
use futures::StreamExt;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => {
                self.output_message(&json!({
                    "type": "SPEC",
                    "spec": SourceConfig::spec()
                }));
                Ok(())
            }
            Commands::Check => self.check().await,
            Commands::Streams => self.streams(),
            Commands::Read {
                streams,
                max_records,
                state_per_page,
                continue_on_error,
            } => {
                let sync = SyncConfig::new()
                    .with_max_records(*max_records)
                    .with_state_per_page(*state_per_page)
                    .with_fail_fast(!continue_on_error);
                self.read(streams.as_deref(), sync).await
            }
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<SourceConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return SourceConfig::from_json_str(json_str);
        }

        match &self.cli.config {
            Some(path) => SourceConfig::from_file(path),
            None => Err(Error::config(
                "Config not specified (use --config or --config-json)",
            )),
        }
    }

    fn load_source(&self) -> Result<ChartmogulSource> {
        ChartmogulSource::new(self.load_config()?)
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let source = self.load_source()?;

        self.output_message(&Message::info("Checking connection to ChartMogul").to_json());

        let result = source.check().await?;
        let (status, message) = if result.success {
            ("SUCCEEDED", "Connection successful".to_string())
        } else {
            ("FAILED", result.message.unwrap_or_default())
        };

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": status,
                "message": message
            }
        }));

        Ok(())
    }

    /// List streams
    fn streams(&self) -> Result<()> {
        let source = self.load_source()?;
        let streams: Vec<Value> = source
            .streams()
            .into_iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "source_defined_primary_key": [s.primary_key],
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "STREAMS",
            "streams": streams
        }));

        Ok(())
    }

    /// Read streams
    async fn read(&self, streams: Option<&str>, sync: SyncConfig) -> Result<()> {
        let source = self.load_source()?;
        let selected = StreamKind::parse_list(streams.unwrap_or_default())?;

        let mut messages = source.read(&selected, sync).await?;
        while let Some(msg) = messages.next().await {
            let msg = msg?;
            if matches!(msg, Message::Log { level: LogLevel::Debug, .. })
                && !self.cli.verbose
            {
                continue;
            }
            self.output_message(&msg.to_json());
        }

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
