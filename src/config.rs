//! Source configuration
//!
//! The JSON document a user supplies to run the connector, plus the
//! connection specification describing it.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::types::{JsonValue, OptionStringExt};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_requests_per_second() -> u32 {
    10
}

/// User configuration for the ChartMogul source
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// ChartMogul API key
    #[serde(default)]
    pub api_key: String,

    /// Lower bound for the activities stream (`YYYY-MM-DD` or RFC 3339)
    #[serde(default)]
    pub start_date: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Retries for 429 and 5xx responses
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Request rate ceiling
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl SourceConfig {
    /// Create a config with defaults for everything but the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            start_date: None,
            base_url: default_base_url(),
            max_retries: default_max_retries(),
            requests_per_second: default_requests_per_second(),
        }
    }

    /// Set the start date
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a JSON value
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Check required fields and formats
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        if let Some(start_date) = self.start_date() {
            if !is_valid_start_date(start_date) {
                return Err(Error::invalid_value(
                    "start_date",
                    format!("'{start_date}' is not YYYY-MM-DD or RFC 3339"),
                ));
            }
        }

        if self.requests_per_second == 0 {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Start date, treating an empty string as unset
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref().filter(|s| !s.is_empty())
    }

    /// Owned start date for stream construction
    pub fn start_date_owned(&self) -> Option<String> {
        self.start_date.clone().none_if_empty()
    }

    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(&self.base_url)
            .api_key(&self.api_key)
            .max_retries(self.max_retries)
            .rate_limit(RateLimiterConfig::per_second(self.requests_per_second))
            .build()
    }

    /// Connection specification (JSON schema of this config)
    pub fn spec() -> JsonValue {
        json!({
            "documentationUrl": "https://dev.chartmogul.com/docs",
            "connectionSpecification": {
                "$schema": "http://json-schema.org/draft-07/schema#",
                "title": "ChartMogul Spec",
                "type": "object",
                "required": ["api_key"],
                "additionalProperties": false,
                "properties": {
                    "api_key": {
                        "type": "string",
                        "title": "API Key",
                        "description": "ChartMogul API key, sent as the Basic auth username",
                        "secret": true
                    },
                    "start_date": {
                        "type": "string",
                        "title": "Start Date",
                        "description": "Activities on or after this date are replicated",
                        "examples": ["2017-01-25", "2017-01-25T00:00:00Z"]
                    },
                    "base_url": {
                        "type": "string",
                        "title": "Base URL",
                        "default": DEFAULT_BASE_URL
                    },
                    "max_retries": {
                        "type": "integer",
                        "minimum": 0,
                        "default": default_max_retries()
                    },
                    "requests_per_second": {
                        "type": "integer",
                        "minimum": 1,
                        "default": default_requests_per_second()
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_key", &"***")
            .field("start_date", &self.start_date)
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

fn is_valid_start_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}
