//! HTTP client with retry and rate limiting
//!
//! Provides the transport the streams never touch directly:
//! - Basic authentication with the API key
//! - Rate limiting to prevent API throttling
//! - Retries driven by the stream's retry policy, with configurable backoff
//! - JSON body decoding into [`Page`]

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::streams::{ChartmogulStream, Page};
use crate::types::{BackoffType, JsonValue, RequestParams};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default ChartMogul API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.chartmogul.com/v1/";

/// Endpoint used to validate credentials
const PING_PATH: &str = "ping";

/// HTTP Basic credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username (the API key)
    pub username: String,
    /// Password (empty for API key auth)
    pub password: String,
}

impl Credentials {
    /// Credentials for an API key: the key is the username, the password is empty
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            username: key.into(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"***")
            .finish_non_exhaustive()
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Basic auth credentials
    pub credentials: Option<Credentials>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            credentials: None,
            user_agent: format!("source-chartmogul/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Authenticate with an API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::api_key(key));
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    base_url: Url,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        // Url::join drops the last path segment unless the base ends with '/'
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            base_url,
            config,
            rate_limiter,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Validate credentials against the ping endpoint
    pub async fn check_connection(&self) -> Result<()> {
        let url = self.endpoint(PING_PATH)?;
        self.throttle().await;

        let response = self.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("Connection check succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::http_status(status.as_u16(), body))
    }

    /// Fetch one page of `stream` with the given query parameters
    ///
    /// Non-2xx responses are retried while the stream's retry policy allows
    /// it and attempts remain. The same parameters are reused on every
    /// attempt.
    pub async fn fetch_page<S>(&self, stream: &S, params: &RequestParams) -> Result<Page>
    where
        S: ChartmogulStream + ?Sized,
    {
        let url = self.endpoint(stream.path())?;
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            self.throttle().await;

            let mut req = self.get(url.clone());
            if !params.is_empty() {
                req = req.query(params);
            }

            let response = match req.send().await {
                Ok(response) => response,
                Err(e) => {
                    let err = if e.is_timeout() {
                        Error::Timeout {
                            timeout_ms: self.config.timeout.as_millis() as u64,
                        }
                    } else {
                        Error::Http(e)
                    };
                    if !err.is_retryable() || attempt >= max_retries {
                        return Err(err);
                    }

                    let delay = self.calculate_backoff(attempt);
                    warn!(
                        "Request to {} failed ({err}), attempt {}/{}, retrying in {:?}",
                        stream.name(),
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status().as_u16();
            if response.status().is_success() {
                let body: JsonValue = response.json().await?;
                debug!("Fetched page of {} ({} params)", stream.name(), params.len());
                return Ok(Page::new(status, body));
            }

            let text = response.text().await.unwrap_or_default();
            if stream.should_retry(status) && attempt < max_retries {
                let page = Page::new(status, serde_json::from_str(&text).unwrap_or_default());
                let delay = stream
                    .backoff_delay(&page)
                    .unwrap_or_else(|| self.calculate_backoff(attempt));
                warn!(
                    "Request to {} failed with {status}, attempt {}/{}, retrying in {:?}",
                    stream.name(),
                    attempt + 1,
                    max_retries + 1,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(Error::http_status(status, text));
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff.saturating_mul(attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }

    /// Start an authenticated GET request
    fn get(&self, url: Url) -> RequestBuilder {
        let req = self.client.get(url).header(ACCEPT, "application/json");
        match &self.config.credentials {
            Some(creds) => req.basic_auth(&creds.username, Some(&creds.password)),
            None => req,
        }
    }

    /// Wait for the rate limiter, if any
    async fn throttle(&self) {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
