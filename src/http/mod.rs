//! HTTP client module
//!
//! Provides the HTTP transport with retry, rate limiting, and backoff.
//!
//! # Features
//!
//! - **Retry Policy**: 429 and 5xx are retried, everything else is terminal
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: HTTP Basic with the API key as username

mod client;
mod rate_limit;
mod retry;

pub use client::{
    Credentials, HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::RetryPolicy;
