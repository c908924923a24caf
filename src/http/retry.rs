//! Retry policy
//!
//! Classifies HTTP status codes into retryable and terminal failures.

use std::time::Duration;

/// Retry classification shared by every stream
///
/// Rate limiting (429) and server errors (5xx) are worth retrying. Success
/// and every other client error are not. The policy never picks a delay;
/// timing is left to the caller's backoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy;

impl RetryPolicy {
    /// Whether a response with this status should be retried
    pub fn should_retry(&self, status: u16) -> bool {
        status == 429 || (500..600).contains(&status)
    }

    /// Explicit delay before the next attempt, always `None`
    pub fn backoff_delay(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod retry_tests {
    use super::*;
    use test_case::test_case;

    #[test_case(200 ; "ok")]
    #[test_case(201 ; "created")]
    #[test_case(400 ; "bad request")]
    #[test_case(401 ; "unauthorized")]
    #[test_case(404 ; "not found")]
    fn test_not_retried(status: u16) {
        assert!(!RetryPolicy.should_retry(status));
    }

    #[test_case(429 ; "too many requests")]
    #[test_case(500 ; "internal server error")]
    #[test_case(502 ; "bad gateway")]
    #[test_case(503 ; "service unavailable")]
    #[test_case(599 ; "upper bound")]
    fn test_retried(status: u16) {
        assert!(RetryPolicy.should_retry(status));
    }

    #[test]
    fn test_no_explicit_delay() {
        assert_eq!(RetryPolicy.backoff_delay(), None);
    }
}
