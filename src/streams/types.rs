//! Stream contract
//!
//! Defines the trait every ChartMogul stream implements and the closed set
//! of streams the source exposes.

use super::page::{Page, Records};
use crate::error::{Error, Result};
use crate::http::RetryPolicy;
use crate::pagination::PageCursor;
use crate::types::RequestParams;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Core trait for ChartMogul streams
///
/// Implementations are stateless apart from their construction-time
/// configuration. The cursor is passed in explicitly on each call, and its
/// type is tied to the stream so a cursor from one stream cannot be replayed
/// into another.
pub trait ChartmogulStream: Send + Sync {
    /// Resumption cursor produced and consumed by this stream
    type Cursor: PageCursor;

    /// Stream name as exposed to the pipeline
    fn name(&self) -> &'static str;

    /// Endpoint path relative to the API base URL
    fn path(&self) -> &'static str;

    /// Field uniquely identifying a record
    fn primary_key(&self) -> &'static str;

    /// Query parameters for the next request
    ///
    /// `cursor` is `None` for the first page, otherwise a value previously
    /// returned by [`next_cursor`](Self::next_cursor).
    fn request_params(&self, cursor: Option<&Self::Cursor>) -> RequestParams;

    /// Cursor for the page after `page`, `None` when there are no more results
    fn next_cursor(&self, page: &Page) -> Result<Option<Self::Cursor>>;

    /// Records contained in `page`, one per entry
    fn parse_records<'p>(&self, page: &'p Page) -> Result<Records<'p>> {
        page.entries().map(Records::new)
    }

    /// Whether a response with this status should be retried
    fn should_retry(&self, status: u16) -> bool {
        RetryPolicy.should_retry(status)
    }

    /// Explicit delay before retrying `page`
    ///
    /// `None` leaves the delay to the transport's own backoff.
    fn backoff_delay(&self, _page: &Page) -> Option<Duration> {
        RetryPolicy.backoff_delay()
    }
}

// ============================================================================
// Stream Kind
// ============================================================================

/// The streams this source can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// `/customers`
    Customers,
    /// `/activities`
    Activities,
}

impl StreamKind {
    /// Every stream, in sync order
    pub const ALL: [StreamKind; 2] = [StreamKind::Customers, StreamKind::Activities];

    /// Stream name
    pub fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Activities => "activities",
        }
    }

    /// Parse a comma-separated selection, empty means every stream
    pub fn parse_list(list: &str) -> Result<Vec<StreamKind>> {
        let mut kinds = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let kind: StreamKind = name.parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        if kinds.is_empty() {
            return Ok(Self::ALL.to_vec());
        }
        Ok(kinds)
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StreamKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "customers" => Ok(Self::Customers),
            "activities" => Ok(Self::Activities),
            other => Err(Error::stream_not_found(other)),
        }
    }
}
