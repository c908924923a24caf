//! Pagination state machine
//!
//! Tracks one pagination run of one stream. The stream itself stays
//! stateless; the cursor lives here and is handed back to the stream
//! explicitly on every request.

use crate::error::Result;
use crate::streams::{ChartmogulStream, Page};
use crate::types::RequestParams;

/// Where a pagination run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationState<C> {
    /// No request issued yet
    Start,
    /// At least one page fetched, more available from this cursor
    Fetching(C),
    /// The last page reported no further results
    Done,
}

impl<C> Default for PaginationState<C> {
    fn default() -> Self {
        Self::Start
    }
}

impl<C> PaginationState<C> {
    /// Check if pagination is complete
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Cursor for the next request, if one has been produced
    pub fn cursor(&self) -> Option<&C> {
        match self {
            Self::Fetching(cursor) => Some(cursor),
            Self::Start | Self::Done => None,
        }
    }
}

/// Drives a stream through `Start → Fetching → Done`
///
/// ```rust,ignore
/// let mut pagination = Pagination::new(&stream);
/// while let Some(params) = pagination.next_request() {
///     let page = client.fetch_page(&stream, &params).await?;
///     pagination.advance(&page)?;
/// }
/// ```
#[derive(Debug)]
pub struct Pagination<'s, S: ChartmogulStream> {
    stream: &'s S,
    state: PaginationState<S::Cursor>,
    pages_fetched: usize,
}

impl<'s, S: ChartmogulStream> Pagination<'s, S> {
    /// Start a new run for the given stream
    pub fn new(stream: &'s S) -> Self {
        Self {
            stream,
            state: PaginationState::Start,
            pages_fetched: 0,
        }
    }

    /// Query parameters for the next request, `None` once done
    pub fn next_request(&self) -> Option<RequestParams> {
        match &self.state {
            PaginationState::Start => Some(self.stream.request_params(None)),
            PaginationState::Fetching(cursor) => Some(self.stream.request_params(Some(cursor))),
            PaginationState::Done => None,
        }
    }

    /// Feed a fetched page and move to the next state
    ///
    /// Returns the cursor for the following request, or `None` when the
    /// stream is exhausted. Advancing a finished run is a no-op.
    pub fn advance(&mut self, page: &Page) -> Result<Option<&S::Cursor>> {
        if self.state.is_done() {
            return Ok(None);
        }

        let next = self.stream.next_cursor(page)?;
        self.pages_fetched += 1;
        self.state = match next {
            Some(cursor) => PaginationState::Fetching(cursor),
            None => PaginationState::Done,
        };
        Ok(self.state.cursor())
    }

    /// Current state
    pub fn state(&self) -> &PaginationState<S::Cursor> {
        &self.state
    }

    /// Check if pagination is complete
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Number of pages fed to `advance` so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}
