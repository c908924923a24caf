//! Activities stream
//!
//! Token pagination: the API continues after the identifier of the last
//! record seen, not at a page index.

use super::page::Page;
use super::types::ChartmogulStream;
use crate::error::{Error, Result};
use crate::pagination::{PageCursor, StartAfterCursor};
use crate::types::{JsonValue, ParamValue, RequestParams};

/// Query key for the inclusive lower-bound date filter
pub const START_DATE_PARAM: &str = "start-date";

/// Activity events from `GET /activities`
#[derive(Debug, Clone, Default)]
pub struct ActivityStream {
    /// Inclusive lower bound, passed through as-is
    start_date: Option<String>,
}

impl ActivityStream {
    /// Create the activities stream with an optional start date
    pub fn new(start_date: Option<String>) -> Self {
        Self { start_date }
    }

    /// Configured start date
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }
}

impl ChartmogulStream for ActivityStream {
    type Cursor = StartAfterCursor;

    fn name(&self) -> &'static str {
        "activities"
    }

    fn path(&self) -> &'static str {
        "activities"
    }

    fn primary_key(&self) -> &'static str {
        "uuid"
    }

    fn request_params(&self, cursor: Option<&StartAfterCursor>) -> RequestParams {
        // A cursor already encodes where to resume and wins over the start date
        if let Some(cursor) = cursor {
            return cursor.to_params();
        }

        let mut params = RequestParams::new();
        if let Some(start_date) = &self.start_date {
            params.insert(
                START_DATE_PARAM.to_string(),
                ParamValue::from(start_date.as_str()),
            );
        }
        params
    }

    fn next_cursor(&self, page: &Page) -> Result<Option<StartAfterCursor>> {
        if !page.has_more()? {
            return Ok(None);
        }

        let key = self.primary_key();
        let last = page.entries()?.last().ok_or_else(|| Error::malformed("entries"))?;
        let uuid = last
            .get(key)
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::malformed(key))?;

        Ok(Some(StartAfterCursor::new(uuid)))
    }
}
