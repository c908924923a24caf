//! Cursor types
//!
//! A cursor is encoded as a mapping of request-query keys to values, so the
//! serialized form of each cursor is exactly the query it produces.

use crate::types::{ParamValue, RequestParams};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Query key carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Query key carrying the continuation token
pub const START_AFTER_PARAM: &str = "start-after";

/// Core trait for resumption cursors
pub trait PageCursor: Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync {
    /// Encode the cursor as query parameters
    fn to_params(&self) -> RequestParams;
}

// ============================================================================
// Page Number Cursor
// ============================================================================

/// 1-based page index, encoded as `{page: N}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNumberCursor {
    /// Page to request next
    pub page: u32,
}

impl PageNumberCursor {
    /// Create a cursor pointing at the given page
    pub fn new(page: u32) -> Self {
        Self { page }
    }

    /// Cursor for the first page
    pub fn first() -> Self {
        Self::new(1)
    }

    /// Cursor for the page after `current_page`, `None` on overflow
    pub fn after(current_page: u32) -> Option<Self> {
        current_page.checked_add(1).map(Self::new)
    }
}

impl PageCursor for PageNumberCursor {
    fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert(PAGE_PARAM.to_string(), ParamValue::from(self.page));
        params
    }
}

// ============================================================================
// Start-After Cursor
// ============================================================================

/// Continuation token, encoded as `{start-after: <identifier>}`
///
/// The API resumes after the record carrying this identifier rather than at a
/// page index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StartAfterCursor {
    /// Identifier of the last record already seen
    #[serde(rename = "start-after")]
    pub start_after: String,
}

impl StartAfterCursor {
    /// Create a cursor resuming after the given identifier
    pub fn new(start_after: impl Into<String>) -> Self {
        Self {
            start_after: start_after.into(),
        }
    }
}

impl PageCursor for StartAfterCursor {
    fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert(
            START_AFTER_PARAM.to_string(),
            ParamValue::from(self.start_after.as_str()),
        );
        params
    }
}
