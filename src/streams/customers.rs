//! Customers stream
//!
//! Page-number pagination: the cursor is the next 1-based page index.

use super::page::Page;
use super::types::ChartmogulStream;
use crate::error::{Error, Result};
use crate::pagination::{PageCursor, PageNumberCursor};
use crate::types::RequestParams;

/// Customer records from `GET /customers`
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerStream;

impl CustomerStream {
    /// Create the customers stream
    pub fn new() -> Self {
        Self
    }
}

impl ChartmogulStream for CustomerStream {
    type Cursor = PageNumberCursor;

    fn name(&self) -> &'static str {
        "customers"
    }

    fn path(&self) -> &'static str {
        "customers"
    }

    fn primary_key(&self) -> &'static str {
        "id"
    }

    fn request_params(&self, cursor: Option<&PageNumberCursor>) -> RequestParams {
        cursor
            .copied()
            .unwrap_or_else(PageNumberCursor::first)
            .to_params()
    }

    fn next_cursor(&self, page: &Page) -> Result<Option<PageNumberCursor>> {
        if !page.has_more()? {
            return Ok(None);
        }

        // current_page is the page just fetched
        let current = page.current_page()?;
        PageNumberCursor::after(current)
            .map(Some)
            .ok_or_else(|| Error::malformed("current_page"))
    }
}
