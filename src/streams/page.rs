//! Response pages
//!
//! A decoded HTTP response as seen by the streams: the status code and the
//! JSON body. Nothing here touches the network.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use std::iter::FusedIterator;

/// Body key holding the "more results available" flag
pub const HAS_MORE: &str = "has_more";

/// Body key holding the page index just returned
pub const CURRENT_PAGE: &str = "current_page";

/// Body key holding the list of entries
pub const ENTRIES: &str = "entries";

/// One decoded API response
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    status: u16,
    body: JsonValue,
}

impl Page {
    /// Create a page from a status code and decoded body
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self { status, body }
    }

    /// Create a 200 OK page
    pub fn ok(body: JsonValue) -> Self {
        Self::new(200, body)
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Decoded body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `has_more` flag
    pub fn has_more(&self) -> Result<bool> {
        self.body
            .get(HAS_MORE)
            .and_then(JsonValue::as_bool)
            .ok_or_else(|| Error::malformed(HAS_MORE))
    }

    /// The `current_page` index
    pub fn current_page(&self) -> Result<u32> {
        self.body
            .get(CURRENT_PAGE)
            .and_then(JsonValue::as_u64)
            .and_then(|page| u32::try_from(page).ok())
            .ok_or_else(|| Error::malformed(CURRENT_PAGE))
    }

    /// The `entries` list
    pub fn entries(&self) -> Result<&[JsonValue]> {
        self.body
            .get(ENTRIES)
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::malformed(ENTRIES))
    }
}

/// Lazy iterator over the records of one page
///
/// Yields each entry unchanged, in payload order. Entries are cloned only
/// as they are pulled, and the iterator cannot be rewound.
#[derive(Debug)]
pub struct Records<'p> {
    entries: std::slice::Iter<'p, JsonValue>,
}

impl<'p> Records<'p> {
    /// Iterate over the given entries
    pub fn new(entries: &'p [JsonValue]) -> Self {
        Self {
            entries: entries.iter(),
        }
    }
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}
