//! Pagination module
//!
//! Supports: page-number cursors (`?page=N`) and continuation-token cursors
//! (`?start-after=<uuid>`).
//!
//! # Overview
//!
//! A cursor says where the next request resumes. Each stream declares its own
//! cursor type, and [`Pagination`] walks one stream through a single run:
//! `Start → Fetching → Done`.

mod state;
mod types;

pub use state::{Pagination, PaginationState};
pub use types::{PageCursor, PageNumberCursor, StartAfterCursor};

#[cfg(test)]
mod tests;
