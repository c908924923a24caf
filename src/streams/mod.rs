//! Stream module
//!
//! The ChartMogul streams and the contract they share.
//!
//! # Overview
//!
//! Every stream builds request parameters from a cursor, decides whether
//! another page exists, and turns a page body into records. Two streams
//! exist:
//!
//! - [`CustomerStream`] - page-number pagination over `/customers`
//! - [`ActivityStream`] - `start-after` token pagination over `/activities`

mod activities;
mod customers;
mod page;
mod types;

pub use activities::ActivityStream;
pub use customers::CustomerStream;
pub use page::{Page, Records};
pub use types::{ChartmogulStream, StreamKind};

#[cfg(test)]
mod tests;
