//! Tests for pagination module

use super::*;
use crate::streams::{ActivityStream, CustomerStream, Page};
use crate::types::ParamValue;
use serde_json::json;

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_page_number_cursor_params() {
    let params = PageNumberCursor::new(3).to_params();
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("page"), Some(&ParamValue::Int(3)));
}

#[test]
fn test_page_number_cursor_first_and_after() {
    assert_eq!(PageNumberCursor::first(), PageNumberCursor::new(1));
    assert_eq!(PageNumberCursor::after(42), Some(PageNumberCursor::new(43)));
    assert_eq!(PageNumberCursor::after(u32::MAX), None);
}

#[test]
fn test_start_after_cursor_params() {
    let params = StartAfterCursor::new("a-b-c").to_params();
    assert_eq!(params.len(), 1);
    assert_eq!(
        params.get("start-after"),
        Some(&ParamValue::Str("a-b-c".to_string()))
    );
}

#[test]
fn test_cursor_serialized_form_matches_params() {
    let cursor = PageNumberCursor::new(2);
    assert_eq!(serde_json::to_value(cursor).unwrap(), json!({"page": 2}));
    assert_eq!(
        serde_json::to_value(cursor.to_params()).unwrap(),
        json!({"page": 2})
    );

    let cursor = StartAfterCursor::new("uuid-1");
    assert_eq!(
        serde_json::to_value(&cursor).unwrap(),
        json!({"start-after": "uuid-1"})
    );

    let parsed: StartAfterCursor =
        serde_json::from_value(json!({"start-after": "uuid-1"})).unwrap();
    assert_eq!(parsed, cursor);
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state: PaginationState<PageNumberCursor> = PaginationState::default();
    assert_eq!(state, PaginationState::Start);
    assert!(!state.is_done());
    assert!(state.cursor().is_none());
}

#[test]
fn test_pagination_state_cursor() {
    let state = PaginationState::Fetching(PageNumberCursor::new(2));
    assert_eq!(state.cursor(), Some(&PageNumberCursor::new(2)));

    let state: PaginationState<PageNumberCursor> = PaginationState::Done;
    assert!(state.is_done());
    assert!(state.cursor().is_none());
}

// ============================================================================
// Pagination Run Tests
// ============================================================================

#[test]
fn test_customer_pagination_three_pages() {
    let stream = CustomerStream::new();
    let pages = [
        Page::ok(json!({"has_more": true, "current_page": 1, "entries": [{"id": 1}]})),
        Page::ok(json!({"has_more": true, "current_page": 2, "entries": [{"id": 2}]})),
        Page::ok(json!({"has_more": false, "current_page": 3, "entries": [{"id": 3}]})),
    ];

    let mut pagination = Pagination::new(&stream);
    let mut requests = Vec::new();
    let mut cursors = Vec::new();
    let mut responses = pages.iter();

    while let Some(params) = pagination.next_request() {
        requests.push(params);
        let page = responses.next().expect("more requests than pages");
        cursors.push(pagination.advance(page).unwrap().copied());
    }

    assert_eq!(requests.len(), 3);
    assert_eq!(pagination.pages_fetched(), 3);
    assert!(pagination.is_done());
    assert_eq!(
        cursors,
        vec![
            Some(PageNumberCursor::new(2)),
            Some(PageNumberCursor::new(3)),
            None
        ]
    );

    let pages_requested: Vec<_> = requests.iter().map(|p| p["page"].clone()).collect();
    assert_eq!(
        pages_requested,
        vec![ParamValue::Int(1), ParamValue::Int(2), ParamValue::Int(3)]
    );
}

#[test]
fn test_activity_pagination_with_start_date() {
    let stream = ActivityStream::new(Some("2022-01-01".to_string()));
    let mut pagination = Pagination::new(&stream);

    let first = pagination.next_request().unwrap();
    assert_eq!(
        first.get("start-date"),
        Some(&ParamValue::Str("2022-01-01".to_string()))
    );

    let page = Page::ok(json!({"has_more": true, "entries": [{"uuid": "u-1"}, {"uuid": "u-2"}]}));
    let cursor = pagination.advance(&page).unwrap().cloned();
    assert_eq!(cursor, Some(StartAfterCursor::new("u-2")));

    let second = pagination.next_request().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(
        second.get("start-after"),
        Some(&ParamValue::Str("u-2".to_string()))
    );

    let page = Page::ok(json!({"has_more": false, "entries": [{"uuid": "u-3"}]}));
    assert!(pagination.advance(&page).unwrap().is_none());
    assert!(pagination.next_request().is_none());
}

#[test]
fn test_pagination_single_page() {
    let stream = CustomerStream::new();
    let mut pagination = Pagination::new(&stream);

    assert_eq!(pagination.state(), &PaginationState::Start);
    let page = Page::ok(json!({"has_more": false, "entries": []}));
    assert!(pagination.advance(&page).unwrap().is_none());
    assert_eq!(pagination.state(), &PaginationState::Done);
    assert!(pagination.next_request().is_none());
}

#[test]
fn test_pagination_advance_after_done_is_noop() {
    let stream = CustomerStream::new();
    let mut pagination = Pagination::new(&stream);

    let last = Page::ok(json!({"has_more": false}));
    pagination.advance(&last).unwrap();

    let stray = Page::ok(json!({"has_more": true, "current_page": 9}));
    assert!(pagination.advance(&stray).unwrap().is_none());
    assert_eq!(pagination.pages_fetched(), 1);
    assert!(pagination.is_done());
}

#[test]
fn test_pagination_malformed_page_keeps_state() {
    let stream = CustomerStream::new();
    let mut pagination = Pagination::new(&stream);

    let page = Page::ok(json!({"entries": []}));
    assert!(pagination.advance(&page).is_err());
    assert_eq!(pagination.state(), &PaginationState::Start);
    assert_eq!(pagination.pages_fetched(), 0);
}
