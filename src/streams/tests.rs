//! Tests for stream module

use super::*;
use crate::error::Error;
use crate::pagination::{PageNumberCursor, StartAfterCursor};
use crate::types::{ParamValue, RequestParams};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn params(pairs: &[(&str, ParamValue)]) -> RequestParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_accessors() {
    let page = Page::ok(json!({
        "has_more": true,
        "current_page": 7,
        "entries": [{"id": 1}]
    }));

    assert_eq!(page.status(), 200);
    assert!(page.is_success());
    assert!(page.has_more().unwrap());
    assert_eq!(page.current_page().unwrap(), 7);
    assert_eq!(page.entries().unwrap().len(), 1);
}

#[test]
fn test_page_missing_keys_are_malformed() {
    let page = Page::ok(json!({}));

    assert!(matches!(
        page.has_more(),
        Err(Error::MalformedPayload { key }) if key == "has_more"
    ));
    assert!(matches!(
        page.current_page(),
        Err(Error::MalformedPayload { key }) if key == "current_page"
    ));
    assert!(matches!(
        page.entries(),
        Err(Error::MalformedPayload { key }) if key == "entries"
    ));
}

#[test]
fn test_page_non_success_status() {
    let page = Page::new(503, json!(null));
    assert!(!page.is_success());
}

// ============================================================================
// CustomerStream Tests
// ============================================================================

#[test]
fn test_customers_request_params() {
    let stream = CustomerStream::new();

    assert_eq!(
        stream.request_params(None),
        params(&[("page", ParamValue::Int(1))])
    );

    let cursor = PageNumberCursor::new(3);
    assert_eq!(
        stream.request_params(Some(&cursor)),
        params(&[("page", ParamValue::Int(3))])
    );
}

#[test]
fn test_customers_request_params_idempotent() {
    let stream = CustomerStream::new();
    let cursor = PageNumberCursor::new(5);

    assert_eq!(
        stream.request_params(Some(&cursor)),
        stream.request_params(Some(&cursor))
    );
    assert_eq!(stream.request_params(None), stream.request_params(None));
}

#[test]
fn test_customers_next_cursor() {
    let stream = CustomerStream::new();

    // no more results
    let page = Page::ok(json!({"has_more": false}));
    assert_eq!(stream.next_cursor(&page).unwrap(), None);

    // there are more results
    let page = Page::ok(json!({"has_more": true, "current_page": 42}));
    assert_eq!(
        stream.next_cursor(&page).unwrap(),
        Some(PageNumberCursor::new(43))
    );
}

#[test]
fn test_customers_next_cursor_without_current_page() {
    let stream = CustomerStream::new();
    let page = Page::ok(json!({"has_more": true}));

    assert!(matches!(
        stream.next_cursor(&page),
        Err(Error::MalformedPayload { .. })
    ));
}

#[test]
fn test_customers_parse_records() {
    let stream = CustomerStream::new();
    let page = Page::ok(json!({"entries": [{"one": 1}, {"two": 2}]}));

    let mut records = stream.parse_records(&page).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records.next(), Some(json!({"one": 1})));
    assert_eq!(records.next(), Some(json!({"two": 2})));
    assert_eq!(records.next(), None);
    assert_eq!(records.next(), None);
}

#[test]
fn test_customers_parse_records_empty_page() {
    let stream = CustomerStream::new();
    let page = Page::ok(json!({"entries": [], "has_more": false}));

    assert_eq!(stream.parse_records(&page).unwrap().count(), 0);
}

#[test]
fn test_customers_metadata() {
    let stream = CustomerStream::new();
    assert_eq!(stream.name(), "customers");
    assert_eq!(stream.path(), "customers");
    assert_eq!(stream.primary_key(), "id");
}

// ============================================================================
// ActivityStream Tests
// ============================================================================

#[test]
fn test_activities_request_params() {
    // no start date
    let stream = ActivityStream::new(None);
    assert_eq!(stream.request_params(None), RequestParams::new());

    // start date set
    let stream = ActivityStream::new(Some("2010-01-01".to_string()));
    assert_eq!(
        stream.request_params(None),
        params(&[("start-date", ParamValue::from("2010-01-01"))])
    );

    // cursor takes precedence over the start date
    let cursor = StartAfterCursor::new("a-b-c");
    assert_eq!(
        stream.request_params(Some(&cursor)),
        params(&[("start-after", ParamValue::from("a-b-c"))])
    );

    let stream = ActivityStream::new(None);
    assert_eq!(
        stream.request_params(Some(&cursor)),
        params(&[("start-after", ParamValue::from("a-b-c"))])
    );
}

#[test]
fn test_activities_request_params_idempotent() {
    let stream = ActivityStream::new(Some("2010-01-01".to_string()));
    assert_eq!(stream.request_params(None), stream.request_params(None));
    assert_eq!(stream.start_date(), Some("2010-01-01"));
}

#[test]
fn test_activities_next_cursor() {
    let stream = ActivityStream::new(None);

    // no more results
    let page = Page::ok(json!({"has_more": false}));
    assert_eq!(stream.next_cursor(&page).unwrap(), None);

    // there are more results
    let page = Page::ok(json!({"has_more": true, "entries": [{"uuid": "unique-uuid"}]}));
    assert_eq!(
        stream.next_cursor(&page).unwrap(),
        Some(StartAfterCursor::new("unique-uuid"))
    );
}

#[test]
fn test_activities_next_cursor_uses_last_entry() {
    let stream = ActivityStream::new(None);
    let page = Page::ok(json!({
        "has_more": true,
        "entries": [{"uuid": "first"}, {"uuid": "middle"}, {"uuid": "last"}]
    }));

    assert_eq!(
        stream.next_cursor(&page).unwrap(),
        Some(StartAfterCursor::new("last"))
    );
}

#[test]
fn test_activities_next_cursor_malformed() {
    let stream = ActivityStream::new(None);

    let page = Page::ok(json!({"has_more": true, "entries": []}));
    assert!(matches!(
        stream.next_cursor(&page),
        Err(Error::MalformedPayload { key }) if key == "entries"
    ));

    let page = Page::ok(json!({"has_more": true, "entries": [{"id": 1}]}));
    assert!(matches!(
        stream.next_cursor(&page),
        Err(Error::MalformedPayload { key }) if key == "uuid"
    ));
}

#[test]
fn test_activities_parse_records() {
    let stream = ActivityStream::new(None);
    let page = Page::ok(json!({
        "entries": [{"uuid": "a", "type": "new_biz"}, {"uuid": "b", "type": "churn"}]
    }));

    let records: Vec<_> = stream.parse_records(&page).unwrap().collect();
    assert_eq!(
        records,
        vec![
            json!({"uuid": "a", "type": "new_biz"}),
            json!({"uuid": "b", "type": "churn"})
        ]
    );
}

// ============================================================================
// Retry Tests
// ============================================================================

#[test_case(200, false ; "ok")]
#[test_case(400, false ; "bad request")]
#[test_case(429, true ; "too many requests")]
#[test_case(500, true ; "internal server error")]
fn test_should_retry(status: u16, expected: bool) {
    assert_eq!(CustomerStream::new().should_retry(status), expected);
    assert_eq!(ActivityStream::new(None).should_retry(status), expected);
}

#[test]
fn test_backoff_delay_is_unset() {
    let page = Page::new(429, json!({}));
    assert_eq!(CustomerStream::new().backoff_delay(&page), None);
    assert_eq!(ActivityStream::new(None).backoff_delay(&page), None);
}

// ============================================================================
// StreamKind Tests
// ============================================================================

#[test]
fn test_stream_kind_parse() {
    assert_eq!("customers".parse::<StreamKind>().unwrap(), StreamKind::Customers);
    assert_eq!(
        "activities".parse::<StreamKind>().unwrap(),
        StreamKind::Activities
    );
    assert!(matches!(
        "invoices".parse::<StreamKind>(),
        Err(Error::StreamNotFound { stream }) if stream == "invoices"
    ));
}

#[test]
fn test_stream_kind_parse_list() {
    assert_eq!(
        StreamKind::parse_list("").unwrap(),
        vec![StreamKind::Customers, StreamKind::Activities]
    );
    assert_eq!(
        StreamKind::parse_list("activities, customers,activities").unwrap(),
        vec![StreamKind::Activities, StreamKind::Customers]
    );
    assert!(StreamKind::parse_list("customers,plans").is_err());
}

#[test]
fn test_stream_kind_names_match_streams() {
    assert_eq!(StreamKind::Customers.name(), CustomerStream::new().name());
    assert_eq!(
        StreamKind::Activities.name(),
        ActivityStream::new(None).name()
    );
    assert_eq!(StreamKind::Activities.to_string(), "activities");
}
