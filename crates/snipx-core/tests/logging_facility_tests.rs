#![allow(clippy::unwrap_used, clippy::expect_used)]

use snipx_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use snipx_core::errors::SnipError;
use snipx_core::logging_facility::test_capture::init_test_capture;
use snipx_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, short_code = "aB3x");

    let start_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert_eq!(start_events.len(), 1);
    assert_eq!(start_events[0].field("short_code"), Some("aB3x"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = SnipError::CapacityExhausted {
        scope: "global".to_string(),
        attempts: 5,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].field("err.code"),
        Some("ERR_CAPACITY_EXHAUSTED")
    );
}

#[test]
fn test_boundary_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 2);
    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
}

#[test]
fn test_log_op_error_carries_short_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_short_code";

    let err = SnipError::ShortCodeNotFound {
        scope: "tribe/t1".to_string(),
        short_code: "Qx7p".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 2, attempt = 1);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_NOT_FOUND"));
    assert_eq!(events[0].field("err.short_code"), Some("Qx7p"));
    assert_eq!(events[0].field("attempt"), Some("1"));
}
