// Lifecycle logging emitted by engine commands.

use snipx_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use snipx_core::logging_facility::test_capture::init_test_capture;
use snipx_engine::commands::snippet::{snippet_create, snippet_get, CreateRequest};
use snipx_engine::EngineContext;
use tempfile::TempDir;

#[test]
fn test_commands_log_start_and_end_or_error() {
    let capture = init_test_capture();
    capture.clear();

    let temp_dir = TempDir::new().unwrap();
    let conn = snipx_store::db::open_store(temp_dir.path().join("test.db")).unwrap();
    let ctx = EngineContext::new();

    // Success path
    let snippet = snippet_create(CreateRequest::new("print('hi')"), &ctx, &conn).unwrap();

    capture.assert_event_exists("snippet_create", EVENT_START);
    capture.assert_event_exists("snippet_create", EVENT_END);
    let end = capture
        .events_for("snippet_create")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.field("short_code"), Some(snippet.short_code()));
    assert!(end.field("duration_ms").is_some());

    // Failure path
    snippet_get(None, "nope", &ctx, &conn).unwrap_err();

    let errors: Vec<_> = capture
        .events_for("snippet_get")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err.code"), Some("ERR_NOT_FOUND"));
    assert!(capture
        .events_for("snippet_get")
        .iter()
        .all(|e| e.event.as_deref() != Some(EVENT_END)));
}
