#![allow(clippy::unwrap_used, clippy::expect_used)]

use appcanvas_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use appcanvas_core::core_types::RequestId;
use appcanvas_core::errors::{AppCanvasError, ExError, ExErrorKind};
use appcanvas_core::logging_facility::{init_test_capture, request_span};
use appcanvas_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "logging_start_unique_1";

    log_op_start!(op_name, project_id = "p1");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("project_id"), Some("p1"));
    assert!(events[0].component.is_some());
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "logging_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "logging_error_unique_3";

    let err = AppCanvasError::TreeNotCompleted { missing: vec![] };
    log_op_error!(op_name, err, duration_ms = 7);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].level, tracing::Level::ERROR);
    assert_eq!(events[0].field("err.code"), Some("ERR_TREE_NOT_COMPLETED"));
    assert_eq!(events[0].field("err.kind"), Some("TreeNotCompleted"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "logging_error_unique_4";

    let err = ExError::new(ExErrorKind::Persistence).with_message("disk I/O error");
    log_op_error!(op_name, err, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let events = capture.events_for(op_name);
    assert_eq!(events[0].field("err.code"), Some("ERR_PERSISTENCE"));
}

#[test]
fn test_request_span_propagates_request_id() {
    let capture = init_test_capture();
    let op_name = "logging_request_span_unique_5";
    let request_id = RequestId::new();

    {
        let span = request_span(&request_id);
        let _guard = span.enter();
        log_op_start!(op_name);
        log_op_end!(op_name, duration_ms = 0);
    }
    log_op_start!(op_name);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].request_id.as_deref(), Some(request_id.as_str()));
    assert_eq!(events[1].request_id.as_deref(), Some(request_id.as_str()));
    assert_eq!(events[2].request_id, None);
}
