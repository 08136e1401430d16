// Boundary logging: every command emits start and exactly one end or end_error

mod common;

use appcanvas_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use appcanvas_core::core_types::RequestId;
use appcanvas_core::logging_facility::{init_test_capture, request_span, CapturedEvent, TestCapture};
use appcanvas_core::model::{ElementType, TreeItem, TreeScope};
use appcanvas_core::TreeOptions;
use appcanvas_engine::{get_element, get_tree, reorder};
use common::{element, project, setup_test_db};
use uuid::Uuid;

/// Run `body` inside its own request span and return the events it produced
fn captured<F: FnOnce()>(capture: &TestCapture, body: F) -> Vec<CapturedEvent> {
    let request_id = RequestId::new();
    {
        let span = request_span(&request_id);
        let _guard = span.enter();
        body();
    }
    capture
        .events()
        .into_iter()
        .filter(|e| e.request_id.as_deref() == Some(request_id.as_str()))
        .collect()
}

fn boundary<'a>(events: &'a [CapturedEvent], op: &str) -> Vec<&'a str> {
    events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op))
        .filter_map(|e| e.event.as_deref())
        .collect()
}

#[test]
fn test_successful_command_logs_start_and_end() {
    let capture = init_test_capture();
    let mut conn = setup_test_db();
    let p = project(&mut conn, "P");
    element(&mut conn, p.id, None, "Home", ElementType::Screen);

    let events = captured(&capture, || {
        get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::default()).unwrap();
    });

    assert_eq!(boundary(&events, "get_tree"), vec![EVENT_START, EVENT_END]);
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert!(end.field("duration_ms").is_some());
}

#[test]
fn test_failed_command_logs_end_error_once() {
    let capture = init_test_capture();
    let conn = setup_test_db();

    let events = captured(&capture, || {
        get_element(&conn, Uuid::now_v7()).unwrap_err();
    });

    assert_eq!(boundary(&events, "get_element"), vec![EVENT_START, EVENT_END_ERROR]);
    let failure = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .unwrap();
    assert_eq!(failure.level, tracing::Level::ERROR);
    assert_eq!(failure.field("err.code"), Some("ERR_NOT_FOUND"));
}

#[test]
fn test_reorder_rejection_is_logged_with_code() {
    let capture = init_test_capture();
    let mut conn = setup_test_db();
    let p = project(&mut conn, "P");
    let root = element(&mut conn, p.id, None, "Root", ElementType::Screen);
    element(&mut conn, p.id, Some(root.id), "A", ElementType::Text);
    let b = element(&mut conn, p.id, Some(root.id), "B", ElementType::Text);

    let events = captured(&capture, || {
        reorder(&mut conn, TreeScope::Element(root.id), &[TreeItem::leaf(b.id)]).unwrap_err();
    });

    assert_eq!(boundary(&events, "reorder"), vec![EVENT_START, EVENT_END_ERROR]);
    let failure = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .unwrap();
    assert_eq!(failure.field("err.code"), Some("ERR_TREE_NOT_COMPLETED"));
    assert_eq!(failure.field("err.kind"), Some("TreeNotCompleted"));
}

#[test]
fn test_nested_store_calls_do_not_emit_boundary_events() {
    let capture = init_test_capture();
    let mut conn = setup_test_db();
    let p = project(&mut conn, "P");

    let events = captured(&capture, || {
        element(&mut conn, p.id, None, "Home", ElementType::Screen);
    });

    let boundaries: Vec<_> = events
        .iter()
        .filter(|e| {
            matches!(
                e.event.as_deref(),
                Some(EVENT_START) | Some(EVENT_END) | Some(EVENT_END_ERROR)
            )
        })
        .filter_map(|e| e.op.as_deref())
        .collect();
    assert_eq!(boundaries, vec!["create_element", "create_element"]);
}
