// Tree Reader: ordering contract, depth limiting, nesting and events

mod common;

use std::collections::HashMap;

use appcanvas_core::errors::ExErrorKind;
use appcanvas_core::model::{ActionPayload, Element, ElementType, EventPayload, TreeScope};
use appcanvas_core::tree::assemble::flatten;
use appcanvas_core::TreeOptions;
use appcanvas_engine::{create_action, create_event, get_tree};
use common::{element, ids, project, setup_test_db};
use uuid::Uuid;

/// Every sibling group is contiguous and strictly ascending, and every
/// parent comes before its descendants
fn assert_ordering_contract(flat: &[Element]) {
    let position: HashMap<Uuid, usize> =
        flat.iter().enumerate().map(|(i, e)| (e.id, i)).collect();

    let mut groups: HashMap<Option<Uuid>, Vec<usize>> = HashMap::new();
    for (i, e) in flat.iter().enumerate() {
        groups.entry(e.parent_id).or_default().push(i);
        if let Some(parent) = e.parent_id {
            if let Some(&p) = position.get(&parent) {
                assert!(p < i, "parent must precede its descendants");
            }
        }
    }

    for positions in groups.values() {
        for pair in positions.windows(2) {
            assert_eq!(pair[0] + 1, pair[1], "siblings must be contiguous");
            assert!(flat[pair[0]].order_index < flat[pair[1]].order_index);
        }
    }
}

#[test]
fn test_flat_read_honours_ordering_contract() {
    let mut conn = setup_test_db();
    let p = project(&mut conn, "Ordering");

    let home = element(&mut conn, p.id, None, "Home", ElementType::Screen);
    let about = element(&mut conn, p.id, None, "About", ElementType::Screen);
    let header = element(&mut conn, p.id, Some(home.id), "Header", ElementType::Layout);
    let bio = element(&mut conn, p.id, Some(about.id), "Bio", ElementType::Text);
    let title = element(&mut conn, p.id, Some(header.id), "Title", ElementType::Text);
    let body = element(&mut conn, p.id, Some(home.id), "Body", ElementType::Layout);
    let cta = element(&mut conn, p.id, Some(body.id), "Buy", ElementType::Button);
    let logo = element(&mut conn, p.id, Some(header.id), "Logo", ElementType::Image);

    let flat = get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::flat_all()).unwrap();

    assert_eq!(flat.len(), 8);
    assert_ordering_contract(&flat);
    assert_eq!(
        ids(&flat),
        vec![home.id, about.id, header.id, body.id, bio.id, title.id, logo.id, cta.id]
    );
}

#[test]
fn test_depth_one_never_returns_grandchildren() {
    let mut conn = setup_test_db();
    let p = project(&mut conn, "Depth");
    let root = element(&mut conn, p.id, None, "Root", ElementType::Screen);
    let child = element(&mut conn, p.id, Some(root.id), "Child", ElementType::Layout);
    element(&mut conn, p.id, Some(child.id), "Grandchild", ElementType::Text);

    let one = get_tree(
        &conn,
        TreeScope::Element(root.id),
        &TreeOptions::flat_all().with_depth(1),
    )
    .unwrap();
    assert_eq!(ids(&one), vec![child.id]);

    let nested = get_tree(
        &conn,
        TreeScope::Project(p.id),
        &TreeOptions::default().with_depth(2),
    )
    .unwrap();
    assert!(nested[0].children[0].children.is_empty());

    let unlimited = get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::flat_all()).unwrap();
    assert_eq!(unlimited.len(), 3);
}

#[test]
fn test_nested_read_matches_parent_links() {
    let mut conn = setup_test_db();
    let p = project(&mut conn, "Nested");
    let e1 = element(&mut conn, p.id, None, "E1", ElementType::Screen);
    let e2 = element(&mut conn, p.id, Some(e1.id), "E2", ElementType::Text);
    let e3 = element(&mut conn, p.id, Some(e1.id), "E3", ElementType::Layout);
    let e4 = element(&mut conn, p.id, Some(e3.id), "E4", ElementType::Text);

    let tree = get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::default()).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].id, e1.id);
    assert_eq!(ids(&tree[0].children), vec![e2.id, e3.id]);
    assert_eq!(ids(&tree[0].children[1].children), vec![e4.id]);

    let again = get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::default()).unwrap();
    assert_eq!(tree, again);
    assert_eq!(flatten(&tree).len(), 4);
}

#[test]
fn test_empty_scope_is_not_an_error() {
    let mut conn = setup_test_db();
    let p = project(&mut conn, "Empty");

    assert!(get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::default())
        .unwrap()
        .is_empty());

    let leaf = element(&mut conn, p.id, None, "Leaf", ElementType::Screen);
    assert!(get_tree(&conn, TreeScope::Element(leaf.id), &TreeOptions::flat_all())
        .unwrap()
        .is_empty());
}

#[test]
fn test_missing_scope_is_not_found() {
    let conn = setup_test_db();

    let err = get_tree(&conn, TreeScope::Element(Uuid::now_v7()), &TreeOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("get_tree"));

    let err = get_tree(&conn, TreeScope::Project(Uuid::now_v7()), &TreeOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_unknown_column_rejected() {
    let mut conn = setup_test_db();
    let p = project(&mut conn, "Columns");
    let options = TreeOptions {
        columns: vec!["secret".to_string()],
        ..TreeOptions::default()
    };

    let err = get_tree(&conn, TreeScope::Project(p.id), &options).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.field(), Some("columns"));
}

#[test]
fn test_with_events_attaches_events_by_element() {
    let mut conn = setup_test_db();
    let p = project(&mut conn, "Events");
    let screen = element(&mut conn, p.id, None, "Screen", ElementType::Screen);
    let button = element(&mut conn, p.id, Some(screen.id), "Go", ElementType::Button);

    let action = create_action(
        &mut conn,
        p.id,
        &ActionPayload {
            name: Some("Go home".to_string()),
            action: Some("navigate".to_string()),
            data: None,
        },
    )
    .unwrap();
    let click = create_event(
        &mut conn,
        button.id,
        &EventPayload {
            action_id: Some(action.id),
            event: Some("click".to_string()),
        },
    )
    .unwrap();

    let options = TreeOptions {
        with_events: true,
        ..TreeOptions::default()
    };
    let tree = get_tree(&conn, TreeScope::Project(p.id), &options).unwrap();

    assert_eq!(tree[0].events, Some(vec![]));
    assert_eq!(tree[0].children[0].events, Some(vec![click]));

    let plain = get_tree(&conn, TreeScope::Project(p.id), &TreeOptions::default()).unwrap();
    assert!(plain[0].children[0].events.is_none());
}
