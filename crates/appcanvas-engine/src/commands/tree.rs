//! Tree Reader and Order Writer entry points

use std::collections::HashMap;

use appcanvas_core::log_op_start;
use appcanvas_core::model::{Element, Event, TreeItem, TreeScope};
use appcanvas_core::tree::{assemble, plan_placements, validate_desired_tree, TreeOptions};
use appcanvas_store::errors::{from_rusqlite, Result};
use appcanvas_store::repo::{ElementRepo, ProjectRepo};
use appcanvas_store::tree as store_tree;
use rusqlite::Connection;
use uuid::Uuid;

use super::{instrumented, write_tx};

/// Read the subtree under `scope`
///
/// Returns the depth-ordered flat sequence when `options.flat` is set,
/// otherwise the nested trees rooted at the scope's direct children. With
/// `options.with_events` every returned element carries its events (possibly
/// none).
///
/// # Errors
/// * `NotFound` if the scope's project or element does not exist
/// * `InvalidInput` (field `columns`) for an unknown projection column
pub fn get_tree(conn: &Connection, scope: TreeScope, options: &TreeOptions) -> Result<Vec<Element>> {
    log_op_start!(
        "get_tree",
        scope = %scope,
        depth = options.depth,
        flat = options.flat
    );
    instrumented("get_tree", || get_tree_impl(conn, scope, options))
}

fn get_tree_impl(conn: &Connection, scope: TreeScope, options: &TreeOptions) -> Result<Vec<Element>> {
    resolve_project(conn, scope)?;

    let mut flat = store_tree::read_flat(conn, scope, options)?;

    if options.with_events {
        let mut by_element: HashMap<_, Vec<Event>> = HashMap::new();
        for event in store_tree::events_in_scope(conn, scope, options.depth)? {
            by_element.entry(event.element_id).or_default().push(event);
        }
        for element in &mut flat {
            element.events = Some(by_element.remove(&element.id).unwrap_or_default());
        }
    }

    if options.flat {
        Ok(flat)
    } else {
        Ok(assemble(&flat, scope.parent_id()))
    }
}

/// Redefine the whole subtree under `scope`
///
/// `desired` must name every current descendant of `scope` exactly once
/// and nothing else. Each item is placed under its enclosing item (or the
/// scope itself at the top level) at its 1-based position. Validation and
/// writes happen in one transaction; on any error nothing changes.
///
/// # Errors
/// * `NotFound` if the scope does not exist
/// * `DuplicateTreeItem`, `ElementNotInTree`, `TreeNotCompleted`
/// * `ElementNotOwnedByProject` if a row changed project under us
pub fn reorder(conn: &mut Connection, scope: TreeScope, desired: &[TreeItem]) -> Result<()> {
    log_op_start!(
        "reorder",
        scope = %scope,
        tree_len = TreeItem::flatten_ids(desired).len()
    );
    instrumented("reorder", || {
        let tx = write_tx(conn)?;
        let project_id = resolve_project(&tx, scope)?;
        reorder_in(&tx, scope, project_id, desired)?;
        tx.commit().map_err(from_rusqlite)
    })
}

/// Validate and apply a desired tree inside an open transaction
pub(crate) fn reorder_in(
    conn: &Connection,
    scope: TreeScope,
    project_id: Uuid,
    desired: &[TreeItem],
) -> Result<()> {
    let current = store_tree::descendant_ids(conn, scope)?;
    validate_desired_tree(&current, desired)?;

    let placements = plan_placements(scope, desired);
    store_tree::apply_placements(conn, project_id, &placements)
}

/// The project a scope belongs to, checking the scope exists
fn resolve_project(conn: &Connection, scope: TreeScope) -> Result<Uuid> {
    match scope {
        TreeScope::Project(project_id) => Ok(ProjectRepo::require(conn, project_id)?.id),
        TreeScope::Element(element_id) => Ok(ElementRepo::require(conn, element_id)?.project_id),
    }
}
