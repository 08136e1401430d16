//! Element command handlers
//!
//! Create appends to the end of the target sibling group; save rewrites
//! content fields and may reshape the element's subtree; delete removes the
//! subtree. Lifecycle hooks run inside the same transaction.

use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::model::{Element, ElementPayload, TreeScope};
use appcanvas_core::rules::validation;
use appcanvas_core::log_op_start;
use appcanvas_store::errors::{from_rusqlite, Result};
use appcanvas_store::repo::{ElementRepo, ProjectRepo};
use rusqlite::Connection;
use uuid::Uuid;

use super::tree::reorder_in;
use super::{instrumented, write_tx};
use crate::hooks::{ElementLifecycleHook, MainScreenKeeper};

/// Get an element by id
///
/// # Errors
/// `NotFound` if no such element exists.
pub fn get_element(conn: &Connection, element_id: Uuid) -> Result<Element> {
    log_op_start!("get_element", element_id = %element_id);
    instrumented("get_element", || ElementRepo::require(conn, element_id))
}

/// Create an element at the end of its sibling group
///
/// With `parent_id` = `None` the element is top-level in the project.
/// Any `elements` tree in the payload is ignored: a new element has no
/// children to arrange.
///
/// # Errors
/// * `Required` (field `type`), `UnsupportedElementType`, `LengthExceeded`
/// * `NotFound` for a missing project or parent
/// * `ElementNotOwnedByProject` if the parent belongs to another project
pub fn create_element(
    conn: &mut Connection,
    project_id: Uuid,
    parent_id: Option<Uuid>,
    payload: &ElementPayload,
) -> Result<Element> {
    create_element_with_hook(conn, project_id, parent_id, payload, &MainScreenKeeper)
}

/// `create_element` with an explicit lifecycle hook
///
/// # Errors
/// As `create_element`, plus anything the hook returns.
pub fn create_element_with_hook(
    conn: &mut Connection,
    project_id: Uuid,
    parent_id: Option<Uuid>,
    payload: &ElementPayload,
    hook: &dyn ElementLifecycleHook,
) -> Result<Element> {
    log_op_start!(
        "create_element",
        project_id = %project_id,
        parent_id = ?parent_id
    );
    instrumented("create_element", || {
        create_element_impl(conn, project_id, parent_id, payload, hook)
    })
}

fn create_element_impl(
    conn: &mut Connection,
    project_id: Uuid,
    parent_id: Option<Uuid>,
    payload: &ElementPayload,
    hook: &dyn ElementLifecycleHook,
) -> Result<Element> {
    if payload.element_type.is_none() {
        return Err(validation::missing_type().into());
    }
    validation::validate_payload_type(payload)?;
    let mut element = Element::new(project_id, parent_id);
    element.apply_payload(payload);
    validation::validate_element(&mut element)?;

    let tx = write_tx(conn)?;

    ProjectRepo::require(&tx, project_id)?;
    if let Some(parent_id) = parent_id {
        let parent = ElementRepo::require(&tx, parent_id).map_err(|e| e.with_field("parent_id"))?;
        if parent.project_id != project_id {
            return Err(ExError::from(AppCanvasError::ElementNotOwnedByProject {
                element_id: parent_id,
                project_id,
            })
            .with_field("parent_id"));
        }
    }

    ElementRepo::insert(&tx, &mut element)?;
    hook.after_create(&tx, &element)?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(element)
}

/// Update an element's content fields, then optionally reshape its subtree
///
/// Absent payload fields keep their stored values. When `payload.elements`
/// is present it must describe the element's complete current subtree, as
/// for `reorder`; field update and reorder commit together.
///
/// # Errors
/// * `NotFound` if the element does not exist
/// * validation errors as for `create_element`
/// * tree errors as for `reorder`
pub fn save_element(
    conn: &mut Connection,
    element_id: Uuid,
    payload: &ElementPayload,
) -> Result<Element> {
    save_element_with_hook(conn, element_id, payload, &MainScreenKeeper)
}

/// `save_element` with an explicit lifecycle hook
///
/// # Errors
/// As `save_element`, plus anything the hook returns.
pub fn save_element_with_hook(
    conn: &mut Connection,
    element_id: Uuid,
    payload: &ElementPayload,
    hook: &dyn ElementLifecycleHook,
) -> Result<Element> {
    log_op_start!("save_element", element_id = %element_id);
    instrumented("save_element", || {
        save_element_impl(conn, element_id, payload, hook)
    })
}

fn save_element_impl(
    conn: &mut Connection,
    element_id: Uuid,
    payload: &ElementPayload,
    hook: &dyn ElementLifecycleHook,
) -> Result<Element> {
    validation::validate_payload_type(payload)?;
    let tx = write_tx(conn)?;

    let before = ElementRepo::require(&tx, element_id)?;
    let mut element = before.clone();
    element.apply_payload(payload);
    validation::validate_element(&mut element)?;

    ElementRepo::update_content(&tx, &mut element)?;
    hook.after_update(&tx, &before, &element)?;

    if let Some(desired) = &payload.elements {
        reorder_in(&tx, TreeScope::Element(element_id), element.project_id, desired)?;
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(element)
}

/// Delete an element together with its subtree and events
///
/// # Errors
/// `NotFound` if the element does not exist.
pub fn delete_element(conn: &mut Connection, element_id: Uuid) -> Result<()> {
    delete_element_with_hook(conn, element_id, &MainScreenKeeper)
}

/// `delete_element` with an explicit lifecycle hook
///
/// # Errors
/// As `delete_element`, plus anything the hook returns.
pub fn delete_element_with_hook(
    conn: &mut Connection,
    element_id: Uuid,
    hook: &dyn ElementLifecycleHook,
) -> Result<()> {
    log_op_start!("delete_element", element_id = %element_id);
    instrumented("delete_element", || {
        let tx = write_tx(conn)?;

        let element = ElementRepo::require(&tx, element_id)?;
        hook.before_delete(&tx, &element)?;
        ElementRepo::delete(&tx, element_id)?;

        tx.commit().map_err(from_rusqlite)
    })
}
