//! Event command handlers
//!
//! An event binds an element trigger (e.g. "click") to an action of the
//! same project.

use appcanvas_core::errors::AppCanvasError;
use appcanvas_core::log_op_start;
use appcanvas_core::model::{Event, EventPayload};
use appcanvas_core::rules::validation;
use appcanvas_store::errors::{from_rusqlite, Result};
use appcanvas_store::repo::{ActionRepo, ElementRepo, EventRepo};
use rusqlite::Connection;
use uuid::Uuid;

use super::{instrumented, write_tx};

/// Bind an action to an element trigger
///
/// # Errors
/// * `Required` (field `action_id` or `event`)
/// * `NotFound` for a missing element or action
/// * `ActionNotOwnedByProject` (field `action_id`) if the action belongs to
///   another project than the element
pub fn create_event(
    conn: &mut Connection,
    element_id: Uuid,
    payload: &EventPayload,
) -> Result<Event> {
    log_op_start!("create_event", element_id = %element_id);
    instrumented("create_event", || {
        let action_id = payload
            .action_id
            .ok_or(AppCanvasError::Required { field: "action_id" })?;
        let mut event = Event::new(element_id, action_id, payload.event.clone().unwrap_or_default());
        validation::validate_event(&mut event)?;

        let tx = write_tx(conn)?;
        let element = ElementRepo::require(&tx, element_id)?;
        check_action_owner(&tx, action_id, element.project_id)?;

        EventRepo::insert(&tx, &mut event)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(event)
    })
}

/// # Errors
/// `NotFound` if no such event exists.
pub fn get_event(conn: &Connection, event_id: Uuid) -> Result<Event> {
    log_op_start!("get_event", event_id = %event_id);
    instrumented("get_event", || EventRepo::require(conn, event_id))
}

/// Rebind an event to another action or rename its trigger
///
/// The action is re-checked against the element's project on every update,
/// whether or not `action_id` changed.
///
/// # Errors
/// * `NotFound` for a missing event, or a missing action (field `action_id`)
/// * `Required` (field `event`) for a blank trigger name
/// * `ActionNotOwnedByProject` (field `action_id`)
pub fn update_event(
    conn: &mut Connection,
    event_id: Uuid,
    payload: &EventPayload,
) -> Result<Event> {
    log_op_start!("update_event", event_id = %event_id);
    instrumented("update_event", || {
        let tx = write_tx(conn)?;
        let mut event = EventRepo::require(&tx, event_id)?;
        event.apply_payload(payload);
        validation::validate_event(&mut event)?;

        let element = ElementRepo::require(&tx, event.element_id)?;
        check_action_owner(&tx, event.action_id, element.project_id)?;

        EventRepo::update(&tx, &mut event)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(event)
    })
}

fn check_action_owner(conn: &Connection, action_id: Uuid, project_id: Uuid) -> Result<()> {
    let action = ActionRepo::require(conn, action_id).map_err(|e| e.with_field("action_id"))?;
    if action.project_id != project_id {
        return Err(AppCanvasError::ActionNotOwnedByProject {
            action_id,
            project_id,
        }
        .into());
    }
    Ok(())
}

/// Events of one element, oldest first
///
/// # Errors
/// `NotFound` if the element does not exist.
pub fn list_events(conn: &Connection, element_id: Uuid) -> Result<Vec<Event>> {
    log_op_start!("list_events", element_id = %element_id);
    instrumented("list_events", || {
        ElementRepo::require(conn, element_id)?;
        EventRepo::list_for_element(conn, element_id)
    })
}

/// # Errors
/// `NotFound` if no such event exists.
pub fn delete_event(conn: &mut Connection, event_id: Uuid) -> Result<()> {
    log_op_start!("delete_event", event_id = %event_id);
    instrumented("delete_event", || {
        let tx = write_tx(conn)?;
        if !EventRepo::delete(&tx, event_id)? {
            return Err(AppCanvasError::EventNotFound { event_id }.into());
        }
        tx.commit().map_err(from_rusqlite)
    })
}
