//! Action command handlers

use appcanvas_core::errors::AppCanvasError;
use appcanvas_core::log_op_start;
use appcanvas_core::model::{Action, ActionPayload};
use appcanvas_core::rules::validation;
use appcanvas_store::errors::{from_rusqlite, Result};
use appcanvas_store::repo::{ActionRepo, ProjectRepo};
use rusqlite::Connection;
use uuid::Uuid;

use super::{instrumented, write_tx};

/// Create an action in a project
///
/// # Errors
/// * `NotFound` if the project does not exist
/// * `Required` (field `action`), `LengthExceeded` (field `name`)
pub fn create_action(
    conn: &mut Connection,
    project_id: Uuid,
    payload: &ActionPayload,
) -> Result<Action> {
    log_op_start!("create_action", project_id = %project_id);
    instrumented("create_action", || {
        let mut action = Action::new(project_id);
        action.apply_payload(payload);
        validation::validate_action(&mut action)?;

        let tx = write_tx(conn)?;
        ProjectRepo::require(&tx, project_id)?;
        ActionRepo::insert(&tx, &mut action)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(action)
    })
}

/// # Errors
/// `NotFound` if no such action exists.
pub fn get_action(conn: &Connection, action_id: Uuid) -> Result<Action> {
    log_op_start!("get_action", action_id = %action_id);
    instrumented("get_action", || ActionRepo::require(conn, action_id))
}

/// Update the fields present in `payload`
///
/// # Errors
/// * `NotFound` if no such action exists
/// * `Required` (field `action`), `LengthExceeded` (field `name`)
pub fn update_action(
    conn: &mut Connection,
    action_id: Uuid,
    payload: &ActionPayload,
) -> Result<Action> {
    log_op_start!("update_action", action_id = %action_id);
    instrumented("update_action", || {
        let tx = write_tx(conn)?;
        let mut action = ActionRepo::require(&tx, action_id)?;
        action.apply_payload(payload);
        validation::validate_action(&mut action)?;

        ActionRepo::update(&tx, &mut action)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(action)
    })
}

/// # Errors
/// `NotFound` if the project does not exist.
pub fn list_actions(conn: &Connection, project_id: Uuid) -> Result<Vec<Action>> {
    log_op_start!("list_actions", project_id = %project_id);
    instrumented("list_actions", || {
        ProjectRepo::require(conn, project_id)?;
        ActionRepo::list_for_project(conn, project_id)
    })
}

/// Delete an action and the events bound to it
///
/// # Errors
/// `NotFound` if no such action exists.
pub fn delete_action(conn: &mut Connection, action_id: Uuid) -> Result<()> {
    log_op_start!("delete_action", action_id = %action_id);
    instrumented("delete_action", || {
        let tx = write_tx(conn)?;
        if !ActionRepo::delete(&tx, action_id)? {
            return Err(AppCanvasError::ActionNotFound { action_id }.into());
        }
        tx.commit().map_err(from_rusqlite)
    })
}
