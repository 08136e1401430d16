use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::model::Action;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::rows::{self, action_from_row, object_value, ACTION_COLUMNS};
use crate::errors::{from_rusqlite, Result};

/// SQLite repository for actions
pub struct ActionRepo;

impl ActionRepo {
    pub fn insert(conn: &Connection, action: &mut Action) -> Result<()> {
        let now = rows::now();
        action.created_at = now;
        action.updated_at = now;

        conn.execute(
            "INSERT INTO actions (id, project_id, name, action, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                action.id.to_string(),
                action.project_id.to_string(),
                action.name,
                action.action,
                object_value(&action.data),
                now.timestamp_millis(),
                now.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn get(conn: &Connection, action_id: Uuid) -> Result<Option<Action>> {
        conn.query_row(
            &format!("SELECT {} FROM actions WHERE id = ?1", ACTION_COLUMNS),
            [action_id.to_string()],
            action_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn require(conn: &Connection, action_id: Uuid) -> Result<Action> {
        Self::get(conn, action_id)?
            .ok_or_else(|| ExError::from(AppCanvasError::ActionNotFound { action_id }))
    }

    /// Write name, kind and data; refresh `updated_at`
    pub fn update(conn: &Connection, action: &mut Action) -> Result<()> {
        action.updated_at = rows::now();
        let changed = conn
            .execute(
                "UPDATE actions SET name = ?2, action = ?3, data = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    action.id.to_string(),
                    action.name,
                    action.action,
                    object_value(&action.data),
                    action.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(AppCanvasError::ActionNotFound {
                action_id: action.id,
            }
            .into());
        }
        Ok(())
    }

    /// Actions of a project, oldest first
    pub fn list_for_project(conn: &Connection, project_id: Uuid) -> Result<Vec<Action>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM actions WHERE project_id = ?1 ORDER BY created_at, id",
                ACTION_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let actions = stmt
            .query_map([project_id.to_string()], action_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(actions)
    }

    /// Delete an action; events bound to it go with it
    pub fn delete(conn: &Connection, action_id: Uuid) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM actions WHERE id = ?1", [action_id.to_string()])
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }
}
