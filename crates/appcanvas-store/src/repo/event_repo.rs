use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::model::Event;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::rows::{self, event_from_row, EVENT_COLUMNS};
use crate::errors::{from_rusqlite, Result};

/// SQLite repository for events (element trigger -> action bindings)
pub struct EventRepo;

impl EventRepo {
    pub fn insert(conn: &Connection, event: &mut Event) -> Result<()> {
        let now = rows::now();
        event.created_at = now;
        event.updated_at = now;

        conn.execute(
            "INSERT INTO events (id, element_id, action_id, event, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.id.to_string(),
                event.element_id.to_string(),
                event.action_id.to_string(),
                event.event,
                now.timestamp_millis(),
                now.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn get(conn: &Connection, event_id: Uuid) -> Result<Option<Event>> {
        conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
            [event_id.to_string()],
            event_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn require(conn: &Connection, event_id: Uuid) -> Result<Event> {
        Self::get(conn, event_id)?
            .ok_or_else(|| ExError::from(AppCanvasError::EventNotFound { event_id }))
    }

    /// Rebind an event to another action or trigger name
    pub fn update(conn: &Connection, event: &mut Event) -> Result<()> {
        event.updated_at = rows::now();
        let changed = conn
            .execute(
                "UPDATE events SET action_id = ?2, event = ?3, updated_at = ?4 WHERE id = ?1",
                params![
                    event.id.to_string(),
                    event.action_id.to_string(),
                    event.event,
                    event.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(AppCanvasError::EventNotFound { event_id: event.id }.into());
        }
        Ok(())
    }

    /// Events of one element, oldest first
    pub fn list_for_element(conn: &Connection, element_id: Uuid) -> Result<Vec<Event>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM events WHERE element_id = ?1 ORDER BY created_at, id",
                EVENT_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let events = stmt
            .query_map([element_id.to_string()], event_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(events)
    }

    pub fn delete(conn: &Connection, event_id: Uuid) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM events WHERE id = ?1", [event_id.to_string()])
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }
}
