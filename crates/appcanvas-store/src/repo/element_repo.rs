use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::model::{Element, ElementType};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::rows::{self, element_from_row, object_value, opt_uuid_text, ELEMENT_COLUMNS};
use crate::errors::{element_write_error, from_rusqlite, Result};

/// SQLite repository for elements
pub struct ElementRepo;

impl ElementRepo {
    /// Next free position in a sibling group (max + 1, or 1 when empty)
    pub fn next_order_index(
        conn: &Connection,
        project_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<i64> {
        conn.query_row(
            "SELECT COALESCE(MAX(order_index), 0) + 1 FROM elements
             WHERE project_id = ?1 AND parent_id IS ?2",
            params![project_id.to_string(), opt_uuid_text(parent_id)],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    /// Insert an element at the end of its sibling group
    ///
    /// Assigns `order_index` and stamps both timestamps. Run inside the
    /// caller's write transaction so the max lookup and the insert are one
    /// unit.
    ///
    /// # Errors
    /// `ElementNotOwnedByProject` if the parent is missing or belongs to
    /// another project.
    pub fn insert(conn: &Connection, element: &mut Element) -> Result<()> {
        element.order_index =
            Self::next_order_index(conn, element.project_id, element.parent_id)?;
        let now = rows::now();
        element.created_at = now;
        element.updated_at = now;

        conn.execute(
            "INSERT INTO elements (id, project_id, parent_id, order_index, name, element_type,
                                   attributes, styles, is_visible, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                element.id.to_string(),
                element.project_id.to_string(),
                opt_uuid_text(element.parent_id),
                element.order_index,
                element.name,
                element.element_type.code(),
                object_value(&element.attributes),
                object_value(&element.styles),
                element.is_visible,
                now.timestamp_millis(),
                now.timestamp_millis(),
            ],
        )
        .map_err(|e| {
            element_write_error(
                e,
                &element.parent_id.unwrap_or(element.id).to_string(),
                &element.project_id.to_string(),
            )
        })?;

        tracing::debug!(
            element_id = %element.id,
            order_index = element.order_index,
            "inserted element"
        );
        Ok(())
    }

    /// Get an element by id
    pub fn get(conn: &Connection, element_id: Uuid) -> Result<Option<Element>> {
        conn.query_row(
            &format!("SELECT {} FROM elements WHERE id = ?1", ELEMENT_COLUMNS),
            [element_id.to_string()],
            element_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Get an element by id or fail with `NotFound`
    pub fn require(conn: &Connection, element_id: Uuid) -> Result<Element> {
        Self::get(conn, element_id)?
            .ok_or_else(|| ExError::from(AppCanvasError::ElementNotFound { element_id }))
    }

    /// Write the content fields of an element and refresh `updated_at`
    ///
    /// `parent_id` and `order_index` are deliberately not written; moves go
    /// through the reorder path.
    pub fn update_content(conn: &Connection, element: &mut Element) -> Result<()> {
        element.updated_at = rows::now();
        let changed = conn
            .execute(
                "UPDATE elements
                 SET name = ?2, element_type = ?3, attributes = ?4, styles = ?5,
                     is_visible = ?6, updated_at = ?7
                 WHERE id = ?1",
                params![
                    element.id.to_string(),
                    element.name,
                    element.element_type.code(),
                    object_value(&element.attributes),
                    object_value(&element.styles),
                    element.is_visible,
                    element.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(AppCanvasError::ElementNotFound {
                element_id: element.id,
            }
            .into());
        }
        Ok(())
    }

    /// Delete an element; its subtree and events go with it
    ///
    /// Returns false if no such element existed.
    pub fn delete(conn: &Connection, element_id: Uuid) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM elements WHERE id = ?1", [element_id.to_string()])
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }

    /// First top-level screen of a project by order, skipping `excluding`
    pub fn first_top_level_screen(
        conn: &Connection,
        project_id: Uuid,
        excluding: Uuid,
    ) -> Result<Option<Uuid>> {
        conn.query_row(
            "SELECT id FROM elements
             WHERE project_id = ?1 AND parent_id IS NULL AND element_type = ?2 AND id <> ?3
             ORDER BY order_index, created_at, id
             LIMIT 1",
            params![
                project_id.to_string(),
                ElementType::Screen.code(),
                excluding.to_string()
            ],
            |row| rows::uuid_col(row, 0),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Oldest screen anywhere in a project outside the given ids
    pub fn first_screen_outside(
        conn: &Connection,
        project_id: Uuid,
        excluded: &[Uuid],
    ) -> Result<Option<Uuid>> {
        let mut stmt = conn
            .prepare(
                "SELECT id FROM elements
                 WHERE project_id = ?1 AND element_type = ?2
                 ORDER BY created_at, id",
            )
            .map_err(from_rusqlite)?;
        let ids = stmt
            .query_map(
                params![project_id.to_string(), ElementType::Screen.code()],
                |row| rows::uuid_col(row, 0),
            )
            .map_err(from_rusqlite)?;

        for id in ids {
            let id = id.map_err(from_rusqlite)?;
            if !excluded.contains(&id) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Number of screen elements in a project
    pub fn count_screens(conn: &Connection, project_id: Uuid) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM elements WHERE project_id = ?1 AND element_type = ?2",
            params![project_id.to_string(), ElementType::Screen.code()],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }
}
