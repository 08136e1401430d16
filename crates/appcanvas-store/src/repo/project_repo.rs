use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::model::Project;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::rows::{self, opt_uuid_text, project_from_row, PROJECT_COLUMNS};
use crate::errors::{from_rusqlite, Result};

/// SQLite repository for projects
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project, stamping both timestamps
    pub fn insert(conn: &Connection, project: &mut Project) -> Result<()> {
        let now = rows::now();
        project.created_at = now;
        project.updated_at = now;

        conn.execute(
            "INSERT INTO projects (id, title, description, main_screen, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                project.id.to_string(),
                project.title,
                project.description,
                opt_uuid_text(project.main_screen),
                now.timestamp_millis(),
                now.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn get(conn: &Connection, project_id: Uuid) -> Result<Option<Project>> {
        conn.query_row(
            &format!("SELECT {} FROM projects WHERE id = ?1", PROJECT_COLUMNS),
            [project_id.to_string()],
            project_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Get a project by id or fail with `NotFound`
    pub fn require(conn: &Connection, project_id: Uuid) -> Result<Project> {
        Self::get(conn, project_id)?
            .ok_or_else(|| ExError::from(AppCanvasError::ProjectNotFound { project_id }))
    }

    /// One page of projects, newest first
    pub fn list(conn: &Connection, limit: u32, offset: u32) -> Result<Vec<Project>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM projects ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
                PROJECT_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let projects = stmt
            .query_map(params![limit, offset], project_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(projects)
    }

    pub fn count(conn: &Connection) -> Result<u64> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }

    /// Write title, description and main screen; refresh `updated_at`
    pub fn update(conn: &Connection, project: &mut Project) -> Result<()> {
        project.updated_at = rows::now();
        let changed = conn
            .execute(
                "UPDATE projects SET title = ?2, description = ?3, main_screen = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    project.id.to_string(),
                    project.title,
                    project.description,
                    opt_uuid_text(project.main_screen),
                    project.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(AppCanvasError::ProjectNotFound {
                project_id: project.id,
            }
            .into());
        }
        Ok(())
    }

    /// Current main screen of a project
    ///
    /// # Errors
    /// `NotFound` if the project does not exist.
    pub fn main_screen(conn: &Connection, project_id: Uuid) -> Result<Option<Uuid>> {
        let row: Option<Option<Uuid>> = conn
            .query_row(
                "SELECT main_screen FROM projects WHERE id = ?1",
                [project_id.to_string()],
                |row| rows::opt_uuid_col(row, 0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        row.ok_or_else(|| AppCanvasError::ProjectNotFound { project_id }.into())
    }

    /// Point the main screen somewhere else (or unset it)
    ///
    /// Only the lifecycle hooks and the validated project update call this.
    pub fn set_main_screen(
        conn: &Connection,
        project_id: Uuid,
        main_screen: Option<Uuid>,
    ) -> Result<()> {
        let changed = conn
            .execute(
                "UPDATE projects SET main_screen = ?2, updated_at = ?3 WHERE id = ?1",
                params![
                    project_id.to_string(),
                    opt_uuid_text(main_screen),
                    rows::now().timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(AppCanvasError::ProjectNotFound { project_id }.into());
        }
        tracing::debug!(
            project_id = %project_id,
            main_screen = ?main_screen,
            "main screen changed"
        );
        Ok(())
    }

    /// Delete a project with its elements, actions and events
    pub fn delete(conn: &Connection, project_id: Uuid) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM projects WHERE id = ?1", [project_id.to_string()])
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }
}
