//! Project command handlers

use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::log_op_start;
use appcanvas_core::model::{Project, ProjectPage, ProjectPatch, ProjectPayload};
use appcanvas_core::rules::validation;
use appcanvas_store::errors::{from_rusqlite, Result};
use appcanvas_store::repo::{ElementRepo, ProjectRepo};
use rusqlite::Connection;
use uuid::Uuid;

use super::{instrumented, write_tx};

/// Create a project
///
/// # Errors
/// `Required` or `LengthExceeded` (field `title`).
pub fn create_project(conn: &mut Connection, payload: &ProjectPayload) -> Result<Project> {
    log_op_start!("create_project");
    instrumented("create_project", || {
        let title = payload
            .title
            .clone()
            .ok_or(AppCanvasError::Required { field: "title" })?;
        let mut project = Project::new(title);
        if let Some(description) = &payload.description {
            project.description = description.clone();
        }
        validation::validate_project(&mut project)?;

        let tx = write_tx(conn)?;
        ProjectRepo::insert(&tx, &mut project)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(project)
    })
}

/// Get a project by id
///
/// # Errors
/// `NotFound` if no such project exists.
pub fn get_project(conn: &Connection, project_id: Uuid) -> Result<Project> {
    log_op_start!("get_project", project_id = %project_id);
    instrumented("get_project", || ProjectRepo::require(conn, project_id))
}

/// List projects newest first
///
/// A `limit` of 0 or above 100 serves the default page size of 30.
///
/// # Errors
/// `Persistence` if the store cannot be read.
pub fn list_projects(conn: &Connection, limit: u32, offset: u32) -> Result<ProjectPage> {
    log_op_start!("list_projects", limit = limit, offset = offset);
    instrumented("list_projects", || {
        let limit = ProjectPage::effective_limit(limit);
        let data = ProjectRepo::list(conn, limit, offset)?;
        let count = ProjectRepo::count(conn)?;
        Ok(ProjectPage::new(data, limit, offset, count))
    })
}

/// The project's main screen, if any
///
/// # Errors
/// `NotFound` if no such project exists.
pub fn get_project_main_screen(conn: &Connection, project_id: Uuid) -> Result<Option<Uuid>> {
    log_op_start!("get_project_main_screen", project_id = %project_id);
    instrumented("get_project_main_screen", || {
        ProjectRepo::main_screen(conn, project_id)
    })
}

/// Update title, description and, after re-validation, the main screen
///
/// # Errors
/// * `NotFound` for a missing project or main screen element
/// * `ElementNotOwnedByProject` / `NotAScreen` (field `main_screen`)
/// * `Required` (field `main_screen`) when unsetting while screens remain
/// * `Required` / `LengthExceeded` (field `title`)
pub fn update_project(
    conn: &mut Connection,
    project_id: Uuid,
    patch: &ProjectPatch,
) -> Result<Project> {
    log_op_start!("update_project", project_id = %project_id);
    instrumented("update_project", || {
        let tx = write_tx(conn)?;
        let mut project = ProjectRepo::require(&tx, project_id)?;

        if let Some(title) = &patch.title {
            project.title = title.clone();
        }
        if let Some(description) = &patch.description {
            project.description = description.clone();
        }
        validation::validate_project(&mut project)?;

        match patch.main_screen {
            None => {}
            Some(Some(element_id)) => {
                let element = ElementRepo::require(&tx, element_id)
                    .map_err(|e| e.with_field("main_screen"))?;
                if element.project_id != project_id {
                    return Err(ExError::from(AppCanvasError::ElementNotOwnedByProject {
                        element_id,
                        project_id,
                    })
                    .with_field("main_screen"));
                }
                if !element.is_screen() {
                    return Err(AppCanvasError::NotAScreen { element_id }.into());
                }
                project.main_screen = Some(element_id);
            }
            Some(None) => {
                if ElementRepo::count_screens(&tx, project_id)? > 0 {
                    return Err(AppCanvasError::MainScreenRequired { project_id }.into());
                }
                project.main_screen = None;
            }
        }

        ProjectRepo::update(&tx, &mut project)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(project)
    })
}

/// Delete a project with everything it owns
///
/// # Errors
/// `NotFound` if no such project exists.
pub fn delete_project(conn: &mut Connection, project_id: Uuid) -> Result<()> {
    log_op_start!("delete_project", project_id = %project_id);
    instrumented("delete_project", || {
        let tx = write_tx(conn)?;
        if !ProjectRepo::delete(&tx, project_id)? {
            return Err(AppCanvasError::ProjectNotFound { project_id }.into());
        }
        tx.commit().map_err(from_rusqlite)
    })
}
