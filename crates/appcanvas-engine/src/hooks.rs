//! Element lifecycle hooks
//!
//! Element writes call these inside their transaction, so whatever a hook
//! writes commits or rolls back together with the element change.
//! `MainScreenKeeper` maintains the project's main screen:
//!
//! * it always points at an existing screen of the project, or is unset
//! * it is unset only while the project has no screen at all

use appcanvas_core::model::{Element, TreeScope};
use appcanvas_store::errors::Result;
use appcanvas_store::repo::{ElementRepo, ProjectRepo};
use appcanvas_store::tree::descendant_ids;
use rusqlite::Connection;
use uuid::Uuid;

/// Hook pair invoked around element creation and deletion
pub trait ElementLifecycleHook {
    /// Called after the element row is inserted
    ///
    /// # Errors
    /// Any error aborts the create.
    fn after_create(&self, conn: &Connection, element: &Element) -> Result<()>;

    /// Called after an element's content fields are rewritten
    ///
    /// # Errors
    /// Any error aborts the save.
    fn after_update(&self, _conn: &Connection, _before: &Element, _after: &Element) -> Result<()> {
        Ok(())
    }

    /// Called before the element row (and its subtree) is deleted
    ///
    /// # Errors
    /// Any error aborts the delete.
    fn before_delete(&self, conn: &Connection, element: &Element) -> Result<()>;
}

/// Keeps `projects.main_screen` valid across element writes
#[derive(Debug, Clone, Copy, Default)]
pub struct MainScreenKeeper;

impl MainScreenKeeper {
    /// Choose a new main screen when the current one goes away
    ///
    /// Prefers the first top-level screen by order; falls back to any other
    /// remaining screen so the field is only unset when none is left.
    fn replacement(conn: &Connection, project_id: Uuid, leaving: &[Uuid]) -> Result<Option<Uuid>> {
        let Some(&first) = leaving.first() else {
            return Ok(None);
        };
        if let Some(id) = ElementRepo::first_top_level_screen(conn, project_id, first)? {
            if !leaving.contains(&id) {
                return Ok(Some(id));
            }
        }
        ElementRepo::first_screen_outside(conn, project_id, leaving)
    }
}

impl ElementLifecycleHook for MainScreenKeeper {
    fn after_create(&self, conn: &Connection, element: &Element) -> Result<()> {
        if !element.is_screen() {
            return Ok(());
        }
        if ProjectRepo::main_screen(conn, element.project_id)?.is_none() {
            ProjectRepo::set_main_screen(conn, element.project_id, Some(element.id))?;
        }
        Ok(())
    }

    fn after_update(&self, conn: &Connection, before: &Element, after: &Element) -> Result<()> {
        let current = ProjectRepo::main_screen(conn, after.project_id)?;

        if after.is_screen() {
            if current.is_none() {
                ProjectRepo::set_main_screen(conn, after.project_id, Some(after.id))?;
            }
        } else if before.is_screen() && current == Some(after.id) {
            let next = Self::replacement(conn, after.project_id, &[after.id])?;
            ProjectRepo::set_main_screen(conn, after.project_id, next)?;
        }
        Ok(())
    }

    fn before_delete(&self, conn: &Connection, element: &Element) -> Result<()> {
        let Some(current) = ProjectRepo::main_screen(conn, element.project_id)? else {
            return Ok(());
        };

        // The cascade removes the whole subtree, so a nested main screen goes too
        let mut leaving = vec![element.id];
        leaving.extend(descendant_ids(conn, TreeScope::Element(element.id))?);
        if !leaving.contains(&current) {
            return Ok(());
        }

        let next = Self::replacement(conn, element.project_id, &leaving)?;
        ProjectRepo::set_main_screen(conn, element.project_id, next)
    }
}

/// Does nothing; storage constraints alone guard the project
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLifecycleHook;

impl ElementLifecycleHook for NoopLifecycleHook {
    fn after_create(&self, _: &Connection, _: &Element) -> Result<()> {
        Ok(())
    }

    fn before_delete(&self, _: &Connection, _: &Element) -> Result<()> {
        Ok(())
    }
}
