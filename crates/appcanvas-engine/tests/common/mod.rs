#![allow(dead_code)]

use appcanvas_core::model::{Element, ElementPayload, ElementType, Project, ProjectPayload};
use appcanvas_engine::{create_element, create_project};
use rusqlite::Connection;
use uuid::Uuid;

pub fn setup_test_db() -> Connection {
    let mut conn = appcanvas_store::db::open_in_memory().expect("in-memory database");
    appcanvas_store::migrations::apply_migrations(&mut conn).expect("migrations");
    conn
}

pub fn project(conn: &mut Connection, title: &str) -> Project {
    create_project(
        conn,
        &ProjectPayload {
            title: Some(title.to_string()),
            description: None,
        },
    )
    .expect("project")
}

pub fn element(
    conn: &mut Connection,
    project_id: Uuid,
    parent_id: Option<Uuid>,
    name: &str,
    element_type: ElementType,
) -> Element {
    create_element(
        conn,
        project_id,
        parent_id,
        &ElementPayload::named(name, element_type),
    )
    .expect("element")
}

pub fn ids(elements: &[Element]) -> Vec<Uuid> {
    elements.iter().map(|e| e.id).collect()
}
