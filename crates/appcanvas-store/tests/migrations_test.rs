// Integration tests for the migration framework

use appcanvas_store::migrations;
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    migrations::apply_migrations(&mut conn).unwrap();

    assert_eq!(
        table_names(&conn),
        vec!["actions", "elements", "events", "projects", "schema_version"]
    );
}

#[test]
fn test_reapplying_is_a_no_op() {
    let mut conn = setup_test_db();
    migrations::apply_migrations(&mut conn).unwrap();
    migrations::apply_migrations(&mut conn).unwrap();

    assert_eq!(migrations::applied_migrations(&conn).unwrap().len(), 1);
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let mut conn = appcanvas_store::db::open(&path, &Default::default()).unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
    }

    let mut conn = appcanvas_store::db::open(&path, &Default::default()).unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    assert_eq!(
        migrations::applied_migrations(&conn).unwrap(),
        vec!["001_initial_schema".to_string()]
    );
}
