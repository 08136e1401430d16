//! Subcommand implementations
//!
//! Every command opens the store, brings the schema up to date and prints
//! its result as JSON on stdout.

use appcanvas_core::model::JsonObject;
use appcanvas_store::db::{self, StoreOptions};
use appcanvas_store::migrations::apply_migrations;
use rusqlite::Connection;
use serde::Serialize;

pub mod action;
pub mod element;
pub mod project;
pub mod tree;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database at `path` with migrations applied
pub fn open_store(path: &str) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut conn = db::open(path, &StoreOptions::default())?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// Execute init
pub fn init(path: &str) -> CliResult {
    let conn = open_store(path)?;
    let applied = appcanvas_store::migrations::applied_migrations(&conn)?;
    print_json(&serde_json::json!({ "db": path, "migrations": applied }))
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a `--attributes` / `--styles` / `--data` argument
pub fn parse_object(raw: Option<&str>) -> Result<Option<JsonObject>, Box<dyn std::error::Error>> {
    match raw {
        None => Ok(None),
        Some(text) => match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Object(map) => Ok(Some(map)),
            _ => Err(format!("expected a JSON object, got: {}", text).into()),
        },
    }
}
