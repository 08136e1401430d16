//! Column codecs shared by the repositories and the tree reader
//!
//! UUIDs are stored as TEXT, timestamps as INTEGER milliseconds since the
//! epoch, documents as JSON TEXT.

use appcanvas_core::model::{Action, Element, ElementType, Event, JsonObject, Project};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use serde_json::Value;
use uuid::Uuid;

/// Element columns in the order `element_from_row` expects
pub(crate) const ELEMENT_COLUMNS: &str = "id, project_id, parent_id, order_index, name, \
     element_type, attributes, styles, is_visible, created_at, updated_at";

pub(crate) const PROJECT_COLUMNS: &str =
    "id, title, description, main_screen, created_at, updated_at";

pub(crate) const ACTION_COLUMNS: &str =
    "id, project_id, name, action, data, created_at, updated_at";

pub(crate) const EVENT_COLUMNS: &str =
    "id, element_id, action_id, event, created_at, updated_at";

/// Current time at storage precision
///
/// Entities are stamped with this before a write so the value held by the
/// caller equals what a later read returns.
pub fn now() -> DateTime<Utc> {
    from_millis(Utc::now().timestamp_millis()).unwrap_or_else(Utc::now)
}

fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

fn conversion_error(idx: usize, ty: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, message.into())
}

pub(crate) fn uuid_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| conversion_error(idx, Type::Text, format!("invalid uuid {:?}: {}", text, e)))
}

pub(crate) fn opt_uuid_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        Uuid::parse_str(&t)
            .map_err(|e| conversion_error(idx, Type::Text, format!("invalid uuid {:?}: {}", t, e)))
    })
    .transpose()
}

pub(crate) fn ts_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    from_millis(ms)
        .ok_or_else(|| conversion_error(idx, Type::Integer, format!("timestamp out of range: {}", ms)))
}

pub(crate) fn object_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<JsonObject> {
    match row.get::<_, Value>(idx)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonObject::new()),
        other => Err(conversion_error(
            idx,
            Type::Text,
            format!("expected a JSON object, found {}", other),
        )),
    }
}

/// Encode a document for a JSON column
pub(crate) fn object_value(map: &JsonObject) -> Value {
    Value::Object(map.clone())
}

pub(crate) fn opt_uuid_text(id: Option<Uuid>) -> Option<String> {
    id.map(|u| u.to_string())
}

/// Map a row selected with `ELEMENT_COLUMNS`
pub(crate) fn element_from_row(row: &Row<'_>) -> rusqlite::Result<Element> {
    let code: i16 = row.get(5)?;
    let visible: i64 = row.get(8)?;
    Ok(Element {
        id: uuid_col(row, 0)?,
        project_id: uuid_col(row, 1)?,
        parent_id: opt_uuid_col(row, 2)?,
        order_index: row.get(3)?,
        name: row.get(4)?,
        element_type: ElementType::from_code(code),
        attributes: object_col(row, 6)?,
        styles: object_col(row, 7)?,
        is_visible: visible != 0,
        created_at: ts_col(row, 9)?,
        updated_at: ts_col(row, 10)?,
        depth: 0,
        children: Vec::new(),
        events: None,
    })
}

pub(crate) fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: uuid_col(row, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        main_screen: opt_uuid_col(row, 3)?,
        created_at: ts_col(row, 4)?,
        updated_at: ts_col(row, 5)?,
    })
}

pub(crate) fn action_from_row(row: &Row<'_>) -> rusqlite::Result<Action> {
    Ok(Action {
        id: uuid_col(row, 0)?,
        project_id: uuid_col(row, 1)?,
        name: row.get(2)?,
        action: row.get(3)?,
        data: object_col(row, 4)?,
        created_at: ts_col(row, 5)?,
        updated_at: ts_col(row, 6)?,
    })
}

pub(crate) fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: uuid_col(row, 0)?,
        element_id: uuid_col(row, 1)?,
        action_id: uuid_col(row, 2)?,
        event: row.get(3)?,
        created_at: ts_col(row, 4)?,
        updated_at: ts_col(row, 5)?,
    })
}
