//! Tree Reader
//!
//! One recursive CTE walks the scope's subtree a level at a time, tagging
//! each row with its depth and a sort path built from `(order_index, id)`
//! segments. Rows come back ordered by `(depth, path)`: a parent precedes
//! its descendants and every sibling group is contiguous and ascending.
//!
//! Path segments compare as text, so `order_index` is zero-padded to 19
//! digits, enough for any non-negative `i64`. The schema rejects negative
//! indices.

use appcanvas_core::errors::AppCanvasError;
use appcanvas_core::model::{Element, Event, TreeScope};
use appcanvas_core::tree::TreeOptions;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::errors::{from_rusqlite, Result};
use crate::repo::rows::{self, element_from_row, event_from_row};

/// Columns a projection may name, by wire name, with their storage column
/// and the literal selected in their place when left out
const PROJECTABLE: [(&str, &str, &str); 7] = [
    ("name", "name", "''"),
    ("type", "element_type", "0"),
    ("attributes", "attributes", "'{}'"),
    ("styles", "styles", "'{}'"),
    ("is_visible", "is_visible", "1"),
    ("created_at", "created_at", "0"),
    ("updated_at", "updated_at", "0"),
];

/// Always selected; the tree cannot be assembled without them
const STRUCTURAL: [&str; 4] = ["id", "project_id", "parent_id", "order_index"];

/// Validated column selection for a tree read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    select: String,
}

impl Projection {
    /// Build the select list for `columns` (empty = everything)
    ///
    /// # Errors
    /// `InvalidInput` (field `columns`) naming the first unknown column.
    pub fn new(columns: &[String]) -> Result<Self> {
        for column in columns {
            let known = STRUCTURAL.contains(&column.as_str())
                || PROJECTABLE.iter().any(|(wire, _, _)| wire == column);
            if !known {
                return Err(AppCanvasError::UnknownColumn {
                    column: column.clone(),
                }
                .into());
            }
        }

        let mut select: Vec<String> = STRUCTURAL.iter().map(|c| format!("e.{}", c)).collect();
        for (wire, column, fallback) in PROJECTABLE {
            if columns.is_empty() || columns.iter().any(|c| c == wire) {
                select.push(format!("e.{}", column));
            } else {
                select.push(format!("{} AS {}", fallback, column));
            }
        }

        Ok(Self {
            select: select.join(", "),
        })
    }
}

/// The recursive part shared by every tree query
///
/// Binds `?1` = scope id, `?2` = depth limit (0 = unlimited).
fn tree_cte(scope: TreeScope) -> String {
    let roots = match scope {
        TreeScope::Project(_) => "project_id = ?1 AND parent_id IS NULL",
        TreeScope::Element(_) => "parent_id = ?1",
    };
    format!(
        "WITH RECURSIVE tree(id, depth, sort_path) AS (
            SELECT id, 1, printf('%019d:%s/', order_index, id)
            FROM elements WHERE {roots}
            UNION ALL
            SELECT c.id, tree.depth + 1,
                   tree.sort_path || printf('%019d:%s/', c.order_index, c.id)
            FROM elements c JOIN tree ON c.parent_id = tree.id
            WHERE ?2 = 0 OR tree.depth < ?2
        )"
    )
}

/// Read the subtree under `scope` as a flat, depth-tagged sequence
///
/// Honours `depth` and `columns` from `options`; `flat` and `with_events`
/// are left to the caller. An empty scope yields an empty vector.
///
/// # Errors
/// `InvalidInput` for an unknown projection column, `Persistence` otherwise.
pub fn read_flat(conn: &Connection, scope: TreeScope, options: &TreeOptions) -> Result<Vec<Element>> {
    let projection = Projection::new(&options.columns)?;
    let sql = format!(
        "{cte}
        SELECT {cols}, tree.depth
        FROM tree JOIN elements e ON e.id = tree.id
        ORDER BY tree.depth, tree.sort_path",
        cte = tree_cte(scope),
        cols = projection.select,
    );

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let elements = stmt
        .query_map(params![scope.id().to_string(), options.depth], |row| {
            let mut element = element_from_row(row)?;
            element.depth = row.get(11)?;
            Ok(element)
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    tracing::debug!(scope = %scope, depth = options.depth, rows = elements.len(), "tree read");
    Ok(elements)
}

/// Ids of every descendant of `scope`, in tree-read order
pub fn descendant_ids(conn: &Connection, scope: TreeScope) -> Result<Vec<Uuid>> {
    let sql = format!(
        "{cte} SELECT id FROM tree ORDER BY depth, sort_path",
        cte = tree_cte(scope)
    );
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let ids = stmt
        .query_map(params![scope.id().to_string(), 0_u32], |row| {
            rows::uuid_col(row, 0)
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

/// Events owned by elements in the (depth-limited) subtree under `scope`
pub fn events_in_scope(conn: &Connection, scope: TreeScope, depth: u32) -> Result<Vec<Event>> {
    let sql = format!(
        "{cte}
        SELECT ev.id, ev.element_id, ev.action_id, ev.event, ev.created_at, ev.updated_at
        FROM events ev JOIN tree ON ev.element_id = tree.id
        ORDER BY ev.created_at, ev.id",
        cte = tree_cte(scope)
    );
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let events = stmt
        .query_map(params![scope.id().to_string(), depth], event_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use appcanvas_core::errors::ExErrorKind;

    #[test]
    fn test_projection_keeps_structural_columns() {
        let p = Projection::new(&["name".to_string()]).unwrap();
        assert!(p.select.starts_with("e.id, e.project_id, e.parent_id, e.order_index"));
        assert!(p.select.contains("e.name"));
        assert!(p.select.contains("'{}' AS styles"));
        assert!(p.select.contains("0 AS element_type"));
    }

    #[test]
    fn test_projection_maps_type_to_storage_column() {
        let p = Projection::new(&["type".to_string()]).unwrap();
        assert!(p.select.contains("e.element_type"));
        assert!(p.select.contains("'' AS name"));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let err = Projection::new(&["password".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("columns"));
    }

    #[test]
    fn test_empty_projection_selects_everything() {
        let p = Projection::new(&[]).unwrap();
        assert!(!p.select.contains(" AS "));
    }
}
