//! Reorder apply step
//!
//! Writes one `(parent_id, order_index)` pair per placement. The caller runs
//! this inside the same write transaction that validated the placements, so
//! any failure here rolls the whole reorder back.

use appcanvas_core::errors::{AppCanvasError, ExError};
use appcanvas_core::tree::Placement;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::errors::{element_write_error, Result};
use crate::repo::rows::opt_uuid_text;

/// Move every placed element to its new parent and position
///
/// Rows are matched on `(id, project_id)`: an element that vanished or lives
/// in another project updates nothing and fails the call. `updated_at` is
/// left alone, so an identity reorder leaves rows byte-for-byte unchanged.
///
/// # Errors
/// `ElementNotOwnedByProject` for a missing/foreign element or parent.
pub fn apply_placements(
    conn: &Connection,
    project_id: Uuid,
    placements: &[Placement],
) -> Result<()> {
    let mut stmt = conn
        .prepare_cached(
            "UPDATE elements SET parent_id = ?1, order_index = ?2
             WHERE id = ?3 AND project_id = ?4",
        )
        .map_err(crate::errors::from_rusqlite)?;

    let project = project_id.to_string();
    for placement in placements {
        let element = placement.element_id.to_string();
        let changed = stmt
            .execute(params![
                opt_uuid_text(placement.parent_id),
                placement.order_index,
                element,
                project,
            ])
            .map_err(|e| element_write_error(e, &element, &project))?;

        if changed == 0 {
            return Err(ExError::from(AppCanvasError::ElementNotOwnedByProject {
                element_id: placement.element_id,
                project_id,
            }));
        }
    }

    tracing::debug!(project_id = %project_id, moved = placements.len(), "applied placements");
    Ok(())
}
