//! Store error helpers
//!
//! Everything leaving the store is an `ExError`. SQLite failures become
//! `Persistence` errors except constraint violations. A foreign-key violation
//! means a reference crossed a project boundary or pointed at a row that no
//! longer exists; a CHECK violation means a value the schema forbids.

use appcanvas_core::errors::{ExError, ExErrorKind};
use rusqlite::ffi;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    if is_constraint_violation(&err) {
        return ExError::new(ExErrorKind::ConstraintViolation)
            .with_op("sqlite")
            .with_message(err.to_string());
    }
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a failed element write, turning FK violations into an ownership error
///
/// Used where the only foreign key that can fail is the composite
/// `(parent_id, project_id)` reference, i.e. the parent lives in another
/// project or no longer exists.
pub fn element_write_error(
    err: rusqlite::Error,
    element_id: &str,
    project_id: &str,
) -> ExError {
    if is_foreign_key_violation(&err) {
        return ExError::new(ExErrorKind::ElementNotOwnedByProject)
            .with_entity_id(element_id)
            .with_message(format!(
                "Element {} is not owned by project {}",
                element_id, project_id
            ));
    }
    from_rusqlite(err)
}

/// True for any `SQLITE_CONSTRAINT_*` failure
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// True for `SQLITE_CONSTRAINT_FOREIGNKEY`
pub fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Create a serialization error for a JSON column
pub fn serialization_error(column: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_field(column)
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
