//! Command handlers with boundary logging
//!
//! ## Logging ownership
//!
//! Each public command logs `start` on entry and exactly one of `end` or
//! `end_error` on exit. Store and core only use `tracing::debug!`.

use std::time::Instant;

use appcanvas_core::errors::ExError;
use appcanvas_core::{log_op_end, log_op_error};
use appcanvas_store::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

pub mod action;
pub mod element;
pub mod event;
pub mod project;
pub mod tree;

/// Run a command body and log its outcome
///
/// Errors that do not yet name an operation are tagged with `op`.
pub(crate) fn instrumented<T>(op: &'static str, body: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = body().map_err(|e| tag_op(e, op));
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn tag_op(err: ExError, op: &'static str) -> ExError {
    if err.op().is_none() {
        err.with_op(op)
    } else {
        err
    }
}

/// Begin a write transaction that takes the write lock up front
pub(crate) fn write_tx(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)
}
