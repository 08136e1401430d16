//! AppCanvas Store - SQLite persistence for projects and element trees
//!
//! Provides:
//! - Connection setup (foreign keys, busy timeout, WAL)
//! - Checksummed embedded migrations
//! - Repositories for projects, elements, actions and events
//! - The recursive tree read and the reorder apply step
//!
//! Functions take a `&Connection`; write paths are handed the open
//! transaction (which derefs to `Connection`) by the engine.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod tree;

pub use db::StoreOptions;
pub use errors::Result;
