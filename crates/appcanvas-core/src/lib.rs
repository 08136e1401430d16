//! AppCanvas Core - domain kernel for the element tree
//!
//! This crate provides the storage-independent parts of the element store:
//! - Element, Project, Action and Event models
//! - The element type registry (wire name <-> stored code)
//! - Tree items, the recursive shape accepted by reorder
//! - Nested tree assembly from a depth-ordered flat read
//! - Reorder validation (completeness and membership diff)
//! - Payload validation with field-tagged errors
//! - The error and logging facilities shared by every layer

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod tree;

pub use appcanvas_core_types as core_types;

// Re-export commonly used types
pub use errors::{AppCanvasError, ExError, ExErrorKind, Result};
pub use model::{
    Action, Element, ElementPayload, ElementType, Event, Project, TreeItem, TreeScope,
};
pub use tree::TreeOptions;
