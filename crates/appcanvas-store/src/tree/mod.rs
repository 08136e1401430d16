//! Recursive tree reads and the reorder apply step

pub mod apply;
pub mod query;

pub use apply::apply_placements;
pub use query::{descendant_ids, events_in_scope, read_flat, Projection};
