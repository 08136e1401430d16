//! Tree shaping: nested assembly of a flat read and reorder planning
//!
//! Both halves are storage independent. The store produces the flat,
//! depth-tagged sequence and applies placements; everything here is pure.

pub mod assemble;
pub mod reorder;

pub use assemble::assemble;
pub use reorder::{plan_placements, validate_desired_tree, Placement};

/// Options for a tree read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Maximum number of levels below the scope (0 = unlimited)
    pub depth: u32,
    /// Return the depth-ordered flat sequence instead of a nested tree
    pub flat: bool,
    /// Column projection by wire name (empty = all columns)
    pub columns: Vec<String>,
    /// Attach each element's events
    pub with_events: bool,
}

impl TreeOptions {
    /// Full, flat, unprojected read; what reorder validates against
    pub fn flat_all() -> Self {
        Self {
            flat: true,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}
