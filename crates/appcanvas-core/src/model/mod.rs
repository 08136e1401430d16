pub mod action;
pub mod element;
pub mod element_type;
pub mod event;
pub mod project;
pub mod tree_item;

pub use action::{Action, ActionPayload};
pub use element::{Element, ElementPayload, JsonObject, TreeScope};
pub use element_type::ElementType;
pub use event::{Event, EventPayload};
pub use project::{Project, ProjectPage, ProjectPatch, ProjectPayload};
pub use tree_item::TreeItem;
