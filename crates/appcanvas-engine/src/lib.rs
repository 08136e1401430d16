//! AppCanvas Engine - the element store's call surface
//!
//! Coordinates core validation and tree planning with the SQLite store.
//! Every write runs in one IMMEDIATE transaction, so validation and the
//! writes it guards see the same snapshot and either all commit or none do.

pub mod commands;
pub mod hooks;

pub use commands::action::{create_action, delete_action, get_action, list_actions, update_action};
pub use commands::element::{
    create_element, create_element_with_hook, delete_element, delete_element_with_hook,
    get_element, save_element, save_element_with_hook,
};
pub use commands::event::{create_event, delete_event, get_event, list_events, update_event};
pub use commands::project::{
    create_project, delete_project, get_project, get_project_main_screen, list_projects,
    update_project,
};
pub use commands::tree::{get_tree, reorder};
pub use hooks::{ElementLifecycleHook, MainScreenKeeper, NoopLifecycleHook};
