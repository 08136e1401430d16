//! Repositories
//!
//! Stateless unit structs with associated functions over a `&Connection`.
//! Callers that need atomicity pass an open `Transaction`, which derefs to
//! `Connection`.

mod action_repo;
mod element_repo;
mod event_repo;
mod project_repo;
pub(crate) mod rows;

pub use action_repo::ActionRepo;
pub use element_repo::ElementRepo;
pub use event_repo::EventRepo;
pub use project_repo::ProjectRepo;
pub use rows::now;
