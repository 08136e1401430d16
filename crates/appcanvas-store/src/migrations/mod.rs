//! Migration framework
//!
//! Embedded SQL, applied once each in order and recorded with a checksum.

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, applied_migrations};
