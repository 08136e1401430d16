//! Structured logging facility
//!
//! One initialization point (`init(profile)`), three boundary macros
//! (`log_op_start!`, `log_op_end!`, `log_op_error!`) and an in-memory capture
//! layer for tests. Only the engine emits boundary events; the store logs
//! at debug level inside a command's span.
//!
//! ```rust
//! use appcanvas_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, request_span, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
