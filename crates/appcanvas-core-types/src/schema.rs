//! Canonical schema constants for structured logging
//!
//! These constants keep field names identical between the logging macros,
//! the test capture layer and anything that parses the JSON log output.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_PROJECT_ID: &str = "project_id";
pub const FIELD_ELEMENT_ID: &str = "element_id";

// Collection sizes
pub const FIELD_TREE_LEN: &str = "tree_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
