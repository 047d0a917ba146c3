//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_SNIPPET_ID: &str = "snippet_id";
pub const FIELD_SHORT_CODE: &str = "short_code";
pub const FIELD_SCOPE: &str = "scope";
pub const FIELD_LEXER: &str = "lexer";

// Collection sizes
pub const FIELD_TREE_LEN: &str = "tree_len";
pub const FIELD_ATTEMPTS: &str = "attempts";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
