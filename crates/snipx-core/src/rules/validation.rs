use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnipError};
use crate::ident::DEFAULT_SHORT_CODE_LENGTH;

pub const MAX_TITLE_CHARS: usize = 120;
pub const MAX_AUTHOR_CHARS: usize = 30;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 256 * 1024;

/// Knobs governing snippet creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePolicy {
    /// Length of generated short codes
    pub short_code_length: usize,
    /// Short codes tried before giving up with `CapacityExhausted`
    pub max_attempts: u32,
    /// Upper bound on raw content size
    pub max_content_bytes: usize,
}

impl Default for CreatePolicy {
    fn default() -> Self {
        Self {
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

impl CreatePolicy {
    /// Reject settings under which creation could never succeed
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a zero length, attempt count, or size bound.
    pub fn validate(&self) -> Result<()> {
        if self.short_code_length == 0 {
            return Err(SnipError::validation(
                "short_code_length",
                "must be at least 1",
            ));
        }
        if self.max_attempts == 0 {
            return Err(SnipError::validation("max_attempts", "must be at least 1"));
        }
        if self.max_content_bytes == 0 {
            return Err(SnipError::validation(
                "max_content_bytes",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Content must be non-blank and within the size bound
///
/// # Errors
///
/// Returns `Validation` for blank or oversized content.
pub fn validate_content(raw: &str, policy: &CreatePolicy) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(SnipError::validation("content", "must not be empty"));
    }
    if raw.len() > policy.max_content_bytes {
        return Err(SnipError::validation(
            "content",
            format!(
                "{} bytes exceeds the limit of {} bytes",
                raw.len(),
                policy.max_content_bytes
            ),
        ));
    }
    Ok(())
}

/// # Errors
///
/// Returns `Validation` when the title is longer than [`MAX_TITLE_CHARS`].
pub fn validate_title(title: Option<&str>) -> Result<()> {
    validate_optional_text("title", title, MAX_TITLE_CHARS)
}

/// # Errors
///
/// Returns `Validation` when the author is longer than [`MAX_AUTHOR_CHARS`].
pub fn validate_author(author: Option<&str>) -> Result<()> {
    validate_optional_text("author", author, MAX_AUTHOR_CHARS)
}

fn validate_optional_text(field: &str, value: Option<&str>, max_chars: usize) -> Result<()> {
    match value {
        Some(text) if text.chars().count() > max_chars => Err(SnipError::validation(
            field,
            format!("longer than {} characters", max_chars),
        )),
        _ => Ok(()),
    }
}

/// Trim optional free text; blank becomes `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
