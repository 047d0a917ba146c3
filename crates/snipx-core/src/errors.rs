use thiserror::Error;

/// Result type alias using SnipError
pub type Result<T> = std::result::Result<T, SnipError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in snipx. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and responses at the outer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,
    MissingSelection,

    // Structural/Validation
    InvalidInput,
    InvalidParent,
    ScopeMismatch,
    LineageCorrupt,

    // Identifier allocation
    ShortCodeTaken,
    CapacityExhausted,

    // Integration/IO
    Io,
    Configuration,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MissingSelection => "ERR_MISSING_SELECTION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidParent => "ERR_INVALID_PARENT",
            ExErrorKind::ScopeMismatch => "ERR_SCOPE_MISMATCH",
            ExErrorKind::LineageCorrupt => "ERR_LINEAGE_CORRUPT",
            ExErrorKind::ShortCodeTaken => "ERR_SHORT_CODE_TAKEN",
            ExErrorKind::CapacityExhausted => "ERR_CAPACITY_EXHAUSTED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether errors of this kind are caused by caller input and can be shown
    /// to the user verbatim.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ExErrorKind::NotFound
                | ExErrorKind::MissingSelection
                | ExErrorKind::InvalidInput
                | ExErrorKind::InvalidParent
                | ExErrorKind::ScopeMismatch
                | ExErrorKind::CapacityExhausted
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, snippet
/// identity, scope) for programmatic handling and debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    snippet_id: Option<i64>,
    short_code: Option<String>,
    scope: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            snippet_id: None,
            short_code: None,
            scope: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add snippet id context
    pub fn with_snippet_id(mut self, id: i64) -> Self {
        self.snippet_id = Some(id);
        self
    }

    /// Add short code context
    pub fn with_short_code(mut self, code: impl Into<String>) -> Self {
        self.short_code = Some(code.into());
        self
    }

    /// Add scope context
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the snippet id context, if any
    pub fn snippet_id(&self) -> Option<i64> {
        self.snippet_id
    }

    /// Get the short code context, if any
    pub fn short_code(&self) -> Option<&str> {
        self.short_code.as_deref()
    }

    /// Get the scope context, if any
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(id) = self.snippet_id {
            write!(f, " (snippet_id: {})", id)?;
        }
        if let Some(code) = &self.short_code {
            write!(f, " (short_code: {})", code)?;
        }
        if let Some(scope) = &self.scope {
            write!(f, " (scope: {})", scope)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for snippet operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnipError {
    // ===== Lookup Errors =====
    /// No snippet with this short code in the scope
    #[error("Snippet not found: {short_code} in scope {scope}")]
    ShortCodeNotFound { scope: String, short_code: String },

    /// No snippet with this id in the scope
    #[error("Snippet not found: id {snippet_id} in scope {scope}")]
    SnippetNotFound { scope: String, snippet_id: i64 },

    /// The requested group scope is unknown to the resolver
    #[error("Scope not found: {scope}")]
    ScopeNotFound { scope: String },

    /// A diff was requested without two usable selections
    #[error("You must select two snippets: {reason}")]
    MissingSelection { reason: String },

    // ===== Structural Errors =====
    /// Parent does not exist, or lives in another scope
    #[error("Invalid parent {parent} for scope {scope}")]
    InvalidParent { parent: String, scope: String },

    /// Two snippets from different scopes were compared
    #[error("Cannot compare snippet {left_id} ({left_scope}) with snippet {right_id} ({right_scope})")]
    ScopeMismatch {
        left_id: i64,
        left_scope: String,
        right_id: i64,
        right_scope: String,
    },

    /// Parent chain revisits a node or exceeds the depth bound
    #[error("Lineage of snippet {snippet_id} is corrupt: {reason}")]
    LineageCorrupt { snippet_id: i64, reason: String },

    // ===== Validation Errors =====
    /// Caller input rejected before anything was written
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ===== Identifier Errors =====
    /// The persistence layer rejected a duplicate (scope, short code) pair
    #[error("Short code {short_code} is already taken in scope {scope}")]
    ShortCodeTaken { scope: String, short_code: String },

    /// Every generated short code collided
    #[error("No free short code in scope {scope} after {attempts} attempts")]
    CapacityExhausted { scope: String, attempts: u32 },

    // ===== Generic Errors =====
    /// Persistence layer failure, passed through uninterpreted
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SnipError {
    /// Shorthand for a validation failure on `field`
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SnipError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Conversion from SnipError to ExError
impl From<SnipError> for ExError {
    fn from(err: SnipError) -> Self {
        let message = err.to_string();
        match err {
            SnipError::ShortCodeNotFound { scope, short_code } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_short_code(short_code)
                    .with_scope(scope)
                    .with_message(message)
            }

            SnipError::SnippetNotFound { scope, snippet_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_snippet_id(snippet_id)
                    .with_scope(scope)
                    .with_message(message)
            }

            SnipError::ScopeNotFound { scope } => ExError::new(ExErrorKind::NotFound)
                .with_op("resolve_scope")
                .with_scope(scope)
                .with_message(message),

            SnipError::MissingSelection { .. } => {
                ExError::new(ExErrorKind::MissingSelection).with_message(message)
            }

            SnipError::InvalidParent { scope, .. } => ExError::new(ExErrorKind::InvalidParent)
                .with_scope(scope)
                .with_message(message),

            SnipError::ScopeMismatch { left_id, .. } => ExError::new(ExErrorKind::ScopeMismatch)
                .with_op("diff")
                .with_snippet_id(left_id)
                .with_message(message),

            SnipError::LineageCorrupt { snippet_id, .. } => {
                ExError::new(ExErrorKind::LineageCorrupt)
                    .with_snippet_id(snippet_id)
                    .with_message(message)
            }

            SnipError::Validation { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            SnipError::ShortCodeTaken { scope, short_code } => {
                ExError::new(ExErrorKind::ShortCodeTaken)
                    .with_short_code(short_code)
                    .with_scope(scope)
                    .with_message(message)
            }

            SnipError::CapacityExhausted { scope, .. } => {
                ExError::new(ExErrorKind::CapacityExhausted)
                    .with_op("allocate_short_code")
                    .with_scope(scope)
                    .with_message(message)
            }

            SnipError::Persistence { .. } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            SnipError::Internal { .. } => ExError::new(ExErrorKind::Internal).with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::InvalidParent, "ERR_INVALID_PARENT"),
            (ExErrorKind::CapacityExhausted, "ERR_CAPACITY_EXHAUSTED"),
            (ExErrorKind::ScopeMismatch, "ERR_SCOPE_MISMATCH"),
            (ExErrorKind::MissingSelection, "ERR_MISSING_SELECTION"),
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_collision_maps_to_short_code_taken() {
        let err: ExError = SnipError::ShortCodeTaken {
            scope: "global".into(),
            short_code: "abcd".into(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::ShortCodeTaken);
        assert_eq!(err.short_code(), Some("abcd"));
        assert!(!err.kind().is_user_facing());
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("snippet_get")
            .with_short_code("Xy12")
            .with_message("gone");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_NOT_FOUND] in operation 'snippet_get': gone"));
        assert!(text.contains("(short_code: Xy12)"));
    }
}
