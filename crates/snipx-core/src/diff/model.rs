use serde::Serialize;

/// Text shown when two snippets have identical content
pub const NO_CHANGES: &str = "No changes were made between these two snippets.";

/// Outcome of comparing two snippets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnippetDiff {
    /// Raw contents are identical
    NoChanges,
    /// Raw contents differ
    Changed {
        /// Plain unified diff text
        unified: String,
        /// `unified` highlighted with the diff lexer
        rendered: String,
    },
}

impl SnippetDiff {
    pub fn is_changed(&self) -> bool {
        matches!(self, SnippetDiff::Changed { .. })
    }

    /// Highlighted diff, or the [`NO_CHANGES`] sentinel
    pub fn rendered_text(&self) -> &str {
        match self {
            SnippetDiff::NoChanges => NO_CHANGES,
            SnippetDiff::Changed { rendered, .. } => rendered,
        }
    }

    /// Unified diff text, or the [`NO_CHANGES`] sentinel
    pub fn unified_text(&self) -> &str {
        match self {
            SnippetDiff::NoChanges => NO_CHANGES,
            SnippetDiff::Changed { unified, .. } => unified,
        }
    }
}
