//! Snippet diff engine.
//!
//! Compares the raw content of two snippets from the same scope and produces
//! a unified diff, highlighted with the `diff` lexer.
//!
//! ## Entry point
//!
//! ```ignore
//! use snipx_core::diff::diff_snippets;
//!
//! let diff = diff_snippets(&older, &newer, &Highlighter::new())?;
//! println!("{}", diff.rendered_text());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce byte-identical output.
//! - **Order sensitivity**: `diff(a, b)` and `diff(b, a)` differ whenever the
//!   contents differ; `a` is always labelled `Original`.
//! - **Equal content**: yields [`SnippetDiff::NoChanges`], never an empty diff.
//! - **Unequal content**: always has at least one hunk. Line terminators are
//!   part of each line, and a last line without `\n` is followed by
//!   `\ No newline at end of file`.
//! - **Scope isolation**: snippets from different scopes are never compared.

pub mod engine;
pub mod model;

pub use engine::{
    diff_snippets, unified_diff, CONTEXT_LINES, CURRENT_LABEL, NO_NEWLINE_MARKER,
    ORIGINAL_LABEL,
};
pub use model::{SnippetDiff, NO_CHANGES};
