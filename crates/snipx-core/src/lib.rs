//! snipx Core - snippet lineage and rendering kernel
//!
//! This crate provides the domain model and pure operations of snipx:
//! - Snippet and Scope models
//! - Short code generation with bounded collision retry
//! - Deterministic syntax highlighting and lexer guessing
//! - Fork-tree traversal (root lookup, pre-order tree)
//! - Unified diffs between snippets of one scope
//!
//! Persistence is abstracted behind [`ops::SnippetRepository`]; the
//! SQLite implementation lives in `snipx-store`.

pub mod diff;
pub mod errors;
pub mod highlight;
pub mod ident;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;
pub mod scope;
pub mod traversal;

pub use snipx_core_types as core_types;

// Re-export commonly used types
pub use diff::{diff_snippets, SnippetDiff};
pub use errors::{ExError, ExErrorKind, Result, SnipError};
pub use highlight::Highlighter;
pub use ident::{RandomShortCodes, ShortCodeSource};
pub use model::{ForkTemplate, Scope, ScopeKind, Snippet, SnippetRecord};
pub use ops::{MemoryRepo, SnippetRepository};
pub use rules::CreatePolicy;
pub use scope::{GlobalOnly, ScopeRequest, ScopeResolver, StaticScopes};
