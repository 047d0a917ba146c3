//! snipx Store - SQLite persistence for snippets
//!
//! Provides:
//! - Connection setup tuned for several concurrent writers
//! - Embedded, checksummed schema migrations
//! - [`SqliteSnippetRepo`], the SQLite implementation of the core
//!   repository trait

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteSnippetRepo;
