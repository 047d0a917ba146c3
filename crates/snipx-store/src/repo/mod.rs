//! Repository layer for persisting snippets to SQLite

mod row;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteSnippetRepo;
