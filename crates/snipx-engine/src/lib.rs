//! snipx Engine - Orchestration layer
//!
//! Provides the request-level operations of snipx (create, lookup, tree,
//! diff, lexer guess and listing), coordinating core domain logic with the
//! SQLite store, plus configuration loading.

pub mod commands;
pub mod config;

pub use commands::EngineContext;
pub use config::SnipxConfig;
