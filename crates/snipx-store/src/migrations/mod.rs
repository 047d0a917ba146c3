//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums
//! - Idempotent application, safe when several processes start at once
//! - Embedded SQL migrations

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::{apply_migrations, applied_migrations};
