//! Error handling for snipx-store
//!
//! Connection and migration helpers return core `ExError`; the repository
//! speaks the core `SnipError` of the trait it implements.

use snipx_core::errors::{ExError, ExErrorKind, SnipError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error, keeping the SQLite failure as its source
pub fn migration_error(migration_id: &str, cause: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, cause))
        .with_source(from_rusqlite(cause))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Whether `err` is a violation of a UNIQUE index
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Map a rusqlite failure into the repository error space
pub fn persistence(err: rusqlite::Error) -> SnipError {
    SnipError::Persistence {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rusqlite_is_persistence() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
    }

    #[test]
    fn test_migration_error_keeps_sqlite_source() {
        let err = migration_error("001_init", rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(err.op(), Some("migration"));
        assert!(err.message().starts_with("Migration 001_init failed"));
        assert_eq!(err.source_error().and_then(|s| s.op()), Some("sqlite"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_other_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&rusqlite::Error::QueryReturnedNoRows));
    }
}
