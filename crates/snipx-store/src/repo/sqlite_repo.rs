//! SQLite repository implementation

use rusqlite::{params, Connection, OptionalExtension};
use snipx_core::errors::{Result, SnipError};
use snipx_core::model::{Scope, Snippet, SnippetRecord};
use snipx_core::ops::SnippetRepository;

use crate::errors::{is_unique_violation, persistence};
use crate::repo::row::{to_millis, SnippetRow, SNIPPET_COLUMNS};

/// SQLite-backed [`SnippetRepository`]
///
/// Borrows a configured, migrated connection. Uniqueness of short codes is
/// enforced by the `(scope_kind, scope_id, short_code)` index, so competing
/// writers on other connections are detected at insert time.
pub struct SqliteSnippetRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSnippetRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query_one(&self, sql: &str, params: impl rusqlite::Params) -> Result<Option<Snippet>> {
        self.conn
            .query_row(sql, params, SnippetRow::from_row)
            .optional()
            .map_err(persistence)?
            .map(SnippetRow::into_snippet)
            .transpose()
    }

    fn query_many(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Snippet>> {
        let mut stmt = self.conn.prepare(sql).map_err(persistence)?;
        let rows = stmt
            .query_map(params, SnippetRow::from_row)
            .map_err(persistence)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(persistence)?;
        rows.into_iter().map(SnippetRow::into_snippet).collect()
    }
}

impl SnippetRepository for SqliteSnippetRepo<'_> {
    fn insert(&mut self, record: SnippetRecord) -> Result<Snippet> {
        let (scope_kind, scope_id) = record.scope.storage_key();
        let inserted = self.conn.execute(
            "INSERT INTO snippets (short_code, scope_kind, scope_id, title, author, raw_content,
                                   rendered_content, lexer, published_at, expires_at, parent_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.short_code,
                scope_kind,
                scope_id,
                record.title,
                record.author,
                record.raw_content,
                record.rendered_content,
                record.lexer,
                to_millis(record.published_at),
                record.expires_at.map(to_millis),
                record.parent_id,
            ],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                tracing::debug!(snippet_id = id, short_code = %record.short_code, "inserted snippet");
                Ok(record.into_snippet(id))
            }
            Err(err) if is_unique_violation(&err) => Err(SnipError::ShortCodeTaken {
                scope: record.scope.to_string(),
                short_code: record.short_code,
            }),
            Err(err) => Err(persistence(err)),
        }
    }

    fn get_by_id(&self, scope: &Scope, id: i64) -> Result<Option<Snippet>> {
        let (kind, scope_id) = scope.storage_key();
        self.query_one(
            &format!(
                "SELECT {} FROM snippets WHERE id = ?1 AND scope_kind = ?2 AND scope_id = ?3",
                SNIPPET_COLUMNS
            ),
            params![id, kind, scope_id],
        )
    }

    fn get_by_short_code(&self, scope: &Scope, short_code: &str) -> Result<Option<Snippet>> {
        let (kind, scope_id) = scope.storage_key();
        self.query_one(
            &format!(
                "SELECT {} FROM snippets
                 WHERE short_code = ?1 AND scope_kind = ?2 AND scope_id = ?3",
                SNIPPET_COLUMNS
            ),
            params![short_code, kind, scope_id],
        )
    }

    fn children_of(&self, scope: &Scope, parent_id: i64) -> Result<Vec<Snippet>> {
        let (kind, scope_id) = scope.storage_key();
        self.query_many(
            &format!(
                "SELECT {} FROM snippets
                 WHERE parent_id = ?1 AND scope_kind = ?2 AND scope_id = ?3
                 ORDER BY id ASC",
                SNIPPET_COLUMNS
            ),
            params![parent_id, kind, scope_id],
        )
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM snippets WHERE id = ?1", [id])
            .map_err(persistence)?;
        Ok(removed > 0)
    }

    fn list_recent(&self, scope: &Scope, limit: usize) -> Result<Vec<Snippet>> {
        let (kind, scope_id) = scope.storage_key();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query_many(
            &format!(
                "SELECT {} FROM snippets
                 WHERE scope_kind = ?1 AND scope_id = ?2
                 ORDER BY published_at DESC, id DESC
                 LIMIT ?3",
                SNIPPET_COLUMNS
            ),
            params![kind, scope_id, limit],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_store_in_memory;
    use chrono::{SubsecRound, Utc};
    use snipx_core::model::ScopeKind;

    fn record(code: &str, scope: Scope) -> SnippetRecord {
        SnippetRecord {
            short_code: code.to_string(),
            scope,
            title: Some("t".to_string()),
            author: None,
            raw_content: "print('hi')".to_string(),
            rendered_content: "<span>print</span>".to_string(),
            lexer: "python".to_string(),
            published_at: Utc::now().trunc_subsecs(3),
            expires_at: None,
            parent_id: None,
        }
    }

    #[test]
    fn test_insert_and_read_back() {
        let conn = open_store_in_memory().unwrap();
        let mut repo = SqliteSnippetRepo::new(&conn);

        let inserted = repo.insert(record("aB3x", Scope::Global)).unwrap();
        let fetched = repo.get_by_short_code(&Scope::Global, "aB3x").unwrap();

        assert_eq!(fetched, Some(inserted));
    }

    #[test]
    fn test_duplicate_code_is_taken() {
        let conn = open_store_in_memory().unwrap();
        let mut repo = SqliteSnippetRepo::new(&conn);

        repo.insert(record("aaaa", Scope::Global)).unwrap();
        let err = repo.insert(record("aaaa", Scope::Global)).unwrap_err();

        assert!(matches!(err, SnipError::ShortCodeTaken { .. }));
    }

    #[test]
    fn test_same_code_in_other_scope_is_free() {
        let conn = open_store_in_memory().unwrap();
        let mut repo = SqliteSnippetRepo::new(&conn);

        repo.insert(record("aaaa", Scope::Global)).unwrap();
        assert!(repo
            .insert(record("aaaa", Scope::group(ScopeKind::Project, "p1")))
            .is_ok());
    }
}
