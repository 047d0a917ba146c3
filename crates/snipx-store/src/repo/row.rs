//! Row <-> model mapping

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Row;
use snipx_core::errors::{Result, SnipError};
use snipx_core::model::{Scope, Snippet, SnippetRecord};

/// Column list matching [`SnippetRow::from_row`]
pub(crate) const SNIPPET_COLUMNS: &str = "id, short_code, scope_kind, scope_id, title, author, \
     raw_content, rendered_content, lexer, published_at, expires_at, parent_id";

/// A `snippets` row as stored
pub(crate) struct SnippetRow {
    id: i64,
    short_code: String,
    scope_kind: String,
    scope_id: String,
    title: Option<String>,
    author: Option<String>,
    raw_content: String,
    rendered_content: String,
    lexer: String,
    published_at: i64,
    expires_at: Option<i64>,
    parent_id: Option<i64>,
}

impl SnippetRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            short_code: row.get(1)?,
            scope_kind: row.get(2)?,
            scope_id: row.get(3)?,
            title: row.get(4)?,
            author: row.get(5)?,
            raw_content: row.get(6)?,
            rendered_content: row.get(7)?,
            lexer: row.get(8)?,
            published_at: row.get(9)?,
            expires_at: row.get(10)?,
            parent_id: row.get(11)?,
        })
    }

    pub(crate) fn into_snippet(self) -> Result<Snippet> {
        let scope = Scope::from_storage_key(&self.scope_kind, &self.scope_id)?;
        let published_at = from_millis(self.id, self.published_at)?;
        let expires_at = self
            .expires_at
            .map(|ms| from_millis(self.id, ms))
            .transpose()?;

        let record = SnippetRecord {
            short_code: self.short_code,
            scope,
            title: self.title,
            author: self.author,
            raw_content: self.raw_content,
            rendered_content: self.rendered_content,
            lexer: self.lexer,
            published_at,
            expires_at,
            parent_id: self.parent_id,
        };
        Ok(record.into_snippet(self.id))
    }
}

pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(id: i64, ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| SnipError::Persistence {
            message: format!("snippet {} has out-of-range timestamp {}", id, ms),
        })
}
