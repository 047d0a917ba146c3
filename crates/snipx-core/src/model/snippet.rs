use chrono::{DateTime, Utc};
use serde::Serialize;

use super::scope::Scope;

/// Snippet - one immutable revision in a fork tree
///
/// Snippets are never edited. "Editing" creates a child whose `parent_id`
/// points at the snippet being edited, so fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snippet {
    id: i64,
    short_code: String,
    scope: Scope,
    title: Option<String>,
    author: Option<String>,
    raw_content: String,
    rendered_content: String,
    lexer: String,
    published_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    parent_id: Option<i64>,
}

/// Everything about a snippet except its store-assigned id
///
/// Repositories receive a record on insert and hand back a [`Snippet`]
/// once the id is known.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetRecord {
    pub short_code: String,
    pub scope: Scope,
    pub title: Option<String>,
    pub author: Option<String>,
    pub raw_content: String,
    pub rendered_content: String,
    pub lexer: String,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub parent_id: Option<i64>,
}

impl SnippetRecord {
    /// Attach the persistent id
    pub fn into_snippet(self, id: i64) -> Snippet {
        Snippet {
            id,
            short_code: self.short_code,
            scope: self.scope,
            title: self.title,
            author: self.author,
            raw_content: self.raw_content,
            rendered_content: self.rendered_content,
            lexer: self.lexer,
            published_at: self.published_at,
            expires_at: self.expires_at,
            parent_id: self.parent_id,
        }
    }
}

impl Snippet {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn short_code(&self) -> &str {
        &self.short_code
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Highlighted markup computed when the snippet was created
    pub fn rendered_content(&self) -> &str {
        &self.rendered_content
    }

    pub fn lexer(&self) -> &str {
        &self.lexer
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    /// A snippet without a parent starts its own lineage
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Advisory only; nothing purges expired snippets.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Number of lines in the raw content
    ///
    /// Lines end at `\n` or `\r\n`. A lone `\r` does not end a line, which
    /// is the same split the highlighter uses, so this always equals
    /// `rendered_lines().len()`.
    pub fn line_count(&self) -> usize {
        self.raw_content.lines().count()
    }

    /// Rendered markup split per line, for presentation with line numbers
    ///
    /// Each line carries its own balanced spans.
    pub fn rendered_lines(&self) -> Vec<&str> {
        self.rendered_content.lines().collect()
    }

    /// Canonical URL path of this snippet within its scope
    pub fn permalink(&self) -> String {
        format!("{}{}/", self.scope.path_prefix(), self.short_code)
    }

    /// Initial values for the "edit and resubmit as child" form
    pub fn fork_template(&self) -> ForkTemplate {
        ForkTemplate {
            raw_content: self.raw_content.clone(),
            lexer: self.lexer.clone(),
            parent_short_code: self.short_code.clone(),
        }
    }
}

/// Pre-filled input for creating a child of an existing snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkTemplate {
    pub raw_content: String,
    pub lexer: String,
    pub parent_short_code: String,
}
