use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::errors::{Result, SnipError};
use crate::highlight::{resolve_lexer, Highlighter};
use crate::ident::ShortCodeSource;
use crate::model::{Scope, Snippet, SnippetRecord};
use crate::ops::repository::SnippetRepository;
use crate::rules::validation::{
    normalize_optional, validate_author, validate_content, validate_title, CreatePolicy,
};

/// Input for [`create_snippet`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSnippet {
    pub raw_content: String,
    pub lexer: Option<String>,
    pub parent_id: Option<i64>,
    pub scope: Scope,
    pub author: Option<String>,
    pub title: Option<String>,
    /// Advisory lifetime; converted to `expires_at` at creation
    pub expires_in: Option<Duration>,
}

impl NewSnippet {
    pub fn new(raw_content: impl Into<String>) -> Self {
        Self {
            raw_content: raw_content.into(),
            ..Self::default()
        }
    }

    pub fn with_lexer(mut self, lexer: impl Into<String>) -> Self {
        self.lexer = Some(lexer.into());
        self
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }
}

/// Create a snippet
///
/// Validates the input, checks the parent, renders the content once, then
/// allocates a short code. A collision reported by the repository is retried
/// with a fresh code up to `policy.max_attempts` times.
///
/// # Errors
///
/// - `Validation` for blank/oversized content, over-long title or author,
///   a malformed lexer name, or a non-positive lifetime
/// - `InvalidParent` if the parent does not exist in the snippet's scope
/// - `CapacityExhausted` if every generated short code collided
/// - `Persistence` from the repository
pub fn create_snippet<R>(
    repo: &mut R,
    codes: &dyn ShortCodeSource,
    highlighter: &Highlighter,
    policy: &CreatePolicy,
    new: NewSnippet,
) -> Result<Snippet>
where
    R: SnippetRepository + ?Sized,
{
    policy.validate()?;
    validate_content(&new.raw_content, policy)?;
    let title = normalize_optional(new.title);
    let author = normalize_optional(new.author);
    validate_title(title.as_deref())?;
    validate_author(author.as_deref())?;
    let lexer = resolve_lexer(new.lexer.as_deref())?;

    if let Some(parent_id) = new.parent_id {
        if repo.get_by_id(&new.scope, parent_id)?.is_none() {
            return Err(SnipError::InvalidParent {
                parent: parent_id.to_string(),
                scope: new.scope.to_string(),
            });
        }
    }

    // Millisecond precision, as persisted
    let published_at = Utc::now().trunc_subsecs(3);
    let expires_at = expiry(published_at, new.expires_in)?;
    let rendered_content = highlighter.render(&new.raw_content, lexer.name);

    for attempt in 1..=policy.max_attempts {
        let record = SnippetRecord {
            short_code: codes.generate(policy.short_code_length),
            scope: new.scope.clone(),
            title: title.clone(),
            author: author.clone(),
            raw_content: new.raw_content.clone(),
            rendered_content: rendered_content.clone(),
            lexer: lexer.name.to_string(),
            published_at,
            expires_at,
            parent_id: new.parent_id,
        };

        match repo.insert(record) {
            Ok(snippet) => return Ok(snippet),
            Err(SnipError::ShortCodeTaken { short_code, .. }) => {
                tracing::debug!(
                    short_code = %short_code,
                    scope = %new.scope,
                    attempt,
                    "short code collision, retrying"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(SnipError::CapacityExhausted {
        scope: new.scope.to_string(),
        attempts: policy.max_attempts,
    })
}

fn expiry(
    published_at: DateTime<Utc>,
    expires_in: Option<Duration>,
) -> Result<Option<DateTime<Utc>>> {
    let Some(lifetime) = expires_in else {
        return Ok(None);
    };
    if lifetime <= Duration::zero() {
        return Err(SnipError::validation("expires_in", "must be positive"));
    }
    published_at
        .checked_add_signed(lifetime)
        .map(|at| Some(at.trunc_subsecs(3)))
        .ok_or_else(|| SnipError::validation("expires_in", "too far in the future"))
}

/// # Errors
///
/// Returns `ShortCodeNotFound` if no snippet has this code in the scope.
pub fn get_by_short_code<R>(repo: &R, scope: &Scope, short_code: &str) -> Result<Snippet>
where
    R: SnippetRepository + ?Sized,
{
    repo.get_by_short_code(scope, short_code)?
        .ok_or_else(|| SnipError::ShortCodeNotFound {
            scope: scope.to_string(),
            short_code: short_code.to_string(),
        })
}

/// # Errors
///
/// Returns `SnippetNotFound` if no snippet has this id in the scope.
pub fn get_by_id<R>(repo: &R, scope: &Scope, id: i64) -> Result<Snippet>
where
    R: SnippetRepository + ?Sized,
{
    repo.get_by_id(scope, id)?
        .ok_or_else(|| SnipError::SnippetNotFound {
            scope: scope.to_string(),
            snippet_id: id,
        })
}

/// Delete exactly one snippet
///
/// Children keep their now-dangling `parent_id` and become roots.
///
/// # Errors
///
/// Returns `SnippetNotFound` if no snippet has this id in the scope.
pub fn delete_snippet<R>(repo: &mut R, scope: &Scope, id: i64) -> Result<()>
where
    R: SnippetRepository + ?Sized,
{
    let snippet = get_by_id(repo, scope, id)?;
    if !repo.delete(snippet.id())? {
        return Err(SnipError::SnippetNotFound {
            scope: scope.to_string(),
            snippet_id: id,
        });
    }
    Ok(())
}

/// Newest snippets of a scope
///
/// # Errors
///
/// Returns `Persistence` from the repository.
pub fn list_recent<R>(repo: &R, scope: &Scope, limit: usize) -> Result<Vec<Snippet>>
where
    R: SnippetRepository + ?Sized,
{
    repo.list_recent(scope, limit)
}
