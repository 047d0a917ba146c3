use crate::errors::Result;
use crate::model::{Scope, Snippet, SnippetRecord};

/// Persistence seam for snippets
///
/// Every read is filtered by scope. Implementations must enforce uniqueness
/// of `(scope, short_code)` atomically at write time and assign ids that are
/// strictly increasing and never reused.
pub trait SnippetRepository {
    /// Persist a new snippet and return it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns `ShortCodeTaken` when the short code already exists in the
    /// record's scope; `Persistence` for any other storage failure.
    fn insert(&mut self, record: SnippetRecord) -> Result<Snippet>;

    /// # Errors
    ///
    /// Returns `Persistence` on storage failure.
    fn get_by_id(&self, scope: &Scope, id: i64) -> Result<Option<Snippet>>;

    /// # Errors
    ///
    /// Returns `Persistence` on storage failure.
    fn get_by_short_code(&self, scope: &Scope, short_code: &str) -> Result<Option<Snippet>>;

    /// Direct children of `parent_id`, ordered by id ascending
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on storage failure.
    fn children_of(&self, scope: &Scope, parent_id: i64) -> Result<Vec<Snippet>>;

    /// Remove exactly one snippet; children are left untouched
    ///
    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on storage failure.
    fn delete(&mut self, id: i64) -> Result<bool>;

    /// Up to `limit` snippets of the scope, newest first
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on storage failure.
    fn list_recent(&self, scope: &Scope, limit: usize) -> Result<Vec<Snippet>>;
}
