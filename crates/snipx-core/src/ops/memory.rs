use std::collections::BTreeMap;

use crate::errors::{Result, SnipError};
use crate::model::{Scope, Snippet, SnippetRecord};
use crate::ops::repository::SnippetRepository;

/// In-memory repository
///
/// BTreeMap keyed by id, so iteration is already in insertion order. Not
/// shared across threads; used by tests and single-process tooling.
#[derive(Debug, Clone)]
pub struct MemoryRepo {
    snippets: BTreeMap<i64, Snippet>,
    next_id: i64,
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self {
            snippets: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Insert a snippet with a caller-chosen id, bypassing all checks
    ///
    /// Lets tests build lineages no public operation can produce.
    pub fn insert_raw(&mut self, record: SnippetRecord, id: i64) -> Snippet {
        let snippet = record.into_snippet(id);
        self.snippets.insert(id, snippet.clone());
        self.next_id = self.next_id.max(id + 1);
        snippet
    }

    fn in_scope<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a Snippet> + 'a {
        self.snippets.values().filter(move |s| scope.admits(s))
    }
}

impl SnippetRepository for MemoryRepo {
    fn insert(&mut self, record: SnippetRecord) -> Result<Snippet> {
        if self
            .in_scope(&record.scope)
            .any(|s| s.short_code() == record.short_code)
        {
            return Err(SnipError::ShortCodeTaken {
                scope: record.scope.to_string(),
                short_code: record.short_code,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        let snippet = record.into_snippet(id);
        self.snippets.insert(id, snippet.clone());
        Ok(snippet)
    }

    fn get_by_id(&self, scope: &Scope, id: i64) -> Result<Option<Snippet>> {
        Ok(self.snippets.get(&id).filter(|s| scope.admits(s)).cloned())
    }

    fn get_by_short_code(&self, scope: &Scope, short_code: &str) -> Result<Option<Snippet>> {
        Ok(self
            .in_scope(scope)
            .find(|s| s.short_code() == short_code)
            .cloned())
    }

    fn children_of(&self, scope: &Scope, parent_id: i64) -> Result<Vec<Snippet>> {
        Ok(self
            .in_scope(scope)
            .filter(|s| s.parent_id() == Some(parent_id))
            .cloned()
            .collect())
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        Ok(self.snippets.remove(&id).is_some())
    }

    fn list_recent(&self, scope: &Scope, limit: usize) -> Result<Vec<Snippet>> {
        let mut snippets: Vec<Snippet> = self.in_scope(scope).cloned().collect();
        snippets.sort_by(|a, b| {
            b.published_at()
                .cmp(&a.published_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        snippets.truncate(limit);
        Ok(snippets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScopeKind;
    use chrono::Utc;

    fn record(code: &str, scope: Scope, parent_id: Option<i64>) -> SnippetRecord {
        SnippetRecord {
            short_code: code.to_string(),
            scope,
            title: None,
            author: None,
            raw_content: "x".to_string(),
            rendered_content: "x".to_string(),
            lexer: "text".to_string(),
            published_at: Utc::now(),
            expires_at: None,
            parent_id,
        }
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut repo = MemoryRepo::new();
        let a = repo.insert(record("aaaa", Scope::Global, None)).unwrap();
        assert!(repo.delete(a.id()).unwrap());
        let b = repo.insert(record("bbbb", Scope::Global, None)).unwrap();

        assert!(b.id() > a.id());
    }

    #[test]
    fn test_short_code_unique_per_scope_only() {
        let mut repo = MemoryRepo::new();
        let tribe = Scope::group(ScopeKind::Tribe, "t1");

        repo.insert(record("aaaa", Scope::Global, None)).unwrap();
        repo.insert(record("aaaa", tribe.clone(), None)).unwrap();
        let err = repo.insert(record("aaaa", tribe, None)).unwrap_err();

        assert!(matches!(err, SnipError::ShortCodeTaken { .. }));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_lookups_are_scope_filtered() {
        let mut repo = MemoryRepo::new();
        let project = Scope::group(ScopeKind::Project, "p1");
        let s = repo.insert(record("aaaa", project.clone(), None)).unwrap();

        assert!(repo.get_by_id(&Scope::Global, s.id()).unwrap().is_none());
        assert!(repo.get_by_short_code(&Scope::Global, "aaaa").unwrap().is_none());
        assert_eq!(repo.get_by_id(&project, s.id()).unwrap(), Some(s));
    }

    #[test]
    fn test_delete_leaves_children() {
        let mut repo = MemoryRepo::new();
        let parent = repo.insert(record("aaaa", Scope::Global, None)).unwrap();
        let child = repo
            .insert(record("bbbb", Scope::Global, Some(parent.id())))
            .unwrap();

        assert!(repo.delete(parent.id()).unwrap());
        assert!(!repo.delete(parent.id()).unwrap());

        let kept = repo.get_by_id(&Scope::Global, child.id()).unwrap().unwrap();
        assert_eq!(kept.parent_id(), Some(parent.id()));
    }
}
