//! Scope resolution
//!
//! Requests carry an optional group context. A [`ScopeResolver`] turns it
//! into a [`Scope`], and the scope acts as the filter predicate for every
//! lookup, uniqueness check and parent link. Membership checks belong to the
//! layer that owns the groups; resolvers only decide which scopes exist.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnipError};
use crate::model::{Scope, ScopeKind, Snippet};

/// Group context as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRequest {
    pub kind: ScopeKind,
    pub id: String,
}

impl ScopeRequest {
    pub fn new(kind: ScopeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Maps an optional group context to a scope
pub trait ScopeResolver {
    /// `None` always resolves to [`Scope::Global`].
    ///
    /// # Errors
    ///
    /// Returns `ScopeNotFound` when the group is unknown, or `Validation`
    /// for a blank id.
    fn resolve(&self, request: Option<&ScopeRequest>) -> Result<Scope>;
}

/// Resolver for deployments without groups
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOnly;

impl ScopeResolver for GlobalOnly {
    fn resolve(&self, request: Option<&ScopeRequest>) -> Result<Scope> {
        match request {
            None => Ok(Scope::Global),
            Some(req) => Err(SnipError::ScopeNotFound {
                scope: Scope::group(req.kind, req.id.clone()).to_string(),
            }),
        }
    }
}

/// Resolver over a fixed allow-list of groups
#[derive(Debug, Clone, Default)]
pub struct StaticScopes {
    groups: BTreeSet<(ScopeKind, String)>,
}

impl StaticScopes {
    pub fn new<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = ScopeRequest>,
    {
        Self {
            groups: groups.into_iter().map(|g| (g.kind, g.id)).collect(),
        }
    }

    pub fn contains(&self, kind: ScopeKind, id: &str) -> bool {
        self.groups.contains(&(kind, id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl ScopeResolver for StaticScopes {
    fn resolve(&self, request: Option<&ScopeRequest>) -> Result<Scope> {
        let Some(req) = request else {
            return Ok(Scope::Global);
        };

        let id = req.id.trim();
        if id.is_empty() {
            return Err(SnipError::validation("scope id", "group id must not be blank"));
        }
        if !self.contains(req.kind, id) {
            return Err(SnipError::ScopeNotFound {
                scope: Scope::group(req.kind, id).to_string(),
            });
        }
        Ok(Scope::group(req.kind, id))
    }
}

impl Scope {
    /// Whether `snippet` is visible (and uniquely identified) in this scope
    pub fn admits(&self, snippet: &Snippet) -> bool {
        snippet.scope() == self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_context_is_global() {
        assert_eq!(GlobalOnly.resolve(None).unwrap(), Scope::Global);
        assert_eq!(StaticScopes::default().resolve(None).unwrap(), Scope::Global);
    }

    #[test]
    fn test_global_only_rejects_groups() {
        let req = ScopeRequest::new(ScopeKind::Project, "p1");
        assert!(matches!(
            GlobalOnly.resolve(Some(&req)),
            Err(SnipError::ScopeNotFound { .. })
        ));
    }

    #[test]
    fn test_static_scopes_allow_list() {
        let resolver = StaticScopes::new([
            ScopeRequest::new(ScopeKind::Project, "p1"),
            ScopeRequest::new(ScopeKind::Tribe, "t1"),
        ]);

        assert_eq!(
            resolver
                .resolve(Some(&ScopeRequest::new(ScopeKind::Tribe, "t1")))
                .unwrap(),
            Scope::group(ScopeKind::Tribe, "t1")
        );
        // Same id, other kind
        assert!(matches!(
            resolver.resolve(Some(&ScopeRequest::new(ScopeKind::Tribe, "p1"))),
            Err(SnipError::ScopeNotFound { .. })
        ));
        assert!(matches!(
            resolver.resolve(Some(&ScopeRequest::new(ScopeKind::Project, "  "))),
            Err(SnipError::Validation { .. })
        ));
    }
}
