use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SnipError;

/// Kind of external grouping entity a snippet can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// A collaborative project
    Project,
    /// An interest group / community
    Tribe,
}

impl ScopeKind {
    /// Stable storage/wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Project => "project",
            ScopeKind::Tribe => "tribe",
        }
    }
}

impl FromStr for ScopeKind {
    type Err = SnipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(ScopeKind::Project),
            "tribe" => Ok(ScopeKind::Tribe),
            other => Err(SnipError::validation(
                "scope kind",
                format!("unknown scope kind '{}'", other),
            )),
        }
    }
}

/// Namespace a snippet lives in
///
/// Short codes are unique per scope, and parent links never cross scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Scope {
    /// The public namespace
    #[default]
    Global,
    /// A group namespace identified by kind and an opaque id
    Group { kind: ScopeKind, id: String },
}

impl Scope {
    /// Build a group scope
    pub fn group(kind: ScopeKind, id: impl Into<String>) -> Self {
        Scope::Group {
            kind,
            id: id.into(),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }

    /// Column pair used by the store; the global scope maps to empty strings
    /// so a unique index over the pair also covers it.
    pub fn storage_key(&self) -> (&str, &str) {
        match self {
            Scope::Global => ("", ""),
            Scope::Group { kind, id } => (kind.as_str(), id.as_str()),
        }
    }

    /// Inverse of [`Scope::storage_key`]
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an unknown kind tag or a kind without an id.
    pub fn from_storage_key(kind: &str, id: &str) -> Result<Self, SnipError> {
        if kind.is_empty() {
            return Ok(Scope::Global);
        }
        if id.is_empty() {
            return Err(SnipError::validation("scope id", "group scope without id"));
        }
        Ok(Scope::group(kind.parse()?, id))
    }

    /// URL path prefix for snippets in this scope
    pub fn path_prefix(&self) -> String {
        match self {
            Scope::Global => "/".to_string(),
            Scope::Group { kind, id } => format!("/{}/{}/", kind.as_str(), id),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Group { kind, id } => write!(f, "{}:{}", kind.as_str(), id),
        }
    }
}

/// Parses `global` or `<kind>:<id>`.
impl FromStr for Scope {
    type Err = SnipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "global" {
            return Ok(Scope::Global);
        }
        let (kind, id) = s.split_once(':').ok_or_else(|| {
            SnipError::validation("scope", format!("expected <kind>:<id>, got '{}'", s))
        })?;
        Scope::from_storage_key(kind, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_round_trip() {
        let scope = Scope::group(ScopeKind::Project, "alpha");
        let (kind, id) = scope.storage_key();
        assert_eq!((kind, id), ("project", "alpha"));
        assert_eq!(Scope::from_storage_key(kind, id).unwrap(), scope);
        assert_eq!(Scope::from_storage_key("", "").unwrap(), Scope::Global);
    }

    #[test]
    fn test_parse_and_display() {
        let scope: Scope = "tribe:rustaceans".parse().unwrap();
        assert_eq!(scope.to_string(), "tribe:rustaceans");
        assert_eq!("global".parse::<Scope>().unwrap(), Scope::Global);
        assert!("guild:x".parse::<Scope>().is_err());
        assert!("project".parse::<Scope>().is_err());
    }

    #[test]
    fn test_path_prefix() {
        assert_eq!(Scope::Global.path_prefix(), "/");
        assert_eq!(
            Scope::group(ScopeKind::Project, "p1").path_prefix(),
            "/project/p1/"
        );
    }
}
