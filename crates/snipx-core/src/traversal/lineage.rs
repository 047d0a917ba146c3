//! Fork-tree traversal
//!
//! Parent links are resolved through the repository, so both walks also
//! terminate on data no public operation can produce (cycles, very long
//! chains).

use std::collections::HashSet;

use crate::errors::{Result, SnipError};
use crate::model::Snippet;
use crate::ops::repository::SnippetRepository;

/// Longest parent chain [`get_root`] will follow.
pub const MAX_LINEAGE_DEPTH: usize = 10_000;

/// Root of the tree `snippet` belongs to
///
/// Follows parent links upward within the snippet's scope. A parent that no
/// longer exists ends the walk: the orphaned snippet is its own root.
///
/// # Errors
///
/// * `LineageCorrupt` - if the chain revisits a snippet or is longer than
///   [`MAX_LINEAGE_DEPTH`]
/// * `Persistence` - from the repository
pub fn get_root<R>(repo: &R, snippet: &Snippet) -> Result<Snippet>
where
    R: SnippetRepository + ?Sized,
{
    let mut visited = HashSet::from([snippet.id()]);
    let mut current = snippet.clone();

    while let Some(parent_id) = current.parent_id() {
        let Some(parent) = repo.get_by_id(current.scope(), parent_id)? else {
            break;
        };

        if !visited.insert(parent.id()) {
            return Err(SnipError::LineageCorrupt {
                snippet_id: snippet.id(),
                reason: format!("cycle through snippet {}", parent.id()),
            });
        }
        if visited.len() > MAX_LINEAGE_DEPTH {
            return Err(SnipError::LineageCorrupt {
                snippet_id: snippet.id(),
                reason: format!("parent chain longer than {}", MAX_LINEAGE_DEPTH),
            });
        }
        current = parent;
    }

    Ok(current)
}

/// `root` and all its transitive descendants
///
/// Pre-order: every snippet precedes its descendants, siblings appear in id
/// (insertion) order. A snippet reachable twice is emitted once.
///
/// # Errors
///
/// * `Persistence` - from the repository
pub fn get_tree<R>(repo: &R, root: &Snippet) -> Result<Vec<Snippet>>
where
    R: SnippetRepository + ?Sized,
{
    let mut tree = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }
        let children = repo.children_of(node.scope(), node.id())?;
        stack.extend(
            children
                .into_iter()
                .rev()
                .filter(|child| !visited.contains(&child.id())),
        );
        tree.push(node);
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scope, SnippetRecord};
    use crate::ops::MemoryRepo;
    use chrono::Utc;

    fn record(code: &str, parent_id: Option<i64>) -> SnippetRecord {
        SnippetRecord {
            short_code: code.to_string(),
            scope: Scope::Global,
            title: None,
            author: None,
            raw_content: code.to_string(),
            rendered_content: code.to_string(),
            lexer: "text".to_string(),
            published_at: Utc::now(),
            expires_at: None,
            parent_id,
        }
    }

    #[test]
    fn test_root_of_root_is_itself() {
        let mut repo = MemoryRepo::new();
        let root = repo.insert_raw(record("root", None), 1);

        assert_eq!(get_root(&repo, &root).unwrap(), root);
    }

    #[test]
    fn test_cycle_is_detected() {
        let mut repo = MemoryRepo::new();
        let a = repo.insert_raw(record("aaaa", Some(2)), 1);
        repo.insert_raw(record("bbbb", Some(1)), 2);

        let err = get_root(&repo, &a).unwrap_err();
        assert!(matches!(err, SnipError::LineageCorrupt { snippet_id: 1, .. }));
    }

    #[test]
    fn test_self_parent_is_detected() {
        let mut repo = MemoryRepo::new();
        let a = repo.insert_raw(record("aaaa", Some(1)), 1);

        assert!(matches!(
            get_root(&repo, &a),
            Err(SnipError::LineageCorrupt { .. })
        ));
    }

    #[test]
    fn test_tree_terminates_on_cycle() {
        let mut repo = MemoryRepo::new();
        let a = repo.insert_raw(record("aaaa", Some(2)), 1);
        repo.insert_raw(record("bbbb", Some(1)), 2);

        let ids: Vec<i64> = get_tree(&repo, &a).unwrap().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_tree_is_pre_order_with_siblings_by_id() {
        let mut repo = MemoryRepo::new();
        let root = repo.insert_raw(record("r", None), 1);
        repo.insert_raw(record("a", Some(1)), 2);
        repo.insert_raw(record("b", Some(1)), 3);
        repo.insert_raw(record("a1", Some(2)), 4);
        repo.insert_raw(record("b1", Some(3)), 5);
        repo.insert_raw(record("a2", Some(2)), 6);

        let ids: Vec<i64> = get_tree(&repo, &root)
            .unwrap()
            .iter()
            .map(|s| s.id())
            .collect();
        assert_eq!(ids, vec![1, 2, 4, 6, 3, 5]);
    }
}
