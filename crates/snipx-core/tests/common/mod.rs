use snipx_core::highlight::Highlighter;
use snipx_core::ident::RandomShortCodes;
use snipx_core::ops::snippet_ops::{self, NewSnippet};
use snipx_core::ops::MemoryRepo;
use snipx_core::rules::CreatePolicy;
use snipx_core::{Scope, Snippet};

/// Create a new empty repository for testing
#[allow(dead_code)]
pub fn new_repo() -> MemoryRepo {
    MemoryRepo::new()
}

/// Create a snippet with default policy and random short codes
#[allow(dead_code)]
pub fn create(repo: &mut MemoryRepo, new: NewSnippet) -> Snippet {
    snippet_ops::create_snippet(
        repo,
        &RandomShortCodes,
        &Highlighter::new(),
        &CreatePolicy::default(),
        new,
    )
    .unwrap()
}

/// Create a root snippet in the global scope
#[allow(dead_code)]
pub fn create_root(repo: &mut MemoryRepo, raw: &str) -> Snippet {
    create(repo, NewSnippet::new(raw))
}

/// Create a child of `parent` in the parent's scope
#[allow(dead_code)]
pub fn create_child(repo: &mut MemoryRepo, parent: &Snippet, raw: &str) -> Snippet {
    create(
        repo,
        NewSnippet::new(raw)
            .with_parent(parent.id())
            .with_scope(parent.scope().clone())
            .with_lexer(parent.lexer()),
    )
}

/// Build `root -> a -> (a1, a2)`, `root -> b`
#[allow(dead_code)]
pub fn setup_fork_tree(repo: &mut MemoryRepo, scope: &Scope) -> Vec<Snippet> {
    let root = create(repo, NewSnippet::new("root").with_scope(scope.clone()));
    let a = create_child(repo, &root, "a");
    let b = create_child(repo, &root, "b");
    let a1 = create_child(repo, &a, "a1");
    let a2 = create_child(repo, &a, "a2");
    vec![root, a, b, a1, a2]
}
