pub mod scope;
pub mod snippet;

pub use scope::{Scope, ScopeKind};
pub use snippet::{ForkTemplate, Snippet, SnippetRecord};
