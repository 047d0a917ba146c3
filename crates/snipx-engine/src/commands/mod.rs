//! Command orchestration layer.
//!
//! Provides request-level functions that coordinate core domain logic with
//! the SQLite store. Each command resolves the caller's scope first, so every
//! lookup below it is already filtered to one namespace.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod diff;
pub mod lexer;
pub mod snippet;

use snipx_core::ident::{RandomShortCodes, ShortCodeSource};
use snipx_core::rules::CreatePolicy;
use snipx_core::scope::{GlobalOnly, ScopeRequest, ScopeResolver, StaticScopes};
use snipx_core::{Highlighter, Scope};
use snipx_store::errors::Result;

use crate::config::SnipxConfig;

/// Shared, read-only collaborators of every command
pub struct EngineContext {
    pub policy: CreatePolicy,
    pub highlighter: Highlighter,
    resolver: Box<dyn ScopeResolver + Send + Sync>,
    codes: Box<dyn ShortCodeSource + Send + Sync>,
}

impl EngineContext {
    /// Context for a deployment without groups and the default policy
    pub fn new() -> Self {
        Self {
            policy: CreatePolicy::default(),
            highlighter: Highlighter::new(),
            resolver: Box::new(GlobalOnly),
            codes: Box::new(RandomShortCodes),
        }
    }

    /// Context described by a loaded configuration
    ///
    /// Without configured groups only the global scope resolves.
    pub fn from_config(config: &SnipxConfig) -> Self {
        let resolver: Box<dyn ScopeResolver + Send + Sync> = if config.scopes.groups.is_empty() {
            Box::new(GlobalOnly)
        } else {
            Box::new(StaticScopes::new(config.scopes.groups.iter().cloned()))
        };

        Self {
            policy: config.snippets,
            highlighter: Highlighter::new(),
            resolver,
            codes: Box::new(RandomShortCodes),
        }
    }

    pub fn with_resolver(mut self, resolver: impl ScopeResolver + Send + Sync + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the short code source (deterministic codes in tests)
    pub fn with_codes(mut self, codes: impl ShortCodeSource + Send + Sync + 'static) -> Self {
        self.codes = Box::new(codes);
        self
    }

    pub fn with_policy(mut self, policy: CreatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub(crate) fn codes(&self) -> &dyn ShortCodeSource {
        self.codes.as_ref()
    }

    pub(crate) fn resolve_scope(&self, request: Option<&ScopeRequest>) -> Result<Scope> {
        Ok(self.resolver.resolve(request)?)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipx_core::errors::ExErrorKind;
    use snipx_core::ScopeKind;

    #[test]
    fn test_from_config_without_groups_is_global_only() {
        let ctx = EngineContext::from_config(&SnipxConfig::default());
        let req = ScopeRequest::new(ScopeKind::Project, "alpha");

        assert_eq!(ctx.resolve_scope(None).unwrap(), Scope::Global);
        assert_eq!(
            ctx.resolve_scope(Some(&req)).unwrap_err().kind(),
            ExErrorKind::NotFound
        );
    }

    #[test]
    fn test_from_config_with_groups() {
        let mut config = SnipxConfig::default();
        config.scopes.groups = vec![ScopeRequest::new(ScopeKind::Project, "alpha")];
        config.snippets.short_code_length = 6;

        let ctx = EngineContext::from_config(&config);
        let req = ScopeRequest::new(ScopeKind::Project, "alpha");

        assert_eq!(
            ctx.resolve_scope(Some(&req)).unwrap(),
            Scope::group(ScopeKind::Project, "alpha")
        );
        assert_eq!(ctx.policy.short_code_length, 6);
    }
}
