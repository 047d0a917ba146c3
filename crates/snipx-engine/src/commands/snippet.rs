//! Snippet command handlers with boundary logging.
//!
//! - Create (optionally as a child of an existing snippet)
//! - Lookup by short code, rendered or raw
//! - Fork tree of a snippet
//! - Delete, recent listing, fork template

#![allow(clippy::result_large_err)]

use chrono::Duration;
use rusqlite::Connection;
use serde::Deserialize;
use snipx_core::model::{ForkTemplate, Scope, Snippet};
use snipx_core::ops::snippet_ops::{self, NewSnippet};
use snipx_core::ops::SnippetRepository;
use snipx_core::scope::ScopeRequest;
use snipx_core::traversal;
use snipx_core::{log_op_end, log_op_error, log_op_start, SnipError};
use snipx_store::errors::Result;
use snipx_store::SqliteSnippetRepo;

use super::EngineContext;

/// Default `limit` for [`snippet_list_recent`]
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Create request as received from a client
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    pub raw_content: String,
    pub lexer: Option<String>,
    /// Short code of the snippet being forked, looked up in `scope`
    pub parent_short_code: Option<String>,
    pub scope: Option<ScopeRequest>,
    pub author: Option<String>,
    pub title: Option<String>,
    /// Lifetime in seconds
    pub expires_in_secs: Option<i64>,
}

impl CreateRequest {
    pub fn new(raw_content: impl Into<String>) -> Self {
        Self {
            raw_content: raw_content.into(),
            ..Self::default()
        }
    }
}

/// Create a snippet
///
/// ## Errors
///
/// - `NotFound`: the requested scope does not exist
/// - `InvalidParent`: `parent_short_code` names no snippet in the scope
/// - `InvalidInput`: content, title, author, lexer name or lifetime rejected
/// - `CapacityExhausted`: no free short code after the configured attempts
/// - `Persistence`: database error
pub fn snippet_create(
    request: CreateRequest,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Snippet> {
    log_op_start!(
        "snippet_create",
        lexer = request.lexer.as_deref().unwrap_or("-"),
        has_parent = request.parent_short_code.is_some()
    );
    let start = std::time::Instant::now();

    let snippet = snippet_create_impl(request, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_create",
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = snippet.id(),
        short_code = snippet.short_code()
    );

    Ok(snippet)
}

fn snippet_create_impl(
    request: CreateRequest,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Snippet> {
    let scope = ctx.resolve_scope(request.scope.as_ref())?;
    let mut repo = SqliteSnippetRepo::new(conn);

    let mut new = NewSnippet::new(request.raw_content).with_scope(scope.clone());
    if let Some(lexer) = request.lexer {
        new = new.with_lexer(lexer);
    }
    if let Some(author) = request.author {
        new = new.with_author(author);
    }
    if let Some(title) = request.title {
        new = new.with_title(title);
    }
    if let Some(secs) = request.expires_in_secs {
        let lifetime = Duration::try_seconds(secs)
            .ok_or_else(|| SnipError::validation("expires_in", "out of range"))?;
        new = new.with_expires_in(lifetime);
    }
    if let Some(code) = request.parent_short_code {
        let parent = repo
            .get_by_short_code(&scope, &code)?
            .ok_or_else(|| SnipError::InvalidParent {
                parent: code.clone(),
                scope: scope.to_string(),
            })?;
        new = new.with_parent(parent.id());
    }

    Ok(snippet_ops::create_snippet(
        &mut repo,
        ctx.codes(),
        &ctx.highlighter,
        &ctx.policy,
        new,
    )?)
}

/// Look up a snippet by short code
///
/// ## Errors
///
/// - `NotFound`: unknown scope, or no such snippet in it
/// - `Persistence`: database error
pub fn snippet_get(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Snippet> {
    log_op_start!("snippet_get", short_code = short_code);
    let start = std::time::Instant::now();

    let snippet = lookup(scope, short_code, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_get",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_get",
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = snippet.id()
    );

    Ok(snippet)
}

/// Raw content of a snippet, as submitted
///
/// ## Errors
///
/// Same as [`snippet_get`].
pub fn snippet_raw(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<String> {
    log_op_start!("snippet_raw", short_code = short_code);
    let start = std::time::Instant::now();

    let snippet = lookup(scope, short_code, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_raw",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_raw",
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = snippet.id()
    );

    Ok(snippet.raw_content().to_string())
}

/// Whole fork tree of a snippet, starting at its root
///
/// ## Errors
///
/// - `NotFound`: unknown scope or short code
/// - `LineageCorrupt`: the parent chain cycles or is too deep
/// - `Persistence`: database error
pub fn snippet_tree(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Vec<Snippet>> {
    log_op_start!("snippet_tree", short_code = short_code);
    let start = std::time::Instant::now();

    let tree = snippet_tree_impl(scope, short_code, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_tree",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_tree",
        duration_ms = start.elapsed().as_millis() as u64,
        tree_len = tree.len()
    );

    Ok(tree)
}

fn snippet_tree_impl(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Vec<Snippet>> {
    let snippet = lookup(scope, short_code, ctx, conn)?;
    let repo = SqliteSnippetRepo::new(conn);
    let root = traversal::get_root(&repo, &snippet)?;
    Ok(traversal::get_tree(&repo, &root)?)
}

/// Delete one snippet, returning its id
///
/// Children of the deleted snippet become roots of their own trees.
///
/// ## Errors
///
/// - `NotFound`: unknown scope or short code
/// - `Persistence`: database error
pub fn snippet_delete(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<i64> {
    log_op_start!("snippet_delete", short_code = short_code);
    let start = std::time::Instant::now();

    let id = snippet_delete_impl(scope, short_code, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_delete",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_delete",
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = id
    );

    Ok(id)
}

fn snippet_delete_impl(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<i64> {
    let scope = ctx.resolve_scope(scope)?;
    let mut repo = SqliteSnippetRepo::new(conn);
    let snippet = snippet_ops::get_by_short_code(&repo, &scope, short_code)?;
    snippet_ops::delete_snippet(&mut repo, &scope, snippet.id())?;
    Ok(snippet.id())
}

/// Newest snippets of a scope, at most `limit`
///
/// ## Errors
///
/// - `NotFound`: unknown scope
/// - `Persistence`: database error
pub fn snippet_list_recent(
    scope: Option<&ScopeRequest>,
    limit: usize,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Vec<Snippet>> {
    log_op_start!("snippet_list_recent", limit = limit);
    let start = std::time::Instant::now();

    let snippets = ctx
        .resolve_scope(scope)
        .and_then(|scope| {
            let repo = SqliteSnippetRepo::new(conn);
            Ok(snippet_ops::list_recent(&repo, &scope, limit)?)
        })
        .map_err(|e| {
            log_op_error!(
                "snippet_list_recent",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "snippet_list_recent",
        duration_ms = start.elapsed().as_millis() as u64,
        count = snippets.len()
    );

    Ok(snippets)
}

/// Pre-filled values for editing a snippet as a new child
///
/// ## Errors
///
/// Same as [`snippet_get`].
pub fn snippet_fork_template(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<ForkTemplate> {
    log_op_start!("snippet_fork_template", short_code = short_code);
    let start = std::time::Instant::now();

    let snippet = lookup(scope, short_code, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_fork_template",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_fork_template",
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = snippet.id()
    );

    Ok(snippet.fork_template())
}

fn lookup(
    scope: Option<&ScopeRequest>,
    short_code: &str,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<Snippet> {
    let scope: Scope = ctx.resolve_scope(scope)?;
    let repo = SqliteSnippetRepo::new(conn);
    Ok(snippet_ops::get_by_short_code(&repo, &scope, short_code)?)
}
