//! Diff command handler.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use snipx_core::diff::{diff_snippets, SnippetDiff};
use snipx_core::ops::snippet_ops;
use snipx_core::scope::ScopeRequest;
use snipx_core::{log_op_end, log_op_error, log_op_start, SnipError};
use snipx_store::errors::Result;
use snipx_store::SqliteSnippetRepo;

use super::EngineContext;

/// Diff two snippets selected by numeric id
///
/// `a` is labelled `Original` and `b` `Current`. Ids arrive as the raw
/// strings a client submitted.
///
/// ## Errors
///
/// - `MissingSelection`: either id is absent or not a decimal number
/// - `NotFound`: unknown scope, or an id names no snippet in it
/// - `Persistence`: database error
pub fn snippet_diff(
    scope: Option<&ScopeRequest>,
    a: Option<&str>,
    b: Option<&str>,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<SnippetDiff> {
    log_op_start!("snippet_diff", a = a.unwrap_or(""), b = b.unwrap_or(""));
    let start = std::time::Instant::now();

    let diff = snippet_diff_impl(scope, a, b, ctx, conn).map_err(|e| {
        log_op_error!(
            "snippet_diff",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "snippet_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        changed = diff.is_changed()
    );

    Ok(diff)
}

fn snippet_diff_impl(
    scope: Option<&ScopeRequest>,
    a: Option<&str>,
    b: Option<&str>,
    ctx: &EngineContext,
    conn: &Connection,
) -> Result<SnippetDiff> {
    let (a, b) = (parse_selection("a", a)?, parse_selection("b", b)?);
    let scope = ctx.resolve_scope(scope)?;
    let repo = SqliteSnippetRepo::new(conn);

    let older = snippet_ops::get_by_id(&repo, &scope, a)?;
    let newer = snippet_ops::get_by_id(&repo, &scope, b)?;

    Ok(diff_snippets(&older, &newer, &ctx.highlighter)?)
}

/// Digits only; no sign, whitespace or empty string
fn parse_selection(name: &str, raw: Option<&str>) -> std::result::Result<i64, SnipError> {
    let missing = |reason: String| SnipError::MissingSelection { reason };

    let raw = raw.ok_or_else(|| missing(format!("{} is missing", name)))?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(missing(format!("{} is not a snippet id", name)));
    }
    raw.parse()
        .map_err(|_| missing(format!("{} is out of range", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("a", Some("42")).unwrap(), 42);
        assert_eq!(parse_selection("a", Some("007")).unwrap(), 7);

        for raw in [None, Some(""), Some("-1"), Some(" 4"), Some("4a"), Some("1.0")] {
            assert!(
                matches!(
                    parse_selection("a", raw),
                    Err(SnipError::MissingSelection { .. })
                ),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_selection_overflow() {
        let err = parse_selection("b", Some("99999999999999999999")).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
