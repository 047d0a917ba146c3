//! Unified diff computation.
//!
//! The core entry point is [`diff_snippets`]. Formatting follows the classic
//! unified format without timestamps: `---`/`+++` headers, `@@` hunks with
//! [`CONTEXT_LINES`] lines of context, and lines joined by `\n` with no
//! trailing newline.

use similar::{Algorithm, DiffOp, DiffTag, TextDiff};

use crate::diff::model::SnippetDiff;
use crate::errors::{Result, SnipError};
use crate::highlight::{Highlighter, DIFF_LEXER};
use crate::model::Snippet;

pub const ORIGINAL_LABEL: &str = "Original";
pub const CURRENT_LABEL: &str = "Current";
pub const CONTEXT_LINES: usize = 3;
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Compare two snippets of the same scope
///
/// `older` is labelled `Original`, `newer` is labelled `Current`.
///
/// # Errors
///
/// Returns `ScopeMismatch` when the snippets live in different scopes.
pub fn diff_snippets(
    older: &Snippet,
    newer: &Snippet,
    highlighter: &Highlighter,
) -> Result<SnippetDiff> {
    if older.scope() != newer.scope() {
        return Err(SnipError::ScopeMismatch {
            left_id: older.id(),
            left_scope: older.scope().to_string(),
            right_id: newer.id(),
            right_scope: newer.scope().to_string(),
        });
    }

    if older.raw_content() == newer.raw_content() {
        return Ok(SnippetDiff::NoChanges);
    }

    let unified = unified_diff(older.raw_content(), newer.raw_content());
    let rendered = highlighter.render(&unified, DIFF_LEXER);

    tracing::debug!(
        left_id = older.id(),
        right_id = newer.id(),
        unified_len = unified.len(),
        "computed snippet diff"
    );

    Ok(SnippetDiff::Changed { unified, rendered })
}

/// Unified diff of two texts, line by line
///
/// Lines are compared with their terminators, so texts that differ only in
/// line endings still produce a hunk. A shown line without a trailing `\n`
/// is followed by [`NO_NEWLINE_MARKER`].
pub fn unified_diff(old: &str, new: &str) -> String {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old_lines, &new_lines);

    let mut out = vec![
        format!("--- {}", ORIGINAL_LABEL),
        format!("+++ {}", CURRENT_LABEL),
    ];

    for group in diff.grouped_ops(CONTEXT_LINES) {
        if group.iter().all(|op| op.tag() == DiffTag::Equal) {
            continue;
        }
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        out.push(format!(
            "@@ -{} +{} @@",
            format_range(first.old_range().start, last.old_range().end),
            format_range(first.new_range().start, last.new_range().end),
        ));
        push_group_lines(&mut out, &group, &old_lines, &new_lines);
    }

    out.join("\n")
}

fn push_group_lines(out: &mut Vec<String>, group: &[DiffOp], old: &[&str], new: &[&str]) {
    for op in group {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push_lines(out, ' ', &old[old_range]),
            DiffTag::Delete => push_lines(out, '-', &old[old_range]),
            DiffTag::Insert => push_lines(out, '+', &new[new_range]),
            DiffTag::Replace => {
                push_lines(out, '-', &old[old_range]);
                push_lines(out, '+', &new[new_range]);
            }
        }
    }
}

fn push_lines(out: &mut Vec<String>, prefix: char, lines: &[&str]) {
    for line in lines {
        match line.strip_suffix('\n') {
            Some(body) => out.push(format!("{}{}", prefix, body.strip_suffix('\r').unwrap_or(body))),
            None => {
                out.push(format!("{}{}", prefix, line));
                out.push(NO_NEWLINE_MARKER.to_string());
            }
        }
    }
}

/// Hunk range in unified notation: `start` alone for one line, otherwise
/// `start,len`; an empty range points at the line before it.
fn format_range(start: usize, stop: usize) -> String {
    let mut beginning = start + 1;
    let length = stop - start;
    if length == 1 {
        return beginning.to_string();
    }
    if length == 0 {
        beginning -= 1;
    }
    format!("{},{}", beginning, length)
}
