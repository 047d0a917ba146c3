//! Static table of supported lexers
//!
//! The table is the contract with clients (form population, validation). It
//! maps each lexer name to a syntax definition of the highlighting backend;
//! entries the backend has no grammar for render as plain text.

use serde::Serialize;

use crate::errors::{Result, SnipError};

/// Bumped whenever entries are added, removed, or renamed.
pub const LEXER_LIST_VERSION: u32 = 1;

pub const DEFAULT_LEXER: &str = "text";
pub const DIFF_LEXER: &str = "diff";
pub const MAX_LEXER_NAME_LEN: usize = 30;

/// One supported lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexerSpec {
    /// Stable identifier stored on snippets
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Syntax definition name in the highlighting backend
    #[serde(skip)]
    pub syntax: Option<&'static str>,
}

const fn lexer(
    name: &'static str,
    label: &'static str,
    syntax: Option<&'static str>,
) -> LexerSpec {
    LexerSpec {
        name,
        label,
        syntax,
    }
}

/// Sorted by name.
pub const LEXERS: &[LexerSpec] = &[
    lexer("apacheconf", "ApacheConf", None),
    lexer("as", "ActionScript", Some("ActionScript")),
    lexer("bash", "Bash", Some("Bourne Again Shell (bash)")),
    lexer("bbcode", "BBCode", None),
    lexer("c", "C", Some("C")),
    lexer("cpp", "C++", Some("C++")),
    lexer("csharp", "C#", Some("C#")),
    lexer("css", "CSS", Some("CSS")),
    lexer("diff", "Diff", Some("Diff")),
    lexer("django", "Django/Jinja", Some("HTML")),
    lexer("erlang", "Erlang", Some("Erlang")),
    lexer("html", "HTML", Some("HTML")),
    lexer("ini", "INI", None),
    lexer("irc", "IRC logs", None),
    lexer("java", "Java", Some("Java")),
    lexer("js", "JavaScript", Some("JavaScript")),
    lexer("jsp", "Java Server Page", Some("Java Server Page (JSP)")),
    lexer("lua", "Lua", Some("Lua")),
    lexer("make", "Makefile", Some("Makefile")),
    lexer("perl", "Perl", Some("Perl")),
    lexer("php", "PHP", Some("PHP")),
    lexer("pot", "Gettext Catalog", None),
    lexer("pycon", "Python console session", Some("Python")),
    lexer("pytb", "Python Traceback", None),
    lexer("python", "Python", Some("Python")),
    lexer("python3", "Python 3", Some("Python")),
    lexer("rb", "Ruby", Some("Ruby")),
    lexer("rst", "reStructuredText", Some("reStructuredText")),
    lexer("smarty", "Smarty", Some("HTML")),
    lexer("sql", "SQL", Some("SQL")),
    lexer("text", "Text only", None),
    lexer("xml", "XML", Some("XML")),
    lexer("yaml", "YAML", Some("YAML")),
];

/// All supported lexers, sorted by name
pub fn supported_lexers() -> &'static [LexerSpec] {
    LEXERS
}

/// Exact lookup (case-insensitive)
pub fn lexer_spec(name: &str) -> Option<&'static LexerSpec> {
    let name = name.trim();
    LEXERS
        .binary_search_by(|spec| cmp_ignore_case(spec.name, name))
        .ok()
        .map(|idx| &LEXERS[idx])
}

fn cmp_ignore_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// The plain-text entry
pub fn default_lexer() -> &'static LexerSpec {
    lexer_spec(DEFAULT_LEXER).unwrap_or(&LEXERS[0])
}

/// Lookup with plain-text fallback for unknown names
pub fn lexer_or_default(name: &str) -> &'static LexerSpec {
    lexer_spec(name).unwrap_or_else(default_lexer)
}

/// Resolve a caller-supplied lexer name for storage
///
/// Missing, blank, or unknown names fall back to plain text.
///
/// # Errors
///
/// Returns `Validation` when the name is malformed: longer than
/// [`MAX_LEXER_NAME_LEN`] or containing characters no lexer name uses.
pub fn resolve_lexer(name: Option<&str>) -> Result<&'static LexerSpec> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(default_lexer());
    };

    if name.chars().count() > MAX_LEXER_NAME_LEN {
        return Err(SnipError::validation(
            "lexer",
            format!("name longer than {} characters", MAX_LEXER_NAME_LEN),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.'))
    {
        return Err(SnipError::validation(
            "lexer",
            format!("'{}' contains unsupported characters", name),
        ));
    }

    Ok(lexer_or_default(name))
}
