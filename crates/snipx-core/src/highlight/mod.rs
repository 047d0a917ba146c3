//! Syntax highlighting
//!
//! [`Highlighter::render`] turns raw text into HTML-safe, class-annotated
//! markup with no surrounding document, `<pre>` block, or line numbers, so
//! the presentation layer can wrap and number lines itself.
//!
//! Each output line is self-contained: spans still open at the end of a line
//! are closed before its terminator and reopened on the next line, so a
//! multi-line token never straddles two lines. Lines split on `\n`, with a
//! preceding `\r` kept as part of the terminator.
//!
//! ## Guarantees
//!
//! - **Determinism**: identical `(text, lexer)` inputs produce byte-identical output.
//! - **Total**: rendering never fails; unknown lexers and backend errors fall
//!   back to escaped plain text.
//! - **Shared read-only state**: the syntax definitions are loaded once and
//!   only read afterwards, so a `Highlighter` can be used from any thread.

pub mod guess;
pub mod registry;

use std::sync::OnceLock;

use syntect::html::{line_tokens_to_classed_spans, ClassStyle};
use syntect::parsing::{ParseState, ScopeStack, ScopeStackOp, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

pub use registry::{
    lexer_spec, resolve_lexer, supported_lexers, LexerSpec, DEFAULT_LEXER, DIFF_LEXER,
    LEXER_LIST_VERSION,
};

static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Highlighting front end over the bundled syntax definitions
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    syntaxes: &'static SyntaxSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: syntax_set(),
        }
    }

    /// Render `raw` with the named lexer
    ///
    /// Unknown lexer names render as plain text.
    pub fn render(&self, raw: &str, lexer: &str) -> String {
        let spec = registry::lexer_or_default(lexer);
        let syntax = self.syntax_for(spec);

        match self.render_with(raw, syntax) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::debug!(lexer = spec.name, error = %err, "highlighting failed, escaping as plain text");
                html_escape::encode_text(raw).into_owned()
            }
        }
    }

    /// Best-guess lexer name for a code sample
    ///
    /// Returns [`DEFAULT_LEXER`] when no heuristic is confident.
    pub fn guess_lexer(&self, sample: &str) -> &'static str {
        guess::guess_lexer(sample)
    }

    fn syntax_for(&self, spec: &LexerSpec) -> &'static SyntaxReference {
        spec.syntax
            .and_then(|name| self.syntaxes.find_syntax_by_name(name))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    fn render_with(
        &self,
        raw: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, syntect::Error> {
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut out = String::with_capacity(raw.len() * 2);

        for line in LinesWithEndings::from(raw) {
            let (text, ending) = split_line_ending(line);
            // Ops past the text belong to the terminator, which stays outside every span.
            let ops: Vec<(usize, ScopeStackOp)> = state
                .parse_line(line, self.syntaxes)?
                .into_iter()
                .map(|(index, op)| (index.min(text.len()), op))
                .collect();

            for scope in stack.as_slice() {
                out.push_str("<span class=\"");
                out.push_str(&scope.build_string().replace('.', " "));
                out.push_str("\">");
            }
            let (spans, _) =
                line_tokens_to_classed_spans(text, &ops, ClassStyle::Spaced, &mut stack)?;
            out.push_str(&spans);
            out.push_str(&"</span>".repeat(stack.len()));
            out.push_str(ending);
        }

        Ok(out)
    }
}

/// Split a line into its text and its `\n` or `\r\n` terminator
fn split_line_ending(line: &str) -> (&str, &str) {
    let text = line
        .strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l));
    line.split_at(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_renders_tokenized_markup() {
        let highlighter = Highlighter::new();
        let raw = "print('hi')";
        let rendered = highlighter.render(raw, "python");

        assert!(!rendered.is_empty());
        assert_ne!(rendered, raw);
        assert!(rendered.contains("<span class=\""));
        assert!(!rendered.contains("<pre"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let highlighter = Highlighter::new();
        let raw = "SELECT id, name FROM users WHERE id = 1;\n";
        assert_eq!(highlighter.render(raw, "sql"), highlighter.render(raw, "sql"));
    }

    #[test]
    fn test_unknown_lexer_falls_back_to_plain_text() {
        let highlighter = Highlighter::new();
        let raw = "IDENTIFICATION DIVISION.\n";
        assert_eq!(
            highlighter.render(raw, "cobol-nonexistent"),
            highlighter.render(raw, DEFAULT_LEXER)
        );
    }

    #[test]
    fn test_output_is_html_safe() {
        let highlighter = Highlighter::new();
        let rendered = highlighter.render("<script>alert(1)</script>", DEFAULT_LEXER);
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_plain_text_line_is_closed_before_newline() {
        let highlighter = Highlighter::new();
        assert_eq!(
            highlighter.render("hello\n", DEFAULT_LEXER),
            "<span class=\"text plain\">hello</span>\n"
        );
    }

    #[test]
    fn test_multiline_string_keeps_lines_balanced() {
        let highlighter = Highlighter::new();
        let raw = "def f():\n    return '''a\nb'''\n";

        let rendered = highlighter.render(raw, "python");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), raw.lines().count());
        assert!(rendered.ends_with("</span>\n"));
        for line in &lines {
            assert_eq!(
                line.matches("<span").count(),
                line.matches("</span>").count(),
                "unbalanced line: {}",
                line
            );
        }
        // The string opened on line 2 is reopened on line 3
        assert!(lines[2].starts_with("<span class=\"source python\">"));
        assert!(lines[2].contains("string"));
    }

    #[test]
    fn test_crlf_terminator_stays_outside_spans() {
        let highlighter = Highlighter::new();
        let rendered = highlighter.render("a = 1\r\nb = 2\r\n", "python");

        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(rendered.matches("</span>\r\n").count(), 2);
    }

    #[test]
    fn test_split_line_ending() {
        assert_eq!(split_line_ending("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_line_ending("a\n"), ("a", "\n"));
        assert_eq!(split_line_ending("a\rb"), ("a\rb", ""));
    }

    #[test]
    fn test_every_listed_lexer_renders() {
        let highlighter = Highlighter::new();
        for spec in supported_lexers() {
            let rendered = highlighter.render("a = 1\n", spec.name);
            assert!(!rendered.is_empty(), "{} rendered nothing", spec.name);
        }
    }
}
