//! Content-based lexer detection
//!
//! Each lexer owns a handful of weighted patterns. A sample scores the sum of
//! the weights of every pattern it matches; the highest-scoring lexer wins
//! if it reaches [`MIN_CONFIDENCE`], ties going to the earlier table entry.

use std::sync::OnceLock;

use regex::Regex;

use super::registry::{LEXERS, DEFAULT_LEXER};

/// Score a lexer needs before its guess is trusted
pub const MIN_CONFIDENCE: u32 = 3;

/// Samples are truncated to this many bytes before matching.
const MAX_SAMPLE_BYTES: usize = 64 * 1024;

const RULES: &[(&str, &str, u32)] = &[
    // Shebangs and unambiguous markers
    ("bash", r"\A#!.*\b(ba|z)?sh\b", 12),
    ("python", r"\A#!.*\bpython[0-9.]*\b", 12),
    ("perl", r"\A#!.*\bperl\b", 12),
    ("rb", r"\A#!.*\bruby\b", 12),
    ("php", r"<\?php", 12),
    ("xml", r"\A\s*<\?xml", 12),
    ("pytb", r"Traceback \(most recent call last\):", 12),
    ("jsp", r"<%@\s*page\b", 10),
    ("erlang", r"(?m)^-module\(", 10),
    ("pot", r#"(?m)^msgid """#, 10),
    // Diffs
    ("diff", r"(?m)^--- .*\n\+\+\+ ", 10),
    ("diff", r"(?m)^@@ -\d+(,\d+)? \+\d+(,\d+)? @@", 10),
    ("diff", r"(?m)^diff --git ", 10),
    // Python family
    ("pycon", r"(?m)^>>> ", 8),
    ("python", r"(?m)^\s*def \w+\(.*\)\s*(->.*)?:\s*$", 4),
    ("python", r"(?m)^\s*(from [\w.]+ import [\w., ]+|import [\w.]+(, [\w.]+)*)\s*$", 3),
    ("python", r"(?m)^\s*(elif .*:|except\b.*:|class \w+(\(.*\))?:)\s*$", 3),
    ("python", r"\bprint\(", 1),
    ("python", r"\bself\.", 1),
    // Shell
    ("bash", r"(?m)^\s*(fi|done|esac)\s*$", 3),
    ("bash", r"(?m)^\s*(echo|export) ", 2),
    // Markup and templates
    ("html", r"(?i)<!DOCTYPE html", 10),
    ("html", r"(?i)<html[\s>]", 8),
    ("html", r"(?i)</(div|body|head|p|span|table)>", 3),
    ("django", r"\{%\s*(block|extends|for|if|load|include)\b", 8),
    ("smarty", r"\{\$\w+", 6),
    ("bbcode", r"(?i)\[(b|i|url|quote|code)\][\s\S]*?\[/(b|i|url|quote|code)\]", 6),
    ("rst", r"(?m)^\.\. \w+::", 8),
    ("rst", r"(?m)^(={3,}|-{3,}|~{3,})\s*$", 2),
    // C family
    ("cpp", r"(?m)^\s*#include\s*<(iostream|vector|string|map|memory)>", 6),
    ("cpp", r"\bstd::", 5),
    ("cpp", r"(?m)^\s*(template\s*<|namespace\s+\w+\s*\{)", 4),
    ("c", r#"(?m)^\s*#include\s*[<"]"#, 5),
    ("c", r"\bint\s+main\s*\(", 3),
    ("c", r"\bprintf\s*\(", 2),
    ("csharp", r"(?m)^\s*using System(\.\w+)*;", 8),
    ("csharp", r"\bConsole\.Write(Line)?\(", 5),
    ("java", r"(?m)^\s*import javax?\.[\w.]+;", 8),
    ("java", r"public static void main\s*\(String", 8),
    ("java", r"System\.out\.print", 5),
    ("as", r"\bimport flash\.", 8),
    // Scripting
    ("js", r"\bconsole\.log\(", 5),
    ("js", r#"\brequire\(['"]"#, 3),
    ("js", r"(?m)^\s*(const|let|var) \w+ = ", 2),
    ("js", r"\bfunction\s*\w*\s*\(", 2),
    ("js", r"=>\s*\{", 2),
    ("rb", r#"(?m)^\s*require ['"]"#, 3),
    ("rb", r"(?m)^\s*def \w+[?!]?(\(.*\))?\s*$", 3),
    ("rb", r"\.each do\b", 4),
    ("rb", r"(?m)^\s*end\s*$", 2),
    ("rb", r"\bputs\b", 2),
    ("perl", r"(?m)^\s*use strict;", 8),
    ("perl", r"\bmy\s+[$@%]\w+", 4),
    ("lua", r"(?m)^\s*local function\b", 6),
    ("lua", r"(?m)^\s*local \w+\s*=", 4),
    ("erlang", r"(?m)^-export\(\[", 8),
    // Data and configuration
    ("sql", r"(?i)\bcreate\s+table\b", 6),
    ("sql", r"(?i)\binsert\s+into\b", 5),
    ("sql", r"(?i)\bupdate\s+\w+\s+set\b", 5),
    ("sql", r"(?i)\bselect\b[\s\S]+?\bfrom\b", 4),
    ("apacheconf", r"(?m)^\s*<(VirtualHost|Directory|IfModule)\b", 10),
    ("apacheconf", r"(?m)^\s*(ServerName|DocumentRoot|RewriteRule)\b", 6),
    ("make", r"(?m)^[\w.%-]+\s*:[^=\n]*\n\t", 6),
    ("make", r"\$\(\w+\)", 2),
    ("ini", r"(?m)^\[[\w .-]+\]\s*$", 4),
    ("ini", r"(?m)^[\w.]+\s*=\s*\S", 1),
    ("yaml", r"(?m)^---\s*$", 3),
    ("yaml", r"(?m)^[\w-]+:\s+\S", 1),
    ("yaml", r#"(?m)^\s*- [\w"']"#, 1),
    ("css", r"(?m)^\s*[.#]?[\w-]+(\s*[,>+~ ]\s*[.#]?[\w-]+)*\s*\{\s*$", 3),
    ("css", r"(?m)^\s*[\w-]+\s*:\s*[^;\n]+;\s*$", 2),
    ("irc", r"(?m)^\[?\d{2}:\d{2}(:\d{2})?\]?\s*<[^>]+>", 8),
];

fn compiled_rules() -> &'static [(&'static str, Regex, u32)] {
    static COMPILED: OnceLock<Vec<(&'static str, Regex, u32)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .filter_map(|(lexer, pattern, weight)| match Regex::new(pattern) {
                Ok(re) => Some((*lexer, re, *weight)),
                Err(err) => {
                    tracing::debug!(lexer, error = %err, "skipping invalid guess rule");
                    None
                }
            })
            .collect()
    })
}

/// Score of every lexer with at least one matching rule, in table order
pub fn score_sample(sample: &str) -> Vec<(&'static str, u32)> {
    let sample = truncate(sample);
    let rules = compiled_rules();

    LEXERS
        .iter()
        .filter_map(|spec| {
            let score: u32 = rules
                .iter()
                .filter(|(lexer, re, _)| *lexer == spec.name && re.is_match(sample))
                .map(|(_, _, weight)| weight)
                .sum();
            (score > 0).then_some((spec.name, score))
        })
        .collect()
}

/// Best-guess lexer name, or [`DEFAULT_LEXER`]
pub fn guess_lexer(sample: &str) -> &'static str {
    if sample.trim().is_empty() {
        return DEFAULT_LEXER;
    }

    let mut best: Option<(&'static str, u32)> = None;
    for (name, score) in score_sample(sample) {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((name, score));
        }
    }

    match best {
        Some((name, score)) if score >= MIN_CONFIDENCE => name,
        _ => DEFAULT_LEXER,
    }
}

fn truncate(sample: &str) -> &str {
    if sample.len() <= MAX_SAMPLE_BYTES {
        return sample;
    }
    let mut end = MAX_SAMPLE_BYTES;
    while !sample.is_char_boundary(end) {
        end -= 1;
    }
    &sample[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::registry::lexer_spec;

    #[test]
    fn test_every_rule_compiles_and_names_a_listed_lexer() {
        assert_eq!(compiled_rules().len(), RULES.len());
        for (lexer, _, _) in RULES {
            assert!(lexer_spec(lexer).is_some(), "{} is not listed", lexer);
        }
    }

    #[test]
    fn test_guesses_common_samples() {
        let cases = [
            ("def greet(name):\n    return 'hi ' + name\n", "python"),
            ("#!/bin/bash\necho hello\n", "bash"),
            ("<?php echo 'x'; ?>", "php"),
            ("#include <iostream>\nint main() { std::cout << 1; }\n", "cpp"),
            ("#include <stdio.h>\nint main(void) { printf(\"x\"); }\n", "c"),
            ("SELECT id FROM users WHERE id = 1;", "sql"),
            ("--- Original\n+++ Current\n@@ -1 +1 @@\n-a\n+b", "diff"),
            ("Traceback (most recent call last):\n  File \"x.py\"", "pytb"),
            (">>> 1 + 1\n2\n", "pycon"),
            ("<!DOCTYPE html>\n<html><body></body></html>", "html"),
        ];
        for (sample, expected) in cases {
            assert_eq!(guess_lexer(sample), expected, "sample: {:?}", sample);
        }
    }

    #[test]
    fn test_unconfident_guess_is_plain_text() {
        assert_eq!(guess_lexer(""), DEFAULT_LEXER);
        assert_eq!(guess_lexer("just a few words of prose"), DEFAULT_LEXER);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let sample = "é".repeat(MAX_SAMPLE_BYTES);
        let cut = truncate(&sample);
        assert!(cut.len() <= MAX_SAMPLE_BYTES);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
