//! Lexer queries: guess from a sample, list supported lexers.
//!
//! Neither touches the store. Guessing never fails; a sample nothing
//! recognises comes back as plain text.

use serde::Serialize;
use snipx_core::highlight::{supported_lexers, LexerSpec, LEXER_LIST_VERSION};
use snipx_core::{log_op_end, log_op_start};

use super::EngineContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerGuess {
    pub lexer: &'static str,
}

/// Versioned lexer table, as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerList {
    pub version: u32,
    pub lexers: &'static [LexerSpec],
}

pub fn lexer_guess(sample: &str, ctx: &EngineContext) -> LexerGuess {
    log_op_start!("lexer_guess", sample_len = sample.len());
    let start = std::time::Instant::now();

    let lexer = ctx.highlighter.guess_lexer(sample);

    log_op_end!(
        "lexer_guess",
        duration_ms = start.elapsed().as_millis() as u64,
        lexer = lexer
    );

    LexerGuess { lexer }
}

pub fn lexer_list() -> LexerList {
    LexerList {
        version: LEXER_LIST_VERSION,
        lexers: supported_lexers(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_python() {
        let ctx = EngineContext::new();
        let guess = lexer_guess("def main():\n    print('hi')\n", &ctx);
        assert_eq!(guess.lexer, "python");
    }

    #[test]
    fn test_guess_unrecognised_is_text() {
        let ctx = EngineContext::new();
        assert_eq!(lexer_guess("lorem ipsum", &ctx).lexer, "text");
    }

    #[test]
    fn test_list_is_versioned() {
        let list = lexer_list();
        assert_eq!(list.version, LEXER_LIST_VERSION);
        assert!(list.lexers.iter().any(|l| l.name == "python"));
    }
}
