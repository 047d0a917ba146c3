//! Lexer commands
//!
//! Usage:
//!   snipx guess [FILE]
//!   snipx lexers [--json]

use std::path::PathBuf;

use clap::Args;
use snipx_engine::commands::lexer::{lexer_guess, lexer_list};
use snipx_engine::EngineContext;

use super::{load_config, read_input, CliResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct GuessArgs {
    /// File holding the sample (default: stdin)
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LexersArgs {
    /// Print the versioned list as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute_guess(global: &GlobalArgs, args: GuessArgs) -> CliResult {
    let config = load_config(global)?;
    let sample = read_input(args.file.as_deref())?;

    let guess = lexer_guess(&sample, &EngineContext::from_config(&config));
    println!("{}", guess.lexer);
    Ok(())
}

pub fn execute_lexers(args: LexersArgs) -> CliResult {
    let list = lexer_list();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    for lexer in list.lexers {
        println!("{:<12} {}", lexer.name, lexer.label);
    }
    Ok(())
}
