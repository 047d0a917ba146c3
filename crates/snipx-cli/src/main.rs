//! snipx CLI
//!
//! Command-line interface for snipx

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "snipx")]
#[command(about = "snipx - Snippet lineage and rendering", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a snippet (optionally as a fork of another)
    New(commands::snippet::NewArgs),
    /// Show a snippet
    Show(commands::snippet::ShowArgs),
    /// Print the fork tree a snippet belongs to
    Tree(commands::snippet::CodeArgs),
    /// Delete a snippet
    Delete(commands::snippet::CodeArgs),
    /// List the newest snippets
    Recent(commands::snippet::RecentArgs),
    /// Print the pre-filled values for forking a snippet
    Fork(commands::snippet::CodeArgs),
    /// Diff two snippets by numeric id
    Diff(commands::diff::DiffArgs),
    /// Guess the lexer of a code sample
    Guess(commands::lexer::GuessArgs),
    /// List supported lexers
    Lexers(commands::lexer::LexersArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New(args) => commands::snippet::execute_new(&cli.global, args),
        Commands::Show(args) => commands::snippet::execute_show(&cli.global, args),
        Commands::Tree(args) => commands::snippet::execute_tree(&cli.global, args),
        Commands::Delete(args) => commands::snippet::execute_delete(&cli.global, args),
        Commands::Recent(args) => commands::snippet::execute_recent(&cli.global, args),
        Commands::Fork(args) => commands::snippet::execute_fork(&cli.global, args),
        Commands::Diff(args) => commands::diff::execute(&cli.global, args),
        Commands::Guess(args) => commands::lexer::execute_guess(&cli.global, args),
        Commands::Lexers(args) => commands::lexer::execute_lexers(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
