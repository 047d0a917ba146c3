//! Snippet commands
//!
//! Usage:
//!   snipx new [FILE] [--lexer <NAME>] [--parent <CODE>] [--title ..] [--author ..]
//!   snipx show <CODE> [--raw | --json]
//!   snipx tree <CODE>
//!   snipx delete <CODE>
//!   snipx recent [--limit <N>]
//!   snipx fork <CODE>

use std::path::PathBuf;

use clap::Args;
use snipx_core::Snippet;
use snipx_engine::commands::snippet::{
    snippet_create, snippet_delete, snippet_fork_template, snippet_get, snippet_list_recent,
    snippet_raw, snippet_tree, CreateRequest, DEFAULT_RECENT_LIMIT,
};

use super::{open_session, read_input, CliResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// File to read content from (default: stdin)
    pub file: Option<PathBuf>,

    /// Lexer name (see `snipx lexers`)
    #[arg(short, long, conflicts_with = "guess")]
    pub lexer: Option<String>,

    /// Pick the lexer from the content
    #[arg(short, long)]
    pub guess: bool,

    /// Short code of the snippet this one forks
    #[arg(short, long)]
    pub parent: Option<String>,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub author: Option<String>,

    /// Lifetime in seconds
    #[arg(long)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub short_code: String,

    /// Print the content as submitted
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Print the full snippet as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CodeArgs {
    pub short_code: String,
}

#[derive(Debug, Args)]
pub struct RecentArgs {
    #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: usize,
}

pub fn execute_new(global: &GlobalArgs, args: NewArgs) -> CliResult {
    let session = open_session(global)?;
    let raw_content = read_input(args.file.as_deref())?;

    let lexer = if args.guess {
        Some(session.ctx.highlighter.guess_lexer(&raw_content).to_string())
    } else {
        args.lexer
    };

    let snippet = snippet_create(
        CreateRequest {
            raw_content,
            lexer,
            parent_short_code: args.parent,
            scope: session.scope.clone(),
            author: args.author,
            title: args.title,
            expires_in_secs: args.expires_in,
        },
        &session.ctx,
        &session.conn,
    )?;

    println!("✓ Created {} ({})", snippet.short_code(), snippet.lexer());
    println!("{}", snippet.permalink());
    Ok(())
}

pub fn execute_show(global: &GlobalArgs, args: ShowArgs) -> CliResult {
    let session = open_session(global)?;
    let scope = session.scope.as_ref();

    if args.raw {
        let raw = snippet_raw(scope, &args.short_code, &session.ctx, &session.conn)?;
        print!("{}", raw);
        return Ok(());
    }

    let snippet = snippet_get(scope, &args.short_code, &session.ctx, &session.conn)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snippet)?);
        return Ok(());
    }

    println!("{}", header(&snippet));
    let lines = snippet.rendered_lines();
    let width = lines.len().to_string().len();
    for (n, line) in lines.iter().enumerate() {
        println!("{:>width$}  {}", n + 1, line, width = width);
    }
    Ok(())
}

pub fn execute_tree(global: &GlobalArgs, args: CodeArgs) -> CliResult {
    let session = open_session(global)?;
    let tree = snippet_tree(
        session.scope.as_ref(),
        &args.short_code,
        &session.ctx,
        &session.conn,
    )?;

    for (depth, snippet) in with_depth(&tree) {
        let marker = if snippet.short_code() == args.short_code {
            " *"
        } else {
            ""
        };
        println!("{}{}{}", "  ".repeat(depth), header(snippet), marker);
    }
    Ok(())
}

pub fn execute_delete(global: &GlobalArgs, args: CodeArgs) -> CliResult {
    let session = open_session(global)?;
    let id = snippet_delete(
        session.scope.as_ref(),
        &args.short_code,
        &session.ctx,
        &session.conn,
    )?;

    println!("✓ Deleted {} (id {})", args.short_code, id);
    Ok(())
}

pub fn execute_recent(global: &GlobalArgs, args: RecentArgs) -> CliResult {
    let session = open_session(global)?;
    let snippets = snippet_list_recent(
        session.scope.as_ref(),
        args.limit,
        &session.ctx,
        &session.conn,
    )?;

    for snippet in &snippets {
        println!(
            "{}  {}",
            snippet.published_at().format("%Y-%m-%d %H:%M"),
            header(snippet)
        );
    }
    Ok(())
}

pub fn execute_fork(global: &GlobalArgs, args: CodeArgs) -> CliResult {
    let session = open_session(global)?;
    let template = snippet_fork_template(
        session.scope.as_ref(),
        &args.short_code,
        &session.ctx,
        &session.conn,
    )?;

    println!("{}", serde_json::to_string_pretty(&template)?);
    Ok(())
}

fn header(snippet: &Snippet) -> String {
    let mut out = format!(
        "{} #{} [{}]",
        snippet.short_code(),
        snippet.id(),
        snippet.lexer()
    );
    if let Some(title) = snippet.title() {
        out.push_str(&format!(" {}", title));
    }
    if let Some(author) = snippet.author() {
        out.push_str(&format!(" by {}", author));
    }
    out
}

/// Depth of each snippet in a pre-order tree listing
fn with_depth(tree: &[Snippet]) -> Vec<(usize, &Snippet)> {
    let mut depths: Vec<(i64, usize)> = Vec::new();
    tree.iter()
        .map(|snippet| {
            let depth = snippet
                .parent_id()
                .and_then(|p| depths.iter().find(|(id, _)| *id == p))
                .map_or(0, |(_, d)| d + 1);
            depths.push((snippet.id(), depth));
            (depth, snippet)
        })
        .collect()
}
