//! Diff command
//!
//! Usage: snipx diff <ID_A> <ID_B> [--plain]

use clap::Args;
use snipx_engine::commands::diff::snippet_diff;

use super::{open_session, CliResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Id of the original snippet
    pub a: Option<String>,

    /// Id of the current snippet
    pub b: Option<String>,

    /// Print the unified diff without highlighting markup
    #[arg(long)]
    pub plain: bool,
}

pub fn execute(global: &GlobalArgs, args: DiffArgs) -> CliResult {
    let session = open_session(global)?;
    let diff = snippet_diff(
        session.scope.as_ref(),
        args.a.as_deref(),
        args.b.as_deref(),
        &session.ctx,
        &session.conn,
    )?;

    if args.plain {
        println!("{}", diff.unified_text());
    } else {
        println!("{}", diff.rendered_text());
    }
    Ok(())
}
