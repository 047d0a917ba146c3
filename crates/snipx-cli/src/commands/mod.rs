//! CLI command implementations and shared setup

pub mod diff;
pub mod lexer;
pub mod snippet;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use rusqlite::Connection;
use snipx_core::logging_facility;
use snipx_core::scope::ScopeRequest;
use snipx_engine::{EngineContext, SnipxConfig};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: ./snipx.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path, overriding the configuration
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Group namespace as KIND:ID, e.g. project:alpha (default: global)
    #[arg(long, global = true, value_parser = parse_scope)]
    pub scope: Option<ScopeRequest>,
}

/// Everything a command needs after startup
pub struct Session {
    pub ctx: EngineContext,
    pub conn: Connection,
    pub scope: Option<ScopeRequest>,
}

/// Load configuration, start logging, open the store
pub fn open_session(global: &GlobalArgs) -> Result<Session, Box<dyn std::error::Error>> {
    let config = load_config(global)?;

    let db_path = global.db.clone().unwrap_or_else(|| config.store.path.clone());
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = snipx_store::db::open_store(&db_path)?;

    Ok(Session {
        ctx: EngineContext::from_config(&config),
        conn,
        scope: global.scope.clone(),
    })
}

/// Load configuration and start logging, without touching the store
pub fn load_config(global: &GlobalArgs) -> Result<SnipxConfig, Box<dyn std::error::Error>> {
    let config = SnipxConfig::load(global.config.as_deref())?;
    logging_facility::init(config.profile()?);
    Ok(config)
}

/// Contents of `path`, or stdin when absent or `-`
pub fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn parse_scope(raw: &str) -> Result<ScopeRequest, String> {
    let (kind, id) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:ID, got '{}'", raw))?;
    let kind = kind.parse().map_err(|e: snipx_core::SnipError| e.to_string())?;
    Ok(ScopeRequest::new(kind, id))
}
