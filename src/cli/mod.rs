//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `assetcache init` - Create the cache if it does not exist
//! - `assetcache list` - Show cached assets
//! - `assetcache import [FILE]` - Upsert prober output
//! - `assetcache delete HOST:PORT...` - Remove assets

mod delete;
mod import;
mod init;
mod list;

pub use delete::DeleteCommand;
pub use import::ImportCommand;
pub use init::InitCommand;
pub use list::ListCommand;

use crate::config::{AppSettings, Paths};
use crate::error::{CliResult, ConfigError, ConfigResult};
use crate::storage::AssetCache;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// assetcache - A local cache of discovered network assets.
///
/// Records which hosts and ports were probed, with the protocol, state and
/// time observed, so scans can skip known assets and reports can show the
/// inventory found so far.
#[derive(Parser, Debug)]
#[command(name = "assetcache")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A local cache of discovered network assets", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the asset cache database
    #[arg(long, global = true, value_name = "PATH", env = "ASSETCACHE_PATH")]
    pub cache: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the asset cache if it does not exist
    Init(InitCommand),

    /// List cached assets ordered by host and port
    #[command(alias = "ls")]
    List(ListCommand),

    /// Insert or replace assets from prober JSON output
    #[command(alias = "i")]
    Import(ImportCommand),

    /// Delete assets by host and port
    #[command(alias = "rm")]
    Delete(DeleteCommand),
}

/// Resolved settings and cache shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    /// Cache the command operates on.
    pub cache: AssetCache,
    /// Loaded application settings.
    pub settings: AppSettings,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl Cli {
    /// Load settings and resolve the cache path.
    ///
    /// XDG directories are only looked up when `--config` or the cache path
    /// leave something to find there.
    pub fn context(&self) -> CliResult<Context> {
        self.context_with(Paths::discover)
    }

    fn context_with<F>(&self, discover: F) -> CliResult<Context>
    where
        F: Fn() -> ConfigResult<Paths>,
    {
        let mut paths = None;
        let settings = match &self.config {
            Some(file) => AppSettings::load_from(file)?,
            None => {
                let discovered = discover()?;
                let settings = AppSettings::load(&discovered)?;
                paths = Some(discovered);
                settings
            }
        };

        let cache_path = match settings.resolve_cache_path(self.cache.as_deref()) {
            Some(path) => path,
            None => match paths {
                Some(paths) => paths.default_cache_file(),
                None => discover()?.default_cache_file(),
            },
        };
        let cache = AssetCache::new(cache_path).with_busy_timeout(settings.busy_timeout());

        Ok(Context {
            cache,
            settings,
            quiet: self.quiet,
        })
    }

    /// Run the selected subcommand.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.execute(ctx),
            Commands::List(cmd) => cmd.execute(ctx),
            Commands::Import(cmd) => cmd.execute(ctx),
            Commands::Delete(cmd) => cmd.execute(ctx),
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}
