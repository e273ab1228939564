//! List subcommand implementation.
//!
//! Handles `assetcache list` for reporting previously discovered assets.

use super::{Context, OutputFormat};
use crate::error::{CacheError, CliResult};
use crate::output;
use clap::Parser;
use tracing::debug;

/// List cached assets ordered by host and port.
#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only show assets for this host
    #[arg(long)]
    pub host: Option<String>,

    /// Fail if the cache does not exist instead of listing nothing
    #[arg(long)]
    pub strict: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let format = match self.format {
            Some(format) => format,
            None => ctx
                .settings
                .default_output_format
                .parse()
                .map_err(crate::error::CliError::Other)?,
        };

        let mut assets = match ctx.cache.list() {
            Ok(assets) => assets,
            Err(CacheError::NotFound(path)) if !self.strict => {
                debug!(path = %path.display(), "no asset cache yet");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(ref host) = self.host {
            assets.retain(|a| &a.host == host);
        }

        output::print_assets(&assets, format)?;
        Ok(())
    }
}
