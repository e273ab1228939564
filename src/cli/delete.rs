//! Delete subcommand implementation.

use super::Context;
use crate::error::CliResult;
use crate::output;
use crate::types::{AssetKey, ScannedAsset};
use clap::Parser;

/// Delete assets by host and port.
#[derive(Parser, Debug)]
pub struct DeleteCommand {
    /// Assets to delete as HOST:PORT ([ADDR]:PORT for IPv6)
    #[arg(value_name = "HOST:PORT", required_unless_present = "host")]
    pub keys: Vec<AssetKey>,

    /// Delete every cached port of this host
    #[arg(long, conflicts_with = "keys")]
    pub host: Option<String>,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let targets: Vec<ScannedAsset> = match self.host {
            Some(ref host) => ctx
                .cache
                .list()?
                .into_iter()
                .filter(|a| &a.host == host)
                .collect(),
            None => self.keys.iter().cloned().map(ScannedAsset::from).collect(),
        };

        if targets.is_empty() {
            if !ctx.quiet {
                output::print_info("No matching assets to delete.");
            }
            return Ok(());
        }

        let report = ctx.cache.delete(&targets)?;

        for failure in &report.failed {
            output::print_warning(&format!("could not delete {}: {}", failure.key, failure.reason));
        }

        if !ctx.quiet {
            output::print_success(&format!(
                "Removed {} asset(s) from {}",
                report.affected,
                ctx.cache.path().display()
            ));
        }

        Ok(())
    }
}
