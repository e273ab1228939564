//! Init subcommand implementation.

use super::Context;
use crate::error::CliResult;
use crate::output;
use clap::Parser;

/// Create the asset cache if it does not exist.
#[derive(Parser, Debug)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        ctx.cache.ensure_schema()?;

        if !ctx.quiet {
            output::print_success(&format!(
                "Asset cache ready at {}",
                ctx.cache.path().display()
            ));
        }

        Ok(())
    }
}
