//! Import subcommand implementation.
//!
//! Handles `assetcache import [FILE]`, which upserts a JSON array of scanned
//! assets produced by a prober.

use super::Context;
use crate::error::CliResult;
use crate::output;
use crate::types::ScannedAsset;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Insert or replace assets from prober JSON output.
#[derive(Parser, Debug)]
pub struct ImportCommand {
    /// JSON file holding an array of assets (reads stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let content = match self.file.as_deref() {
            Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
            _ => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let parsed = parse_assets(&content)?;
        for rejected in &parsed.rejected {
            output::print_warning(&format!(
                "skipped record #{}: {}",
                rejected.index, rejected.reason
            ));
        }

        let report = ctx.cache.upsert(&parsed.assets)?;

        for failure in &report.failed {
            output::print_warning(&format!("skipped {}: {}", failure.key, failure.reason));
        }

        if !ctx.quiet {
            output::print_success(&format!(
                "Cached {} of {} asset(s) in {}",
                report.applied,
                report.attempted() + parsed.rejected.len(),
                ctx.cache.path().display()
            ));
        }

        Ok(())
    }
}

/// An input record that could not be read as an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the input array.
    pub index: usize,
    /// Why it was rejected.
    pub reason: String,
}

/// Prober output split into usable assets and rejected records.
#[derive(Debug, Default)]
pub struct ParsedAssets {
    pub assets: Vec<ScannedAsset>,
    pub rejected: Vec<RejectedRecord>,
}

/// Parse prober output into asset records.
///
/// The input must be a JSON array; each element is converted on its own so a
/// record with an out-of-range port or a bad timestamp only rejects itself.
pub fn parse_assets(content: &str) -> CliResult<ParsedAssets> {
    let records: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let mut parsed = ParsedAssets::default();

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<ScannedAsset>(record) {
            Ok(asset) => parsed.assets.push(asset),
            Err(e) => {
                debug!(index, error = %e, "rejected prober record");
                parsed.rejected.push(RejectedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(parsed)
}
