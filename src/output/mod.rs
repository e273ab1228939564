//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV listings of cached assets.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{print_error, print_info, print_success, print_warning, write_plain};

use crate::cli::OutputFormat;
use crate::types::ScannedAsset;
use std::io::{self, Write};

/// Format assets according to the specified format.
pub fn write_assets<W: Write>(out: &mut W, assets: &[ScannedAsset], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, assets),
        OutputFormat::Json => write_json(out, assets),
        OutputFormat::Csv => write_csv(out, assets),
    }
}

/// Format and print assets to stdout.
pub fn print_assets(assets: &[ScannedAsset], format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_assets(&mut out, assets, format)?;
    out.flush()
}
