//! JSON output formatting.

use crate::types::ScannedAsset;
use std::io::{self, Write};

/// Write assets as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, assets: &[ScannedAsset]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, assets).map_err(io::Error::other)?;
    writeln!(out)
}
