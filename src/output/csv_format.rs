//! CSV output formatting.

use crate::types::ScannedAsset;
use std::io::{self, Write};

/// Write assets in CSV format.
pub fn write_csv<W: Write>(out: &mut W, assets: &[ScannedAsset]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["host", "port", "protocol", "state", "timestamp"])?;

    for asset in assets {
        wtr.write_record([
            asset.host.as_str(),
            asset.port.to_string().as_str(),
            asset.protocol.as_deref().unwrap_or(""),
            asset.state.to_string().as_str(),
            asset.timestamp.to_rfc3339().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
