//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::types::{state_label, ProbeState, ScannedAsset};
use console::{style, Style};
use std::io::{self, Write};

const RULE: &str = "───────────────────────────────────────────────────────────────────────";

/// Write assets as a human-readable table.
pub fn write_plain<W: Write>(out: &mut W, assets: &[ScannedAsset]) -> io::Result<()> {
    if assets.is_empty() {
        writeln!(out, "  {}", style("No cached assets.").dim())?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(
        out,
        "  {:<24}  {:>6}  {:<10}  {:<14}  {}",
        style("HOST").bold(),
        style("PORT").bold(),
        style("PROTOCOL").bold(),
        style("STATE").bold(),
        style("TIMESTAMP").bold()
    )?;
    writeln!(out, "  {}", style(RULE).dim())?;

    for asset in assets {
        let state_style = match asset.probe_state() {
            Some(state) if state.is_open() => Style::new().green().bold(),
            Some(ProbeState::Closed) => Style::new().red(),
            Some(_) => Style::new().yellow(),
            None => Style::new().dim(),
        };

        writeln!(
            out,
            "  {:<24}  {:>6}  {:<10}  {:<14}  {}",
            truncate_string(&asset.host, 24),
            asset.port,
            asset.protocol.as_deref().unwrap_or("-"),
            state_style.apply_to(state_label(asset.state)),
            style(asset.timestamp.format("%Y-%m-%d %H:%M:%S")).dim()
        )?;
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(out, "  {} asset(s)", style(assets.len()).bold())?;
    writeln!(out)?;

    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Truncate a string to a maximum length, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
