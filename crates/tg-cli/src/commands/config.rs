//! Config command for printing the effective configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;

/// Writes the effective configuration as pretty JSON.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(())
}
