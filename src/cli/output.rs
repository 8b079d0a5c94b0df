//! Output for CLI commands.
//!
//! stdout carries exactly one JSON line per invocation; logs go to stderr.

use std::io::Write;

use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::Result;

/// Write `envelope` as a single line and flush.
pub fn write_envelope<T: Serialize, W: Write>(
    envelope: &Envelope<T>,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "{}", envelope.to_json_line())?;
    writer.flush()?;
    Ok(())
}
