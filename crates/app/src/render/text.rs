use std::io::Write;

use engine::Summary;

use crate::error::Result;

/// Write `summary` as indented JSON followed by a newline.
pub fn write_report<W: Write>(mut out: W, summary: &Summary) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, summary)?;
    writeln!(out)?;
    Ok(())
}
