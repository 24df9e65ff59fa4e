use crate::error::SubshiftError;
use crate::srt::{Srt, Subtitle};
use crate::timecode;

use std::io::Write;

use anyhow::Result;

/// Writes the document in collection order. Whatever indices the input
/// carried are gone; a 1-based index is regenerated from position here.
pub fn serialise<W: Write>(srt: &Srt, buf: &mut W) -> Result<()> {
    if srt.is_empty() {
        return Err(SubshiftError::EmptyDocument.into());
    }
    for (position, sub) in srt.subtitles.iter().enumerate() {
        write_sub(buf, position + 1, sub)?;
    }
    Ok(())
}

fn write_sub<W: Write>(buf: &mut W, index: usize, sub: &Subtitle) -> Result<()> {
    writeln!(buf, "{}", index)?;
    writeln!(buf, "{}", timecode::format_time_range(sub.start, sub.end))?;
    for line in &sub.text {
        writeln!(buf, "{}", line)?;
    }
    writeln!(buf)?;
    Ok(())
}
