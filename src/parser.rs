use crate::srt::{Srt, Subtitle};
use crate::timecode;

use std::mem;

use anyhow::Context;

/// Rebuilds an [`Srt`] document from decoded text in one forward pass. A
/// line containing the timecode separator starts a new subtitle; every other
/// line is buffered as text. Only when the next boundary arrives does it
/// become clear that the last buffered line was an index line and the line
/// before it the blank separator, so those two are stripped at that point.
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    pub fn parse(&mut self, input: &str) -> Result<Srt, anyhow::Error> {
        let mut srt = Srt::new();
        let mut text: Vec<String> = Vec::new();

        for line in input.lines() {
            if line.contains(timecode::TIME_SEPARATOR) {
                strip_index_and_separator(&mut text);
                flush(&mut srt, &mut text);
                let (start, end) =
                    timecode::parse_time_range(line).context("Failed to parse SRT file")?;
                srt.subtitles.push(Subtitle::new(start, end, Vec::new()));
            } else {
                text.push(line.to_string());
            }
        }

        // End of input closes the last subtitle. Only the blank separator can
        // be stripped here; no index line follows the end of the stream.
        if text.last().map_or(false, |line| line.is_empty()) {
            text.pop();
        }
        flush(&mut srt, &mut text);

        Ok(srt)
    }
}

// Tolerates a buffer with nothing left to strip, which is the state when
// the very first line of the input is a boundary.
fn strip_index_and_separator(text: &mut Vec<String>) {
    text.pop();
    if text.last().map_or(false, |line| line.is_empty()) {
        text.pop();
    }
}

// Text gathered before the first boundary belongs to no subtitle.
fn flush(srt: &mut Srt, text: &mut Vec<String>) {
    match srt.subtitles.last_mut() {
        Some(sub) => sub.text = mem::take(text),
        None => text.clear(),
    }
}
