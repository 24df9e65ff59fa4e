use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SubshiftError {
    MalformedTimecode { line: String, cause: String },
    EmptyDocument,
    ZeroLengthTimeline,
}

impl Error for SubshiftError {}

impl fmt::Display for SubshiftError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubshiftError::MalformedTimecode { line, cause } => {
                write!(fmt, "Malformed timecode range {:?}: {}", line, cause)
            }
            SubshiftError::EmptyDocument => write!(fmt, "The document contains no subtitles."),
            SubshiftError::ZeroLengthTimeline => write!(
                fmt,
                "The last subtitle ends at 00:00:00,000; there is no timeline to sync against."
            ),
        }
    }
}
