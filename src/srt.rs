use std::time::Duration;

pub const ZERO_TIME: Duration = Duration::from_millis(0);

#[derive(Debug, PartialEq)]
pub struct Subtitle {
    pub(crate) start: Duration,
    pub(crate) end: Duration,
    pub(crate) text: Vec<String>,
}

impl Subtitle {
    pub fn new(start: Duration, end: Duration, text: Vec<String>) -> Self {
        Self { start, end, text }
    }
}

// Held and written in collection order; nothing requires the collection to
// be sorted by time. Blocks carry no index of their own, the serialiser
// derives it from position.
#[derive(Debug, PartialEq)]
pub struct Srt {
    pub(crate) subtitles: Vec<Subtitle>,
}

impl Srt {
    pub fn new() -> Self {
        Self {
            subtitles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.subtitles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.is_empty()
    }
}
