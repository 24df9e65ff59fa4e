use crate::error::SubshiftError;

use std::time::Duration;

use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space0};
use nom::combinator::map_res;
use nom::error::{convert_error, VerboseError};
use nom::sequence::tuple;
use nom::{Err, IResult};

/// The literal that makes a line a boundary line; SRT compatibility hinges
/// on the exact string.
pub const TIME_SEPARATOR: &str = " --> ";

/// Reads a `H:M:S,mmm --> H:M:S,mmm` line into a pair of offsets from the
/// zero epoch. Fields take any width; anything after the second timecode on
/// the line is ignored.
pub fn parse_time_range(line: &str) -> Result<(Duration, Duration), SubshiftError> {
    match time_range(line) {
        Ok((_, range)) => Ok(range),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => Err(SubshiftError::MalformedTimecode {
            line: line.to_string(),
            cause: convert_error(line, err),
        }),
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

pub fn format_time_range(start: Duration, end: Duration) -> String {
    format!(
        "{}{}{}",
        format_timestamp(start),
        TIME_SEPARATOR,
        format_timestamp(end)
    )
}

pub fn format_timestamp(timestamp: Duration) -> String {
    let total_secs = timestamp.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = timestamp.as_millis() % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

fn time_range(input: &str) -> IResult<&str, (Duration, Duration), VerboseError<&str>> {
    let (input, _) = space0(input)?;
    let (input, start) = timestamp(input)?;
    let (input, _) = tag(TIME_SEPARATOR)(input)?;
    let (input, end) = timestamp(input)?;

    Ok((input, (start, end)))
}

fn timestamp(input: &str) -> IResult<&str, Duration, VerboseError<&str>> {
    map_res(
        tuple((number, tag(":"), number, tag(":"), number, tag(","), number)),
        |(hours, _, minutes, _, seconds, _, millis)| {
            combine(hours, minutes, seconds, millis).ok_or("timecode out of range")
        },
    )(input)
}

// Fields take any width, so the fold is checked; a timecode past the u64
// millisecond range is a scan failure, not a wrap-around.
fn combine(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Duration> {
    let total = millis
        .checked_add(seconds.checked_mul(1000)?)?
        .checked_add(minutes.checked_mul(60 * 1000)?)?
        .checked_add(hours.checked_mul(60 * 60 * 1000)?)?;
    Some(Duration::from_millis(total))
}

fn number(input: &str) -> IResult<&str, u64, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}

/// Clap value parser: an optional `+`/`-` sign, then a bare millisecond
/// count or a `H:M:S,mmm` timecode.
pub fn parse_offset(arg: &str) -> Result<i64, String> {
    let (negative, rest) = match arg.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, arg.strip_prefix('+').unwrap_or(arg)),
    };
    let millis = parse_millis(rest)? as i64;
    Ok(if negative { -millis } else { millis })
}

pub fn parse_position(arg: &str) -> Result<Duration, String> {
    Ok(Duration::from_millis(parse_millis(arg)?))
}

fn parse_millis(arg: &str) -> Result<u64, String> {
    if arg.contains(':') {
        match timestamp(arg) {
            Ok(("", parsed)) => Ok(parsed.as_millis() as u64),
            _ => Err(format!(
                "expected a timecode shaped like 01:02:03,400, got '{}'",
                arg
            )),
        }
    } else {
        arg.parse()
            .map_err(|_| format!("expected a millisecond count or a timecode, got '{}'", arg))
    }
}
