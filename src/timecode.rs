use crate::errors::TimecodeError;

// @module: SRT timestamp encoding and decoding

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
///
/// Hours are not capped at two digits; a track longer than 99 hours
/// simply widens the field.
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse an SRT timestamp to milliseconds
///
/// Accepts both `HH:MM:SS,mmm` and `HH:MM:SS.mmm`. The caller decides
/// whether a failure means skipping the enclosing block or zero-filling.
pub fn parse_timestamp(timestamp: &str) -> Result<u64, TimecodeError> {
    let malformed = || TimecodeError::MalformedTimestamp(timestamp.to_string());

    // Exactly three colon-delimited segments, then one fractional segment
    let (head, frac) = timestamp.split_once([',', '.']).ok_or_else(malformed)?;
    if frac.contains([',', '.']) {
        return Err(malformed());
    }

    let head_parts: Vec<&str> = head.split(':').collect();
    if head_parts.len() != 3 {
        return Err(malformed());
    }

    let parse_segment = |s: &str| s.trim().parse::<u64>().map_err(|_| malformed());
    let hours = parse_segment(head_parts[0])?;
    let minutes = parse_segment(head_parts[1])?;
    let seconds = parse_segment(head_parts[2])?;
    let millis = parse_segment(frac)?;

    // Validate time components; hours are unbounded
    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(malformed());
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Format milliseconds as MM:SS for display in playback UIs
pub fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1_000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
