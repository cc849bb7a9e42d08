use std::fmt;
use std::fmt::Write as _;
use regex::Regex;
use once_cell::sync::Lazy;
use log::warn;
use uuid::Uuid;

use crate::timecode;

// @module: Subtitle document parsing and serialization

// @const: Blank-line block boundary (one or more blank lines)
static BLOCK_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap()
});

// @const: Timing line separator token
const TIMING_SEPARATOR: &str = "-->";

// @struct: Single lyric line with its display interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    // @field: Stable identity, survives time mutation
    pub id: Uuid,

    // @field: Displayed text
    pub text: String,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,
}

impl LyricLine {
    /// Creates a new lyric line with a fresh id
    pub fn new(text: String, start_time_ms: u64, end_time_ms: u64) -> Self {
        LyricLine {
            id: Uuid::new_v4(),
            text,
            start_time_ms,
            end_time_ms,
        }
    }

    /// Creates an unsynced line (both times zeroed)
    pub fn unsynced(text: String) -> Self {
        Self::new(text, 0, 0)
    }

    /// Number of whitespace-delimited words in the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether the given playback position falls inside this line's interval
    ///
    /// Both boundaries are inclusive; tie-breaking between adjacent lines
    /// sharing a boundary is the tracker's concern.
    pub fn contains(&self, position_ms: u64) -> bool {
        self.start_time_ms <= position_ms && position_ms <= self.end_time_ms
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_timestamp(self.end_time_ms)
    }
}

impl fmt::Display for LyricLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)
    }
}

/// Parse an SRT-style document into lyric lines
///
/// The document is split on blank-line boundaries into blocks. Each block is
/// expected to carry a timing line containing `-->`; anything before it
/// (conventionally a sequence index) is ignored, everything after it is the
/// text payload, joined with single spaces. Malformed blocks are skipped with
/// a warning; the document as a whole never fails. When no block is valid the
/// result is simply empty.
pub fn parse_document(content: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();

    for (block_idx, block) in BLOCK_BOUNDARY_REGEX.split(content).enumerate() {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let block_lines: Vec<&str> = block.lines().collect();

        // Locate the timing line; lines before it are the sequence index
        let timing_pos = match block_lines.iter().position(|l| l.contains(TIMING_SEPARATOR)) {
            Some(pos) => pos,
            None => {
                warn!("Skipping block {}: no timing line found", block_idx + 1);
                continue;
            }
        };

        let (start_token, end_token) = match block_lines[timing_pos].split_once(TIMING_SEPARATOR) {
            Some((s, e)) => (s.trim(), e.trim()),
            None => {
                warn!("Skipping block {}: unsplittable timing line", block_idx + 1);
                continue;
            }
        };

        let start_ms = match timecode::parse_timestamp(start_token) {
            Ok(ms) => ms,
            Err(e) => {
                warn!("Skipping block {}: {}", block_idx + 1, e);
                continue;
            }
        };
        let end_ms = match timecode::parse_timestamp(end_token) {
            Ok(ms) => ms,
            Err(e) => {
                warn!("Skipping block {}: {}", block_idx + 1, e);
                continue;
            }
        };

        // Everything after the timing line, flattened to one display line
        let text = block_lines[timing_pos + 1..]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            warn!("Skipping block {}: empty text payload", block_idx + 1);
            continue;
        }

        lines.push(LyricLine::new(text, start_ms, end_ms));
    }

    lines
}

/// Parse raw lyric text into unsynced lines
///
/// One line per non-blank input line, order preserved, times zeroed.
pub fn parse_plain_text(content: &str) -> Vec<LyricLine> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| LyricLine::unsynced(l.to_string()))
        .collect()
}

/// Serialize lyric lines to an SRT document
///
/// Indexes start at 1; blocks are separated by a blank line. This is the
/// exact inverse of [`parse_document`] for entries with single-line text.
pub fn serialize_document(lines: &[LyricLine]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // write! to a String cannot fail
        let _ = writeln!(out, "{}", i + 1);
        let _ = write!(out, "{}", line);
    }
    out
}
