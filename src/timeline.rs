use std::fmt;
use std::sync::Arc;
use parking_lot::RwLock;

use crate::errors::SyncError;
use crate::subtitle::{self, LyricLine};

// @module: Ordered lyric timeline container

/// Ordered collection of lyric lines
///
/// Order is reading order, which is not necessarily sorted by time while a
/// manual sync session is in progress. Invariants (contiguity, end >= start)
/// are established by the sync engine, not assumed on raw input.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// List of lyric lines
    lines: Vec<LyricLine>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Timeline { lines: Vec::new() }
    }

    /// Build a timeline from raw lyric text, one line per non-blank row
    pub fn from_plain_text(content: &str) -> Self {
        Timeline {
            lines: subtitle::parse_plain_text(content),
        }
    }

    /// Build a timeline from an SRT document, skipping malformed blocks
    pub fn from_subtitle_document(content: &str) -> Self {
        Timeline {
            lines: subtitle::parse_document(content),
        }
    }

    /// Build a timeline from already-constructed lines
    pub fn from_lines(lines: Vec<LyricLine>) -> Self {
        Timeline { lines }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the timeline has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Borrow a line by index
    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    /// Borrow all lines in order
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Replace the line at `index` wholesale
    ///
    /// The only mutation primitive the sync engine needs; a line is always
    /// swapped as a unit so readers never see a torn start/end pair.
    pub fn replace(&mut self, index: usize, line: LyricLine) -> Result<(), SyncError> {
        let len = self.lines.len();
        match self.lines.get_mut(index) {
            Some(slot) => {
                *slot = line;
                Ok(())
            }
            None => Err(SyncError::IndexOutOfRange { index, len }),
        }
    }

    /// Total whitespace-delimited words across all lines
    pub fn total_word_count(&self) -> usize {
        self.lines.iter().map(|l| l.word_count()).sum()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Lyric Timeline")?;
        writeln!(f, "Lines: {}", self.lines.len())?;
        writeln!(f, "Words: {}", self.total_word_count())?;
        Ok(())
    }
}

/// Shared handle to a timeline for hosts that mutate and read on
/// separate threads
///
/// Mutations take the write lock for the whole operation, so a playback
/// reader never observes a partially-applied mark.
#[derive(Debug, Clone, Default)]
pub struct SharedTimeline {
    inner: Arc<RwLock<Timeline>>,
}

impl SharedTimeline {
    /// Wrap a timeline in a shared handle
    pub fn new(timeline: Timeline) -> Self {
        SharedTimeline {
            inner: Arc::new(RwLock::new(timeline)),
        }
    }

    /// Run a mutation against the timeline under the write lock
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut Timeline) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Run a read against the timeline under the read lock
    pub fn with_read<T>(&self, f: impl FnOnce(&Timeline) -> T) -> T {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Clone the current timeline contents out of the handle
    pub fn snapshot(&self) -> Timeline {
        self.inner.read().clone()
    }
}
