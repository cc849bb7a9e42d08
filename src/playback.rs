use crate::timeline::Timeline;

// @module: Active-line resolution during playback

/// Resolves the currently active lyric line for a playback position
///
/// Safe to call on every position update. When playback advances normally the
/// lookup starts from the last hit instead of re-scanning; a seek (position
/// jumping anywhere) just falls back to a full scan, never an error.
#[derive(Debug, Clone, Default)]
pub struct PlaybackTracker {
    /// Index of the last resolved line, used to bias the next lookup
    last_index: Option<usize>,
}

impl PlaybackTracker {
    /// Create a tracker with no lookup history
    pub fn new() -> Self {
        PlaybackTracker { last_index: None }
    }

    /// Forget the last hit, forcing the next lookup to scan
    pub fn reset(&mut self) {
        self.last_index = None;
    }

    /// Index of the line whose interval contains `position_ms`, if any
    ///
    /// Boundaries are inclusive; when a position sits exactly on the shared
    /// boundary between two adjacent lines the lower index wins. Stale or
    /// zeroed timings and gap positions resolve to `None`.
    pub fn active_index(&mut self, timeline: &Timeline, position_ms: u64) -> Option<usize> {
        let lines = timeline.lines();

        // Fast path: the current line or its successor still matches
        if let Some(last) = self.last_index {
            for candidate in [last, last + 1] {
                if candidate < lines.len() && lines[candidate].contains(position_ms) {
                    // Lower index wins on a shared boundary, matching the
                    // scan path's first-match rule
                    let resolved = if candidate > 0 && lines[candidate - 1].contains(position_ms) {
                        candidate - 1
                    } else {
                        candidate
                    };
                    self.last_index = Some(resolved);
                    return Some(resolved);
                }
            }
        }

        // Slow path: scan in order, first match wins
        self.last_index = lines.iter().position(|l| l.contains(position_ms));
        self.last_index
    }
}
