use log::debug;

use crate::errors::SyncError;
use crate::timeline::Timeline;

// @module: Manual and automatic timeline synchronization

/// Mark the start of line `index` at the current playback position
///
/// Sets `start_time_ms` of the marked line and chains the previous line's
/// `end_time_ms` to the same position, which yields contiguous coverage by
/// construction. The marked line's own end is left alone; it is closed either
/// by the next mark or by [`finalize`]. Re-marking an index overwrites the
/// previous start.
pub fn mark_line(timeline: &mut Timeline, index: usize, position_ms: u64) -> Result<(), SyncError> {
    let len = timeline.len();
    let line = timeline
        .get(index)
        .cloned()
        .ok_or(SyncError::IndexOutOfRange { index, len })?;

    let mut marked = line;
    marked.start_time_ms = position_ms;
    timeline.replace(index, marked)?;

    // Chain the previous line's end to this start
    if index > 0 {
        if let Some(prev) = timeline.get(index - 1).cloned() {
            let mut prev = prev;
            prev.end_time_ms = position_ms;
            timeline.replace(index - 1, prev)?;
        }
    }

    debug!("Marked line {} at {} ms", index, position_ms);
    Ok(())
}

/// Close the timeline by setting the last line's end time
///
/// Must be called once after the final [`mark_line`]; without it the last
/// line's end stays whatever it was (typically zero or stale).
pub fn finalize(timeline: &mut Timeline, position_ms: u64) -> Result<(), SyncError> {
    let len = timeline.len();
    if len == 0 {
        return Err(SyncError::IndexOutOfRange { index: 0, len });
    }

    let last = len - 1;
    let mut line = timeline
        .get(last)
        .cloned()
        .ok_or(SyncError::IndexOutOfRange { index: last, len })?;
    line.end_time_ms = position_ms;
    timeline.replace(last, line)?;

    debug!("Finalized timeline at {} ms", position_ms);
    Ok(())
}

/// Distribute the track duration across lines proportionally to word count
///
/// Partitions `[0, total_duration_ms]` into exactly `len` contiguous,
/// non-overlapping intervals. The cursor accumulates in f64 and each boundary
/// is rounded to the nearest millisecond; the final boundary is pinned to the
/// exact duration. Fails with `DegenerateTimeline` when the lines carry no
/// words at all, leaving the timeline untouched.
pub fn auto_sync(timeline: &mut Timeline, total_duration_ms: u64) -> Result<(), SyncError> {
    let total_words = timeline.total_word_count();
    if total_words == 0 {
        return Err(SyncError::DegenerateTimeline);
    }

    let ms_per_word = total_duration_ms as f64 / total_words as f64;
    let len = timeline.len();

    let mut cursor = 0.0_f64;
    let mut start_ms = 0_u64;
    for index in 0..len {
        let line = timeline
            .get(index)
            .cloned()
            .ok_or(SyncError::IndexOutOfRange { index, len })?;

        cursor += line.word_count() as f64 * ms_per_word;
        let end_ms = if index == len - 1 {
            // Pin the last boundary so the partition ends exactly at D
            total_duration_ms
        } else {
            cursor.round() as u64
        };

        let mut synced = line;
        synced.start_time_ms = start_ms;
        synced.end_time_ms = end_ms;
        timeline.replace(index, synced)?;

        start_ms = end_ms;
    }

    debug!(
        "Auto-synced {} lines over {} ms ({:.1} ms/word)",
        len, total_duration_ms, ms_per_word
    );
    Ok(())
}
