/*!
 * Tests for manual marking and automatic proportional sync
 */

use lyrivid::errors::SyncError;
use lyrivid::sync::{auto_sync, finalize, mark_line};
use crate::common;

/// Test the chaining behavior: marking line 1 closes line 0
#[test]
fn test_markLine_withMiddleIndex_shouldChainPreviousEnd() {
    let mut timeline = common::unsynced_timeline(&["first", "second", "third"]);

    mark_line(&mut timeline, 1, 5_000).unwrap();

    assert_eq!(timeline.get(0).unwrap().end_time_ms, 5_000);
    assert_eq!(timeline.get(1).unwrap().start_time_ms, 5_000);
    // Line 2 untouched; line 1's own end untouched
    assert_eq!(timeline.get(1).unwrap().end_time_ms, 0);
    assert_eq!(timeline.get(2).unwrap().start_time_ms, 0);
    assert_eq!(timeline.get(2).unwrap().end_time_ms, 0);
}

/// Test marking index 0 only sets its start
#[test]
fn test_markLine_withFirstIndex_shouldOnlySetStart() {
    let mut timeline = common::unsynced_timeline(&["first", "second"]);

    mark_line(&mut timeline, 0, 1_500).unwrap();

    assert_eq!(timeline.get(0).unwrap().start_time_ms, 1_500);
    assert_eq!(timeline.get(0).unwrap().end_time_ms, 0);
    assert_eq!(timeline.get(1).unwrap().start_time_ms, 0);
}

/// Test re-marking overwrites the previous start
#[test]
fn test_markLine_markedTwice_shouldOverwriteStart() {
    let mut timeline = common::unsynced_timeline(&["first", "second"]);

    mark_line(&mut timeline, 1, 4_000).unwrap();
    mark_line(&mut timeline, 1, 6_000).unwrap();

    assert_eq!(timeline.get(1).unwrap().start_time_ms, 6_000);
    assert_eq!(timeline.get(0).unwrap().end_time_ms, 6_000);
}

/// Test marking out of range is an error
#[test]
fn test_markLine_withIndexOutOfRange_shouldFail() {
    let mut timeline = common::unsynced_timeline(&["only"]);
    let err = mark_line(&mut timeline, 3, 1_000).unwrap_err();
    assert_eq!(err, SyncError::IndexOutOfRange { index: 3, len: 1 });
}

/// Test a full manual session: marks then finalize
#[test]
fn test_finalize_afterMarks_shouldCloseLastLine() {
    let mut timeline = common::unsynced_timeline(&["a", "b", "c"]);

    mark_line(&mut timeline, 0, 0).unwrap();
    mark_line(&mut timeline, 1, 2_000).unwrap();
    mark_line(&mut timeline, 2, 4_000).unwrap();
    finalize(&mut timeline, 6_000).unwrap();

    let spans: Vec<(u64, u64)> = timeline
        .lines()
        .iter()
        .map(|l| (l.start_time_ms, l.end_time_ms))
        .collect();
    assert_eq!(spans, vec![(0, 2_000), (2_000, 4_000), (4_000, 6_000)]);
}

/// Test that skipping finalize leaves the last end stale
#[test]
fn test_markLine_withoutFinalize_shouldLeaveLastEndStale() {
    let mut timeline = common::unsynced_timeline(&["a", "b"]);

    mark_line(&mut timeline, 0, 0).unwrap();
    mark_line(&mut timeline, 1, 2_000).unwrap();

    assert_eq!(timeline.get(1).unwrap().start_time_ms, 2_000);
    assert_eq!(timeline.get(1).unwrap().end_time_ms, 0);
}

/// Test finalize on an empty timeline fails
#[test]
fn test_finalize_withEmptyTimeline_shouldFail() {
    let mut timeline = common::unsynced_timeline(&[]);
    assert!(finalize(&mut timeline, 1_000).is_err());
}

/// Test auto-sync partitions the full duration by word count
#[test]
fn test_autoSync_withWordCounts_shouldPartitionProportionally() {
    // 2 + 1 + 1 = 4 words over 4000 ms -> 1000 ms per word
    let mut timeline = common::unsynced_timeline(&["two words", "one", "word"]);

    auto_sync(&mut timeline, 4_000).unwrap();

    let spans: Vec<(u64, u64)> = timeline
        .lines()
        .iter()
        .map(|l| (l.start_time_ms, l.end_time_ms))
        .collect();
    assert_eq!(spans, vec![(0, 2_000), (2_000, 3_000), (3_000, 4_000)]);
}

/// Test auto-sync always ends exactly at the total duration
#[test]
fn test_autoSync_withUnevenWordCounts_shouldEndExactlyAtDuration() {
    // 7 words over a duration that does not divide evenly
    let mut timeline =
        common::unsynced_timeline(&["one two three", "four", "five six seven"]);

    auto_sync(&mut timeline, 10_001).unwrap();

    let lines = timeline.lines();
    assert_eq!(lines[0].start_time_ms, 0);
    assert_eq!(lines.last().unwrap().end_time_ms, 10_001);

    // Contiguous, non-decreasing intervals
    for pair in lines.windows(2) {
        assert_eq!(pair[0].end_time_ms, pair[1].start_time_ms);
    }
    for line in lines {
        assert!(line.end_time_ms >= line.start_time_ms);
    }

    // Durations sum to the total
    let total: u64 = lines.iter().map(|l| l.end_time_ms - l.start_time_ms).sum();
    assert_eq!(total, 10_001);
}

/// Test auto-sync on whitespace-only lines fails without dividing by zero
#[test]
fn test_autoSync_withZeroTotalWords_shouldFailWithDegenerateTimeline() {
    let mut timeline = common::unsynced_timeline(&["   ", "\t"]);

    let err = auto_sync(&mut timeline, 60_000).unwrap_err();
    assert_eq!(err, SyncError::DegenerateTimeline);

    // Timeline left unmodified
    for line in timeline.lines() {
        assert_eq!(line.start_time_ms, 0);
        assert_eq!(line.end_time_ms, 0);
    }
}

/// Test line ids survive both sync strategies
#[test]
fn test_sync_withEitherStrategy_shouldPreserveLineIds() {
    let mut timeline = common::unsynced_timeline(&["alpha beta", "gamma"]);
    let ids: Vec<_> = timeline.lines().iter().map(|l| l.id).collect();

    auto_sync(&mut timeline, 3_000).unwrap();
    mark_line(&mut timeline, 1, 2_000).unwrap();
    finalize(&mut timeline, 3_000).unwrap();

    let after: Vec<_> = timeline.lines().iter().map(|l| l.id).collect();
    assert_eq!(ids, after);
}
