/*!
 * Tests for subtitle document parsing and serialization
 */

use lyrivid::subtitle::{LyricLine, parse_document, parse_plain_text, serialize_document};
use crate::common;

/// Test parsing a well-formed document
#[test]
fn test_parseDocument_withValidBlocks_shouldParseAll() {
    let lines = parse_document(common::sample_srt_document());
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0].text, "First lyric line.");
    assert_eq!(lines[0].start_time_ms, 1_000);
    assert_eq!(lines[0].end_time_ms, 4_000);

    assert_eq!(lines[2].text, "Third lyric line.");
    assert_eq!(lines[2].start_time_ms, 10_000);
    assert_eq!(lines[2].end_time_ms, 14_000);
}

/// Test that a block missing its timing line is skipped, not fatal
#[test]
fn test_parseDocument_withBlockMissingTimingLine_shouldSkipOnlyThatBlock() {
    common::init_test_logging();
    let content = "1\n00:00:01,000 --> 00:00:02,000\nGood one.\n\n2\nNo timing line here at all.\n\n3\n00:00:03,000 --> 00:00:04,000\nGood two.\n";
    let lines = parse_document(content);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "Good one.");
    assert_eq!(lines[1].text, "Good two.");
}

/// Test that unparsable timestamps skip the enclosing block
#[test]
fn test_parseDocument_withMalformedTimestamp_shouldSkipBlock() {
    common::init_test_logging();
    let content = "1\nbogus --> 00:00:02,000\nBroken.\n\n2\n00:00:03,000 --> 00:00:04,000\nSurvives.\n";
    let lines = parse_document(content);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Survives.");
}

/// Test that a block with a timing line but no text is skipped
#[test]
fn test_parseDocument_withEmptyTextPayload_shouldSkipBlock() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nHas text.\n";
    let lines = parse_document(content);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Has text.");
}

/// Test multi-line text payloads are joined with a single space
#[test]
fn test_parseDocument_withMultiLineText_shouldJoinWithSpaces() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nLine one\nline two\nline three\n";
    let lines = parse_document(content);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Line one line two line three");
}

/// Test the period decimal separator is accepted on input
#[test]
fn test_parseDocument_withPeriodSeparatedTimestamps_shouldParse() {
    let content = "1\n00:00:01.500 --> 00:00:02.750\nDotted.\n";
    let lines = parse_document(content);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].start_time_ms, 1_500);
    assert_eq!(lines[0].end_time_ms, 2_750);
}

/// Test a fully malformed document yields an empty result, never an error
#[test]
fn test_parseDocument_withNoValidBlock_shouldReturnEmpty() {
    assert!(parse_document("").is_empty());
    assert!(parse_document("just some\nrandom text\n\nwith no timings").is_empty());
}

/// Test plain text parsing zeroes times and preserves order
#[test]
fn test_parsePlainText_withBlankLines_shouldKeepNonBlankInOrder() {
    let lines = parse_plain_text("First line\n\nSecond line\n   \nThird line\n");

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].text, "First line");
    assert_eq!(lines[1].text, "Second line");
    assert_eq!(lines[2].text, "Third line");
    for line in &lines {
        assert_eq!(line.start_time_ms, 0);
        assert_eq!(line.end_time_ms, 0);
    }
}

/// Test that generated ids are unique per line
#[test]
fn test_parsePlainText_withMultipleLines_shouldGenerateUniqueIds() {
    let lines = parse_plain_text("a\nb\nc\n");
    assert_ne!(lines[0].id, lines[1].id);
    assert_ne!(lines[1].id, lines[2].id);
}

/// Test serialization layout
#[test]
fn test_serializeDocument_withTwoLines_shouldEmitIndexedBlocks() {
    let lines = vec![
        LyricLine::new("Hello world".to_string(), 0, 2_000),
        LyricLine::new("Goodbye world".to_string(), 2_000, 4_500),
    ];
    let doc = serialize_document(&lines);

    let expected = "1\n00:00:00,000 --> 00:00:02,000\nHello world\n\n2\n00:00:02,000 --> 00:00:04,500\nGoodbye world\n";
    assert_eq!(doc, expected);
}

/// Test serialize then parse preserves text and times
#[test]
fn test_parseDocument_afterSerialize_shouldPreserveTextAndTimes() {
    let original = vec![
        LyricLine::new("One".to_string(), 0, 1_000),
        LyricLine::new("Two".to_string(), 1_000, 2_500),
        LyricLine::new("Three".to_string(), 2_500, 4_000),
    ];
    let parsed = parse_document(&serialize_document(&original));

    assert_eq!(parsed.len(), original.len());
    for (a, b) in original.iter().zip(parsed.iter()) {
        assert_eq!(a.text, b.text);
        assert_eq!(a.start_time_ms, b.start_time_ms);
        assert_eq!(a.end_time_ms, b.end_time_ms);
    }
}

/// Test word counting on a line
#[test]
fn test_lyricLine_wordCount_withWhitespaceVariants_shouldCountTokens() {
    assert_eq!(LyricLine::new("one two three".to_string(), 0, 0).word_count(), 3);
    assert_eq!(LyricLine::new("  spaced   out  ".to_string(), 0, 0).word_count(), 2);
    assert_eq!(LyricLine::new("   ".to_string(), 0, 0).word_count(), 0);
}
