/*!
 * Tests for error types and conversions
 */

use lyrivid::errors::{AppError, BackgroundError, RenderError, SyncError, TimecodeError};

#[test]
fn test_timecodeError_malformedTimestamp_shouldDisplayToken() {
    let error = TimecodeError::MalformedTimestamp("12:34".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Malformed timestamp"));
    assert!(display.contains("12:34"));
}

#[test]
fn test_syncError_degenerateTimeline_shouldDisplayCorrectly() {
    let error = SyncError::DegenerateTimeline;
    let display = format!("{}", error);
    assert!(display.contains("zero total words"));
}

#[test]
fn test_syncError_indexOutOfRange_shouldDisplayIndexAndLen() {
    let error = SyncError::IndexOutOfRange { index: 7, len: 3 };
    let display = format!("{}", error);
    assert!(display.contains("7"));
    assert!(display.contains("3"));
}

#[test]
fn test_renderError_missingRenderInput_shouldNameTheInput() {
    let error = RenderError::MissingRenderInput("background image");
    let display = format!("{}", error);
    assert!(display.contains("Missing render input"));
    assert!(display.contains("background image"));
}

#[test]
fn test_renderError_backendFailure_shouldSurfaceMessageVerbatim() {
    let error = RenderError::BackendFailure("encoder exploded".to_string());
    let display = format!("{}", error);
    assert!(display.contains("encoder exploded"));
}

#[test]
fn test_backgroundError_requestFailed_shouldDisplayCorrectly() {
    let error = BackgroundError::RequestFailed("connection refused".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Background request failed"));
    assert!(display.contains("connection refused"));
}

#[test]
fn test_appError_fromSyncError_shouldWrap() {
    let error: AppError = SyncError::DegenerateTimeline.into();
    assert!(matches!(error, AppError::Sync(SyncError::DegenerateTimeline)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.mp3");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
    assert!(format!("{}", error).contains("missing.mp3"));
}
