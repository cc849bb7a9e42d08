/*!
 * Error types for the lyrivid application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when decoding subtitle timestamps
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// The timestamp token does not match `HH:MM:SS,mmm` (or `.mmm`)
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),
}

/// Errors that can occur during timeline synchronization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Auto-sync attempted on a timeline whose lines contain no words
    #[error("Cannot auto-sync a timeline with zero total words")]
    DegenerateTimeline,

    /// A line index outside the current timeline length
    #[error("Line index {index} out of range for timeline of {len} lines")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Timeline length at the time of the call
        len: usize,
    },
}

/// Errors that can occur in the render pipeline
#[derive(Error, Debug)]
pub enum RenderError {
    /// A required render input is missing; checked before the backend is contacted
    #[error("Missing render input: {0}")]
    MissingRenderInput(&'static str),

    /// The backend could not be initialized or its program is unavailable
    #[error("Render backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The render call itself failed; surfaced verbatim, no retry
    #[error("Render backend failed: {0}")]
    BackendFailure(String),
}

/// Errors that can occur when generating or fetching background images
#[derive(Error, Debug)]
pub enum BackgroundError {
    /// The generator endpoint request failed
    #[error("Background request failed: {0}")]
    RequestFailed(String),

    /// The generator returned a response we could not use
    #[error("Invalid background response: {0}")]
    InvalidResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error decoding a timestamp
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// Error from timeline synchronization
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Error from the render pipeline
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from background generation
    #[error("Background error: {0}")]
    Background(#[from] BackgroundError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
