/*!
 * Render pipeline and backend implementations.
 *
 * This module contains the backend seam for video encoding:
 * - `RenderBackend`: the trait every encoder implements
 * - `ffmpeg`: the real encoder, driving an ffmpeg process
 * - `mock`: test doubles with scripted behaviors
 */

use std::fmt::Debug;
use std::path::PathBuf;
use async_trait::async_trait;
use log::{debug, info};

use crate::errors::RenderError;
use crate::subtitle;
use crate::timeline::Timeline;

pub mod ffmpeg;
pub mod mock;

/// Burned-in subtitle style directive
///
/// Fixed constants, not user-configurable; the values mirror what the
/// rendered output has always looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleStyle {
    /// Font family name
    pub font_name: &'static str,
    /// Font size in points
    pub font_size: u32,
    /// Primary text color (ASS &HAABBGGRR)
    pub primary_colour: &'static str,
    /// Outline color
    pub outline_colour: &'static str,
    /// Box background color
    pub back_colour: &'static str,
    /// ASS border style (4 = opaque box)
    pub border_style: u32,
    /// Outline width
    pub outline: u32,
    /// Shadow depth
    pub shadow: u32,
    /// Bottom margin in pixels
    pub margin_v: u32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        SubtitleStyle {
            font_name: "Arial",
            font_size: 24,
            primary_colour: "&H00FFFFFF",
            outline_colour: "&H00000000",
            back_colour: "&H80000000",
            border_style: 4,
            outline: 1,
            shadow: 0,
            margin_v: 30,
        }
    }
}

impl SubtitleStyle {
    /// Render the style as an ASS force_style argument
    pub fn to_force_style(&self) -> String {
        format!(
            "FontName={},FontSize={},PrimaryColour={},OutlineColour={},BackColour={},BorderStyle={},Outline={},Shadow={},MarginV={}",
            self.font_name,
            self.font_size,
            self.primary_colour,
            self.outline_colour,
            self.back_colour,
            self.border_style,
            self.outline,
            self.shadow,
            self.margin_v,
        )
    }
}

/// A single render request submitted to a backend
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Audio track path
    pub audio: PathBuf,
    /// Background still image path
    pub still_image: PathBuf,
    /// Serialized SRT document with the line timings baked in
    pub subtitle_document: String,
    /// Burned-in subtitle style
    pub style: SubtitleStyle,
}

/// Common trait for video render backends
///
/// A backend must be initialized before its first render; initialization is
/// idempotent and may be awaited lazily by the first request. Only one render
/// may be in flight against a given instance at a time.
#[async_trait]
pub trait RenderBackend: Send + Sync + Debug {
    /// Make the backend ready; a no-op when already initialized
    async fn initialize(&self) -> Result<(), RenderError>;

    /// Produce one finite A/V container with the subtitles burned in
    ///
    /// The still image is held for the audio's whole duration. Failure is
    /// fatal to the request; there are no partial results.
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError>;
}

/// Builds the subtitle document from a finalized timeline and submits a
/// single render request to the backend
#[derive(Debug)]
pub struct RenderPipeline<B: RenderBackend> {
    /// The encoder backend
    backend: B,
    /// Style directive applied to every render
    style: SubtitleStyle,
}

impl<B: RenderBackend> RenderPipeline<B> {
    /// Create a pipeline around a backend with the default style
    pub fn new(backend: B) -> Self {
        RenderPipeline {
            backend,
            style: SubtitleStyle::default(),
        }
    }

    /// Borrow the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate inputs, serialize the timeline, and run exactly one render
    ///
    /// Each missing input is its own failure, reported before the backend is
    /// contacted. Backend failures are surfaced verbatim; retrying is the
    /// caller's decision.
    pub async fn render(
        &self,
        audio: Option<&PathBuf>,
        still_image: Option<&PathBuf>,
        timeline: &Timeline,
    ) -> Result<Vec<u8>, RenderError> {
        let audio = audio.ok_or(RenderError::MissingRenderInput("audio source"))?;
        let still_image =
            still_image.ok_or(RenderError::MissingRenderInput("background image"))?;
        if timeline.is_empty() {
            return Err(RenderError::MissingRenderInput("lyric lines"));
        }

        let subtitle_document = subtitle::serialize_document(timeline.lines());
        debug!(
            "Serialized {} lines into a {}-byte subtitle document",
            timeline.len(),
            subtitle_document.len()
        );

        self.backend.initialize().await?;

        let request = RenderRequest {
            audio: audio.clone(),
            still_image: still_image.clone(),
            subtitle_document,
            style: self.style.clone(),
        };

        info!("Submitting render request to backend");
        self.backend.render(&request).await
    }
}
