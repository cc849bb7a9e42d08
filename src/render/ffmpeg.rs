use std::path::Path;
use async_trait::async_trait;
use log::{debug, error, info};
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::errors::RenderError;
use crate::render::{RenderBackend, RenderRequest};

// @module: ffmpeg-backed video encoder

/// Timeout for a full encode run
const RENDER_TIMEOUT_SECS: u64 = 600;

/// Timeout for probing a media file
const PROBE_TIMEOUT_SECS: u64 = 60;

/// Render backend driving an ffmpeg process
///
/// Initialization checks the program is runnable and is idempotent; the
/// render lock enforces the one-render-at-a-time discipline per instance.
#[derive(Debug)]
pub struct FfmpegBackend {
    /// ffmpeg program name or path
    program: String,
    /// ffprobe program name or path
    probe_program: String,
    /// Initialization state; true once the program has been verified
    initialized: Mutex<bool>,
    /// Held for the duration of a render
    render_lock: Mutex<()>,
}

impl FfmpegBackend {
    /// Create a backend using the default program names on PATH
    pub fn new() -> Self {
        Self::with_programs("ffmpeg".to_string(), "ffprobe".to_string())
    }

    /// Create a backend with explicit program names
    pub fn with_programs(program: String, probe_program: String) -> Self {
        FfmpegBackend {
            program,
            probe_program,
            initialized: Mutex::new(false),
            render_lock: Mutex::new(()),
        }
    }

    /// Probe the duration of an audio file in milliseconds
    pub async fn probe_duration_ms<P: AsRef<Path>>(&self, audio: P) -> Result<u64, RenderError> {
        let audio = audio.as_ref();
        if !audio.exists() {
            return Err(RenderError::BackendFailure(format!(
                "Audio file not found: {}",
                audio.display()
            )));
        }

        let probe_future = Command::new(&self.probe_program)
            .args([
                "-v", "quiet",
                "-print_format", "json",
                "-show_format",
                audio.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout = std::time::Duration::from_secs(PROBE_TIMEOUT_SECS);
        let output = tokio::select! {
            result = probe_future => {
                result.map_err(|e| RenderError::BackendUnavailable(format!(
                    "Failed to execute {}: {}", self.probe_program, e
                )))?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(RenderError::BackendFailure(format!(
                    "{} timed out after {} seconds", self.probe_program, PROBE_TIMEOUT_SECS
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr);
            return Err(RenderError::BackendFailure(format!(
                "ffprobe command failed: {}",
                stderr
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_duration_ms(&stdout)
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping
    /// the version banner, build configuration, and stream metadata noise.
    fn filter_stderr(stderr: &str) -> String {
        let dominated_prefixes = [
            "ffmpeg version",
            "  built with",
            "  configuration:",
            "  lib",
            "Input #",
            "  Metadata:",
            "  Duration:",
            "  Stream #",
            "Output #",
            "Stream mapping:",
            "Press [q]",
            "frame=",
            "size=",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return false;
                }
                !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
            })
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `format.duration` (seconds) from ffprobe JSON and convert to ms
fn parse_probe_duration_ms(probe_json: &str) -> Result<u64, RenderError> {
    let json: Value = serde_json::from_str(probe_json).map_err(|e| {
        RenderError::BackendFailure(format!("Failed to parse ffprobe JSON output: {}", e))
    })?;

    let duration_secs = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| {
            RenderError::BackendFailure("ffprobe output carries no format.duration".to_string())
        })?;

    Ok((duration_secs * 1000.0).round() as u64)
}

#[async_trait]
impl RenderBackend for FfmpegBackend {
    async fn initialize(&self) -> Result<(), RenderError> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return Ok(());
        }

        let output = Command::new(&self.program)
            .arg("-version")
            .output()
            .await
            .map_err(|e| {
                RenderError::BackendUnavailable(format!(
                    "Failed to execute {}: {}",
                    self.program, e
                ))
            })?;

        if !output.status.success() {
            return Err(RenderError::BackendUnavailable(format!(
                "{} -version exited with {}",
                self.program, output.status
            )));
        }

        debug!("{} verified and ready", self.program);
        *initialized = true;
        Ok(())
    }

    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        // One render in flight per backend instance
        let _guard = self.render_lock.lock().await;

        let workdir = tempfile::tempdir().map_err(|e| {
            RenderError::BackendFailure(format!("Failed to create scratch directory: {}", e))
        })?;

        let subtitle_path = workdir.path().join("lyrics.srt");
        std::fs::write(&subtitle_path, &request.subtitle_document).map_err(|e| {
            RenderError::BackendFailure(format!("Failed to write subtitle file: {}", e))
        })?;

        let output_path = workdir.path().join("output.mp4");
        let subtitle_filter = format!(
            "subtitles={}:force_style='{}'",
            subtitle_path.to_str().unwrap_or_default(),
            request.style.to_force_style()
        );

        info!(
            "Encoding {} + {} into a lyric video",
            request.audio.display(),
            request.still_image.display()
        );

        // Still image looped for the audio's duration, subtitles burned in
        let encode_future = Command::new(&self.program)
            .args([
                "-y",
                "-loop", "1",
                "-i", request.still_image.to_str().unwrap_or_default(),
                "-i", request.audio.to_str().unwrap_or_default(),
                "-c:v", "libx264",
                "-tune", "stillimage",
                "-c:a", "aac",
                "-b:a", "192k",
                "-pix_fmt", "yuv420p",
                "-shortest",
                "-vf", &subtitle_filter,
                output_path.to_str().unwrap_or_default(),
            ])
            .output();

        let timeout = std::time::Duration::from_secs(RENDER_TIMEOUT_SECS);
        let result = tokio::select! {
            result = encode_future => {
                result.map_err(|e| RenderError::BackendFailure(format!(
                    "Failed to execute {}: {}", self.program, e
                )))?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(RenderError::BackendFailure(format!(
                    "{} timed out after {} seconds", self.program, RENDER_TIMEOUT_SECS
                )));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let filtered = Self::filter_stderr(&stderr);
            error!("Render failed: {}", filtered);
            return Err(RenderError::BackendFailure(filtered));
        }

        let bytes = std::fs::read(&output_path).map_err(|e| {
            RenderError::BackendFailure(format!("Failed to read encoded output: {}", e))
        })?;

        if bytes.is_empty() {
            return Err(RenderError::BackendFailure(
                "Encoded output is empty".to_string(),
            ));
        }

        info!("Render complete ({} bytes)", bytes.len());
        Ok(bytes)
    }
}
