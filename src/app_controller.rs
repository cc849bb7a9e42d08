use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::background::{self, BackgroundGenerator};
use crate::file_utils::{FileManager, LyricInputKind};
use crate::render::ffmpeg::FfmpegBackend;
use crate::render::RenderPipeline;
use crate::subtitle;
use crate::sync;
use crate::timecode;
use crate::timeline::Timeline;

// @module: Application controller for the lyric video workflow

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load a lyric file into a timeline, parsing by file kind
    ///
    /// SRT input keeps its embedded timings; plain text comes back unsynced.
    pub fn load_timeline<P: AsRef<Path>>(&self, lyrics_path: P) -> Result<Timeline> {
        let lyrics_path = lyrics_path.as_ref();
        if !FileManager::file_exists(lyrics_path) {
            return Err(anyhow!("Lyric file not found: {}", lyrics_path.display()));
        }

        let content = FileManager::read_to_string(lyrics_path)?;
        let timeline = match FileManager::lyric_input_kind(lyrics_path) {
            LyricInputKind::SubtitleDocument => Timeline::from_subtitle_document(&content),
            LyricInputKind::PlainText => Timeline::from_plain_text(&content),
        };

        if timeline.is_empty() {
            warn!("No lyric lines found in {}", lyrics_path.display());
        } else {
            info!("Loaded {} lyric lines", timeline.len());
        }
        Ok(timeline)
    }

    /// Auto-sync a plain-text lyric file against an audio track and write
    /// the timed SRT next to it (or to `output` when given)
    pub async fn sync_lyrics(
        &self,
        audio_path: PathBuf,
        lyrics_path: PathBuf,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let mut timeline = self.load_timeline(&lyrics_path)?;
        if timeline.is_empty() {
            return Err(anyhow!("Nothing to sync: no lyric lines"));
        }

        let duration_ms = self.probe_audio_duration(&audio_path).await?;
        info!(
            "Audio duration: {} ({} ms)",
            timecode::format_clock(duration_ms),
            duration_ms
        );

        sync::auto_sync(&mut timeline, duration_ms)?;

        let output_path =
            output.unwrap_or_else(|| FileManager::generate_output_path(&lyrics_path, "srt"));
        let document = subtitle::serialize_document(timeline.lines());
        FileManager::write_bytes(&output_path, document.as_bytes())?;

        info!("Wrote timed subtitles to {}", output_path.display());
        Ok(output_path)
    }

    /// Run the full workflow: load lyrics, sync if needed, resolve the
    /// background image, and render the video
    pub async fn render_video(
        &self,
        audio_path: PathBuf,
        lyrics_path: PathBuf,
        image_path: Option<PathBuf>,
        theme_id: Option<String>,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&audio_path) {
            return Err(anyhow!("Audio file not found: {}", audio_path.display()));
        }

        let mut timeline = self.load_timeline(&lyrics_path)?;

        // Plain text arrives unsynced; give it proportional timings
        if FileManager::lyric_input_kind(&lyrics_path) == LyricInputKind::PlainText
            && !timeline.is_empty()
        {
            let duration_ms = self.probe_audio_duration(&audio_path).await?;
            sync::auto_sync(&mut timeline, duration_ms)?;
            info!(
                "Auto-synced {} lines over {}",
                timeline.len(),
                timecode::format_clock(duration_ms)
            );
        }

        // Background: explicit image wins; otherwise generate from a theme.
        // The scratch dir keeps a generated image alive until the render is done.
        let mut _scratch: Option<tempfile::TempDir> = None;
        let still_image = match (image_path, theme_id) {
            (Some(path), _) => {
                if !FileManager::file_exists(&path) {
                    return Err(anyhow!("Background image not found: {}", path.display()));
                }
                path
            }
            (None, Some(theme_id)) => {
                let theme = background::find_theme(&theme_id)
                    .ok_or_else(|| anyhow!("Unknown theme: {}", theme_id))?;
                info!("Generating '{}' background", theme.name);

                let generator = BackgroundGenerator::new(self.config.background.endpoint.clone());
                let url = generator.generate(&theme.prompt).await?;

                let dir = tempfile::tempdir()?;
                let image = dir.path().join("background.jpg");
                generator.download_image(&url, &image).await?;
                _scratch = Some(dir);
                image
            }
            (None, None) => {
                return Err(anyhow!(
                    "A background is required: pass --image or --theme"
                ));
            }
        };

        let backend = FfmpegBackend::with_programs(
            self.config.render.ffmpeg_program.clone(),
            self.config.render.ffprobe_program.clone(),
        );
        let pipeline = RenderPipeline::new(backend);

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message("Rendering lyric video");
        progress.enable_steady_tick(Duration::from_millis(120));

        let render_result = pipeline
            .render(Some(&audio_path), Some(&still_image), &timeline)
            .await;
        progress.finish_and_clear();
        let bytes = render_result?;

        let output_path =
            output.unwrap_or_else(|| FileManager::generate_output_path(&lyrics_path, "mp4"));
        FileManager::write_bytes(&output_path, &bytes)?;

        info!(
            "Rendered {} ({} bytes) in {:.1}s",
            output_path.display(),
            bytes.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(output_path)
    }

    /// Probe the audio duration through the configured ffprobe program
    async fn probe_audio_duration(&self, audio_path: &Path) -> Result<u64> {
        let backend = FfmpegBackend::with_programs(
            self.config.render.ffmpeg_program.clone(),
            self.config.render.ffprobe_program.clone(),
        );
        let ms = backend.probe_duration_ms(audio_path).await?;
        Ok(ms)
    }
}
