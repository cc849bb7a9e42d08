use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Render backend configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Background generator configuration
    #[serde(default)]
    pub background: BackgroundConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Render backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RenderConfig {
    // @field: ffmpeg program name or path
    #[serde(default = "default_ffmpeg_program")]
    pub ffmpeg_program: String,

    // @field: ffprobe program name or path
    #[serde(default = "default_ffprobe_program")]
    pub ffprobe_program: String,
}

fn default_ffmpeg_program() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_program() -> String {
    "ffprobe".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            ffmpeg_program: default_ffmpeg_program(),
            ffprobe_program: default_ffprobe_program(),
        }
    }
}

/// Background generator configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BackgroundConfig {
    // @field: Generator endpoint URL; placeholder catalog used when empty
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl LogLevel {
    // @returns: log crate filter for this level
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            render: RenderConfig::default(),
            background: BackgroundConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, creating a default one when the
    /// file does not exist yet
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.render.ffmpeg_program.trim().is_empty() {
            return Err(anyhow!("render.ffmpeg_program must not be empty"));
        }
        if self.render.ffprobe_program.trim().is_empty() {
            return Err(anyhow!("render.ffprobe_program must not be empty"));
        }
        if let Some(endpoint) = &self.background.endpoint {
            url::Url::parse(endpoint)
                .map_err(|e| anyhow!("background.endpoint is not a valid URL: {}", e))?;
        }
        Ok(())
    }
}
