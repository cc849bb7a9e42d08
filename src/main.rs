// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod background;
mod errors;
mod file_utils;
mod playback;
mod render;
mod subtitle;
mod sync;
mod timecode;
mod timeline;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a lyric video from audio, lyrics and a background (default command)
    Render(RenderArgs),

    /// Auto-sync a plain-text lyric file against an audio track, writing SRT
    Sync(SyncArgs),

    /// List the built-in background themes
    Themes,

    /// Generate shell completions for lyrivid
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Audio track to render against
    #[arg(value_name = "AUDIO")]
    audio: PathBuf,

    /// Lyric input: plain text (auto-synced) or .srt (timings kept)
    #[arg(value_name = "LYRICS")]
    lyrics: PathBuf,

    /// Background still image file
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Background theme id (see `lyrivid themes`) when no image is given
    #[arg(short = 'T', long)]
    theme: Option<String>,

    /// Output video path (defaults to the lyric file with .mp4)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Audio track whose duration drives the proportional sync
    #[arg(value_name = "AUDIO")]
    audio: PathBuf,

    /// Plain-text lyric file, one line per lyric
    #[arg(value_name = "LYRICS")]
    lyrics: PathBuf,

    /// Output subtitle path (defaults to the lyric file with .srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Lyrivid - Lyric Video Maker
///
/// Turns an audio track plus lyric text into a timed subtitle track and a
/// rendered lyric video with a still background and burned-in lyrics.
#[derive(Parser, Debug)]
#[command(name = "lyrivid")]
#[command(version = "0.1.0")]
#[command(about = "Lyric video maker: timed subtitles + rendered video")]
#[command(long_about = "Lyrivid turns an audio track and lyric text into a timed subtitle
track and a rendered lyric video.

EXAMPLES:
    lyrivid render song.mp3 lyrics.txt -i cover.jpg     # Auto-sync and render
    lyrivid render song.mp3 lyrics.srt -T neon          # Timed SRT + themed background
    lyrivid sync song.mp3 lyrics.txt                    # Write lyrics.srt only
    lyrivid themes                                      # List background themes
    lyrivid completions bash > lyrivid.bash             # Generate completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file does
    not exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Audio track to render against
    #[arg(value_name = "AUDIO")]
    audio: Option<PathBuf>,

    /// Lyric input: plain text (auto-synced) or .srt (timings kept)
    #[arg(value_name = "LYRICS")]
    lyrics: Option<PathBuf>,

    /// Background still image file
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Background theme id (see `lyrivid themes`) when no image is given
    #[arg(short = 'T', long)]
    theme: Option<String>,

    /// Output video path (defaults to the lyric file with .mp4)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");

            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => writeln!(stderr, "\x1B[1;31m{} {}\x1B[0m", now, record.args()),
                Level::Warn => writeln!(stderr, "\x1B[1;33m{} {}\x1B[0m", now, record.args()),
                Level::Info => writeln!(stderr, "{} {}", now, record.args()),
                Level::Debug | Level::Trace => {
                    writeln!(stderr, "\x1B[2m{} {}\x1B[0m", now, record.args())
                }
            };
        }
    }

    fn flush(&self) {}
}

fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(level) = log_level {
        config.log_level = level.into();
    }
    Ok(config)
}

async fn run_render(args: RenderArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level)?;
    let _ = CustomLogger::init(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller
        .render_video(args.audio, args.lyrics, args.image, args.theme, args.output)
        .await?;
    Ok(())
}

async fn run_sync(args: SyncArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level)?;
    let _ = CustomLogger::init(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller
        .sync_lyrics(args.audio, args.lyrics, args.output)
        .await?;
    Ok(())
}

fn run_themes() {
    for theme in background::theme_options() {
        println!("{:<10} {:<16} {}", theme.id, theme.name, theme.description);
    }
}

#[tokio::main]
async fn main() {
    let options = CommandLineOptions::parse();

    let result = match options.command {
        Some(Commands::Render(args)) => run_render(args).await,
        Some(Commands::Sync(args)) => run_sync(args).await,
        Some(Commands::Themes) => {
            run_themes();
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lyrivid", &mut std::io::stdout());
            Ok(())
        }
        None => match (options.audio, options.lyrics) {
            (Some(audio), Some(lyrics)) => {
                run_render(RenderArgs {
                    audio,
                    lyrics,
                    image: options.image,
                    theme: options.theme,
                    output: options.output,
                    config_path: options.config_path,
                    log_level: options.log_level,
                })
                .await
            }
            _ => {
                let _ = CommandLineOptions::command().print_help();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        // eprintln rather than error!: the logger may not be initialized yet
        // when config loading fails
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
