use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and path utilities

/// What kind of lyric input a file holds, judged by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricInputKind {
    /// Plain newline-separated lyric text
    PlainText,
    /// SRT subtitle document with embedded timings
    SubtitleDocument,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @reads: Whole file as a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    // @writes: Bytes, creating parent directories first
    pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        fs::write(path, bytes)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    // @detects: Lyric input kind from the file extension
    pub fn lyric_input_kind<P: AsRef<Path>>(path: P) -> LyricInputKind {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("srt") => LyricInputKind::SubtitleDocument,
            _ => LyricInputKind::PlainText,
        }
    }

    // @generates: Output path next to the input with a new extension
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, extension: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension);

        match input_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(output_filename),
            _ => PathBuf::from(output_filename),
        }
    }
}
