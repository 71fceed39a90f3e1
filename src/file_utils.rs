use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::TranslationError;

// @module: File input and export utilities

/// Extensions treated as plain text
const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

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

    // @checks: Plain-text file by extension
    pub fn is_plain_text<P: AsRef<Path>>(path: P) -> bool {
        match path.as_ref().extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy();
                PLAIN_TEXT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
            }
            None => false,
        }
    }

    /// Read a plain-text input file
    ///
    /// Anything that is not a `.txt` file, or is not valid UTF-8, is
    /// rejected with `UnsupportedInput`.
    pub fn read_text_input<P: AsRef<Path>>(path: P) -> Result<String, TranslationError> {
        let path = path.as_ref();
        if !Self::is_plain_text(path) {
            return Err(TranslationError::UnsupportedInput(format!(
                "{} is not a plain-text file",
                path.display()
            )));
        }

        let bytes = fs::read(path).map_err(|e| {
            TranslationError::UnsupportedInput(format!("Cannot read {}: {}", path.display(), e))
        })?;

        String::from_utf8(bytes).map_err(|_| {
            TranslationError::UnsupportedInput(format!("{} is not valid UTF-8 text", path.display()))
        })
    }

    /// Read batch input: one item per non-blank line, trimmed
    pub fn read_batch_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, TranslationError> {
        let content = Self::read_text_input(path)?;
        Ok(parse_batch_lines(&content))
    }

    /// Write `content` to `path` atomically through a sibling temp file
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temp file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write export for {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to move export into place at {:?}", path))?;

        Ok(())
    }

    // @generates: Download filename for a translation
    pub fn download_filename(target_language: &str) -> String {
        format!(
            "translation-{}-{}.txt",
            target_language,
            Utc::now().timestamp_millis()
        )
    }

    // @generates: Export path for batch results
    pub fn export_path<P: AsRef<Path>>(dir: P, extension: &str) -> PathBuf {
        dir.as_ref().join(format!(
            "batch-translation-{}.{}",
            Utc::now().timestamp_millis(),
            extension
        ))
    }
}

/// Split text into batch items, skipping blank lines
pub fn parse_batch_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
