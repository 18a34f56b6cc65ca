// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::extractors::section::ExtractedSection;
use crate::utils::error::StorageError;

/// Metadata written next to the release notes.
#[derive(Debug, Serialize)]
struct NotesMetadata<'a> {
    version: &'a str,
    heading: Option<&'a str>,
    source_path: Option<String>,
    content_length: usize,
    line_count: usize,
    extraction_timestamp: String,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the extracted release notes to a markdown file
    pub fn save_notes(&self, section: &ExtractedSection) -> Result<PathBuf, StorageError> {
        let filename = format!("RELEASE_NOTES_{}.md", file_safe(&section.version));
        let file_path = self.base_dir.join(filename);

        fs::write(&file_path, &section.content)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved release notes to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the extracted section in JSON format
    pub fn save_metadata(&self, section: &ExtractedSection) -> Result<PathBuf, StorageError> {
        let filename = format!("RELEASE_NOTES_{}_meta.json", file_safe(&section.version));
        let file_path = self.base_dir.join(filename);

        let metadata = NotesMetadata {
            version: &section.version,
            heading: section.heading.as_deref(),
            source_path: section.source_path.as_ref().map(|p| p.display().to_string()),
            content_length: section.content.len(),
            line_count: section.content.lines().count(),
            extraction_timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// Replaces path separators and whitespace so a version can be used in a file name.
fn file_safe(version: &str) -> String {
    let cleaned: String = version
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect();

    if cleaned.is_empty() { "unversioned".to_string() } else { cleaned }
}
