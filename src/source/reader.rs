// src/source/reader.rs
use std::path::Path;
use crate::utils::error::SourceError;

/// Splits file content into lines without their terminators.
/// `\r\n`, `\n` and a lone `\r` all end a line; a missing final
/// terminator is fine.
pub fn split_lines(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalized.split(['\n', '\r']).map(str::to_string).collect();

    // split leaves one empty trailing piece after a final terminator (or for empty input)
    if normalized.is_empty() || normalized.ends_with(['\n', '\r']) {
        lines.pop();
    }
    lines
}

/// Reads a changelog file into an ordered list of lines.
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
pub async fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, SourceError> {
    let path = path.as_ref();
    tracing::debug!("Reading changelog from {}", path.display());

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;

    let content = String::from_utf8_lossy(&bytes);
    if let std::borrow::Cow::Owned(_) = content {
        tracing::warn!("{} contains invalid UTF-8; replaced bad bytes", path.display());
    }

    let lines = split_lines(&content);
    tracing::debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
