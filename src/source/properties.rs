// src/source/properties.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::utils::error::SourceError;

/// Key looked up in the properties file when none is given on the command line.
pub const DEFAULT_PROPERTY_KEY: &str = "plugin_version";

/// Where the version marker comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Given directly, e.g. `--version-marker 1.2.0`
    Literal(String),
    /// Read from a `key=value` file such as `gradle.properties`
    Property { path: PathBuf, key: String },
}

impl VersionSource {
    /// Resolves the marker string.
    pub async fn resolve(&self) -> Result<String, SourceError> {
        match self {
            VersionSource::Literal(version) => Ok(version.clone()),
            VersionSource::Property { path, key } => read_property(path, key).await,
        }
    }
}

/// Parses properties-file lines of the form `key=value`, `key: value` or
/// `key value`. The key ends at the first `=`, `:` or whitespace; one `=` or
/// `:` after it is optional. A key with no separator gets an empty value.
/// Blank lines and lines starting with `#` or `!` are skipped.
/// Backslash escapes and line continuations are not interpreted.
/// Later duplicates override earlier ones.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let key_end = line
            .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
            .unwrap_or(line.len());
        let key = &line[..key_end];

        let rest = line[key_end..].trim_start();
        let value = rest
            .strip_prefix(|c: char| c == '=' || c == ':')
            .unwrap_or(rest)
            .trim();

        if key.is_empty() {
            tracing::trace!("Skipping properties line without key: '{}'", line);
            continue;
        }
        properties.insert(key.to_string(), value.to_string());
    }

    properties
}

/// Reads a single property value from a properties file.
pub async fn read_property<P: AsRef<Path>>(path: P, key: &str) -> Result<String, SourceError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;

    let value = parse_properties(&content)
        .remove(key)
        .ok_or_else(|| SourceError::MissingProperty {
            path: path.to_path_buf(),
            key: key.to_string(),
        })?;

    tracing::debug!("Resolved {} = {} from {}", key, value, path.display());
    Ok(value)
}
