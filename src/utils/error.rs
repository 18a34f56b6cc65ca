// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Property '{key}' not found in {path}")]
    MissingProperty { path: PathBuf, key: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Changelog source error: {0}")]
    Source(#[from] SourceError), // Automatically convert source errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No changelog entry found for version {0}")]
    EmptySection(String),
}
