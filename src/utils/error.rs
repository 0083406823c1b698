// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or navigating directory pages.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Directory rate limit likely exceeded (403 Forbidden)")]
    RateLimited,

    #[error("Directory page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),

    #[error("Next control has no followable link (href: '{0}')")]
    NoNextLink(String),

    #[error("Could not read snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No directory pages to scan")]
    NoPages,

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
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

    #[error("Directory access failed: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
