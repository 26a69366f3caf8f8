//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, image codec, resize and thread pool errors, and provides
//! semantic variants for argument validation and per-image batch failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid size: {value}. Expected WIDTHxHEIGHT, e.g. 512x512")]
    InvalidSize { value: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Source directory not found: {path:?}")]
    SourceNotFound { path: PathBuf },

    #[error("Failed to process {path:?}: {source}")]
    Item {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("{failed} of {total} images failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    pub fn item(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Item {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
