use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    #[error("Invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: srprep::Error,
    },

    #[error(transparent)]
    Srprep(#[from] srprep::Error),
}
