//! Error types for the meta graph core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No token in the environment or in the token file
    #[error(
        "GitHub project token not found. Set {env_var} or provide a gzip-compressed token at {}",
        .path.display()
    )]
    MissingCredential { env_var: String, path: PathBuf },
}
