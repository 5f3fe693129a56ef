//! Token resolution for the GitHub project API
//!
//! Loading priority:
//! 1. Environment variable (BIOCYPHER_GITHUB_PROJECT_TOKEN by default)
//! 2. Gzip-compressed token file (config/token.txt.gz by default)

use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::{AuthConfig, Error, Result};

/// Resolves the API token from the environment or a compressed file
#[derive(Debug, Clone)]
pub struct TokenProvider {
    env_var: String,
    token_file: PathBuf,
}

impl TokenProvider {
    /// Create a provider reading `env_var` first and `token_file` second
    pub fn new(env_var: impl Into<String>, token_file: impl Into<PathBuf>) -> Self {
        Self {
            env_var: env_var.into(),
            token_file: token_file.into(),
        }
    }

    /// Create a provider from the auth section of the configuration
    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(auth.token_env.clone(), auth.token_file.clone())
    }

    /// Name of the environment variable consulted first
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Path of the fallback token file
    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    /// Resolve the token
    ///
    /// Fails with [`Error::MissingCredential`] when the variable is unset or
    /// blank and the file is missing or blank.
    pub fn get_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(&self.env_var) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!(env_var = %self.env_var, "Using project token from environment");
                return Ok(token);
            }
        }

        if self.token_file.exists() {
            let token = read_compressed_token(&self.token_file)?;
            if !token.is_empty() {
                debug!(path = %self.token_file.display(), "Using project token from file");
                return Ok(token);
            }
            warn!(path = %self.token_file.display(), "Token file is empty");
        }

        Err(Error::MissingCredential {
            env_var: self.env_var.clone(),
            path: self.token_file.clone(),
        })
    }
}

/// Decompress a gzip token file and trim surrounding whitespace
fn read_compressed_token(path: &Path) -> Result<String> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = format!("{:o}", mode & 0o777),
                "Token file is readable by other users"
            );
        }
    }

    let file = std::fs::File::open(path).map_err(Error::Io)?;
    let mut contents = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut contents)
        .map_err(Error::Io)?;

    Ok(contents.trim().to_string())
}
