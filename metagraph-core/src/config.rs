//! Configuration management for the meta graph
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (METAGRAPH_*)
//! 3. Config file (~/.config/metagraph/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable holding the project token by default
pub const DEFAULT_TOKEN_ENV: &str = "BIOCYPHER_GITHUB_PROJECT_TOKEN";

/// GitHub project board settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GraphQL endpoint
    pub endpoint: String,

    /// Organization login owning the project board
    pub organization: String,

    /// Project (v2) number within the organization
    pub project_number: u64,

    /// Number of field definitions requested (single page, no pagination)
    pub field_page_size: u32,

    /// Items per page when walking the board
    pub item_page_size: u32,

    /// Field values requested per item
    pub field_value_page_size: u32,

    /// Upper bound on item pages before giving up
    pub max_pages: u32,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.github.com/graphql".to_string(),
            organization: "biocypher".to_string(),
            project_number: 3,
            field_page_size: 20,
            item_page_size: 20,
            field_value_page_size: 100,
            max_pages: 1000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Where the API token comes from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Environment variable checked first
    pub token_env: String,

    /// Gzip-compressed token file used as fallback
    pub token_file: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            token_file: PathBuf::from("config/token.txt.gz"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Project board configuration
    pub github: GitHubConfig,

    /// Credential configuration
    pub auth: AuthConfig,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub organization: Option<String>,
    pub project_number: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/metagraph/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("metagraph").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - METAGRAPH_ENDPOINT: GraphQL endpoint
    /// - METAGRAPH_ORGANIZATION: Organization login
    /// - METAGRAPH_PROJECT_NUMBER: Project number
    /// - METAGRAPH_TOKEN_FILE: Compressed token file
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(endpoint) = std::env::var("METAGRAPH_ENDPOINT") {
            self.github.endpoint = endpoint;
        }

        if let Ok(organization) = std::env::var("METAGRAPH_ORGANIZATION") {
            self.github.organization = organization;
        }

        if let Ok(number) = std::env::var("METAGRAPH_PROJECT_NUMBER") {
            self.github.project_number = number.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "METAGRAPH_PROJECT_NUMBER must be a positive integer, got {:?}",
                    number
                ))
            })?;
        }

        if let Ok(path) = std::env::var("METAGRAPH_TOKEN_FILE") {
            self.auth.token_file = PathBuf::from(path);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.github.endpoint = endpoint;
        }

        if let Some(organization) = overrides.organization {
            self.github.organization = organization;
        }

        if let Some(number) = overrides.project_number {
            self.github.project_number = number;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: CliOverrides) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(overrides))
    }
}
