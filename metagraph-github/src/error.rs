//! Error types for GitHub project operations

use thiserror::Error;

/// Result type for GitHub project operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching the project board
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or credential error from the core crate
    #[error(transparent)]
    Core(#[from] metagraph_core::Error),

    /// Network or HTTP client failure
    #[error("GraphQL request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("GraphQL request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Errors reported in the GraphQL response
    #[error("GraphQL errors: {0}")]
    GraphQL(String),

    /// Expected data missing from the response
    #[error("Malformed GraphQL response: {0}")]
    MalformedResponse(String),

    /// Organization or project board not found
    #[error("Project {number} not found in organization {organization}")]
    ProjectNotFound { organization: String, number: u64 },

    /// Board kept reporting more pages past the configured cap
    #[error("Gave up after {0} item pages")]
    PaginationLimit(u32),

    /// Endpoint is not a valid URL
    #[error("Invalid GraphQL endpoint {0}")]
    InvalidEndpoint(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
