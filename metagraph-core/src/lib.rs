//! Metagraph Core - shared pieces of the BioCypher meta graph
//!
//! This crate provides configuration, credential lookup and the node/edge
//! records that the GitHub adapter produces for the graph writer.

pub mod config;
pub mod error;
pub mod graph;
pub mod secrets;

pub use config::{AuthConfig, CliOverrides, Config, GitHubConfig, DEFAULT_TOKEN_ENV};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeType, GraphFilter, Node, NodeType, Properties, PART_OF, USES};
pub use secrets::TokenProvider;
