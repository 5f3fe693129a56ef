//! CLI command implementations

pub mod export;
pub mod summary;

pub use export::ExportArgs;
pub use summary::SummaryArgs;

use clap::{Args, ValueEnum};
use metagraph_core::{Config, EdgeType, GraphFilter, NodeType};
use metagraph_github::{GraphQLClient, MetaAdapter, ProjectFetcher};

/// Node/edge type selection shared by commands that build the graph
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Node types to emit (default: all)
    #[arg(long = "node-type", value_enum)]
    pub node_types: Vec<NodeTypeArg>,

    /// Edge types to emit (default: all)
    #[arg(long = "edge-type", value_enum)]
    pub edge_types: Vec<EdgeTypeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NodeTypeArg {
    Issue,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EdgeTypeArg {
    PartOf,
}

impl From<NodeTypeArg> for NodeType {
    fn from(arg: NodeTypeArg) -> Self {
        match arg {
            NodeTypeArg::Issue => NodeType::Issue,
        }
    }
}

impl From<EdgeTypeArg> for EdgeType {
    fn from(arg: EdgeTypeArg) -> Self {
        match arg {
            EdgeTypeArg::PartOf => EdgeType::PartOf,
        }
    }
}

impl FilterArgs {
    pub fn to_filter(&self) -> GraphFilter {
        GraphFilter::new(
            self.node_types.iter().copied().map(Into::into).collect(),
            self.edge_types.iter().copied().map(Into::into).collect(),
        )
    }
}

/// Fetch the configured board and build the graph
pub async fn build_graph(config: &Config, filter: &GraphFilter) -> anyhow::Result<MetaAdapter> {
    let client = GraphQLClient::from_config(config)?;
    let fetcher = ProjectFetcher::new(client, config.github.clone());

    tracing::info!(
        organization = %config.github.organization,
        project = config.github.project_number,
        "Fetching project board"
    );

    Ok(MetaAdapter::fetch(&fetcher, filter).await?)
}
