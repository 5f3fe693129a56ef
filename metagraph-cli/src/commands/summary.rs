//! Summary command - counts of nodes and edges per label

use std::collections::BTreeMap;

use clap::Args;
use metagraph_core::{Config, Edge, Node};

use super::{build_graph, FilterArgs};

/// Print node and edge counts for the board
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

impl SummaryArgs {
    /// Execute the summary command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let adapter = build_graph(config, &self.filter.to_filter()).await?;

        println!(
            "Project {}/{}",
            config.github.organization, config.github.project_number
        );
        println!("====================");
        println!();
        println!("Nodes: {}", adapter.node_count());
        for (label, count) in count_node_labels(adapter.nodes()) {
            println!("  {:<28} {}", label, count);
        }
        println!();
        println!("Edges: {}", adapter.edges().len());
        for (label, count) in count_edge_labels(adapter.edges()) {
            println!("  {:<28} {}", label, count);
        }

        Ok(())
    }
}

fn count_node_labels(nodes: &[Node]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for node in nodes {
        *counts.entry(node.label.as_str()).or_insert(0) += 1;
    }
    counts
}

fn count_edge_labels(edges: &[Edge]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for edge in edges {
        *counts.entry(edge.label.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_counts() {
        let nodes = vec![
            Node::new("i1", "gene adapter"),
            Node::new("i2", "gene adapter"),
            Node::new("i3", "pipeline"),
        ];
        let counts = count_node_labels(&nodes);
        assert_eq!(counts["gene adapter"], 2);
        assert_eq!(counts["pipeline"], 1);

        let edges = vec![Edge::part_of("i1", "i3"), Edge::uses("i3", "tabular")];
        let counts = count_edge_labels(&edges);
        assert_eq!(counts["part of"], 1);
        assert_eq!(counts["uses"], 1);
    }
}
