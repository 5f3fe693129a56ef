//! Export command - fetch the board and write nodes and edges

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use metagraph_core::{Config, Edge, Node};
use serde::Serialize;

use super::{build_graph, FilterArgs};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One document with "nodes" and "edges" arrays
    Json,
    /// One record per line, tagged with its kind
    Jsonl,
}

#[derive(Serialize)]
struct Document<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let adapter = build_graph(config, &self.filter.to_filter()).await?;

        if verbose {
            tracing::info!(
                nodes = adapter.node_count(),
                edges = adapter.edges().len(),
                format = ?self.format,
                "Writing graph"
            );
        }

        match &self.output {
            Some(path) => {
                let mut out = BufWriter::new(File::create(path)?);
                write_graph(&mut out, adapter.nodes(), adapter.edges(), self.format)?;
                out.flush()?;
                eprintln!(
                    "Wrote {} nodes and {} edges to {}",
                    adapter.node_count(),
                    adapter.edges().len(),
                    path.display()
                );
            }
            None => {
                let stdout = io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                write_graph(&mut out, adapter.nodes(), adapter.edges(), self.format)?;
                out.flush()?;
            }
        }

        Ok(())
    }
}

/// Serialize nodes and edges in the chosen format
pub fn write_graph<W: Write>(
    out: &mut W,
    nodes: &[Node],
    edges: &[Edge],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &Document { nodes, edges })?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for node in nodes {
                serde_json::to_writer(&mut *out, &Record::Node(node))?;
                writeln!(out)?;
            }
            for edge in edges {
                serde_json::to_writer(&mut *out, &Record::Edge(edge))?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
