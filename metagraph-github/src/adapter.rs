//! Node and edge building from a fetched project board

use metagraph_core::{Edge, EdgeType, GraphFilter, Node, NodeType};
use tracing::{info, warn};

use crate::client::GraphQLTransport;
use crate::models::{Field, Item, ItemMap};
use crate::project::{ProjectFetcher, ProjectSnapshot};
use crate::uses::{extract_uses_list, reference_key};
use crate::Result;

/// Fields whose single-select options become nodes and "uses" targets
pub const OPTION_FIELDS: [&str; 3] = ["Adapter Input Format", "Resource Type", "Data Type"];

pub const TITLE_FIELD: &str = "Title";
pub const RESOURCE_URL_FIELD: &str = "Resource URL";
pub const COMPONENT_TYPE_FIELD: &str = "Component Type";
pub const GRANULARITY_FIELD: &str = "Adapter Granularity";
pub const DATA_TYPE_FIELD: &str = "Data Type";

/// Component type that turns an item into a pipeline
pub const PIPELINE: &str = "Pipeline";

fn is_option_field(name: &str) -> bool {
    OPTION_FIELDS.contains(&name)
}

/// Nodes and edges describing the adapters and pipelines on a board
#[derive(Debug, Clone, Default)]
pub struct MetaAdapter {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl MetaAdapter {
    /// Build nodes and edges from a fetched board
    pub fn new(snapshot: ProjectSnapshot, filter: &GraphFilter) -> Self {
        let ProjectSnapshot { fields, mut items } = snapshot;
        flatten_item_fields(&mut items);

        info!("Generating nodes");
        let mut nodes = Vec::new();
        if filter.includes_node(NodeType::Issue) {
            nodes.extend(build_field_option_nodes(&fields));
            nodes.extend(items.values().filter_map(build_item_node));
        }

        info!("Generating edges");
        let mut edges = Vec::new();
        if filter.includes_edge(EdgeType::PartOf) {
            edges.extend(build_part_of_edges(&items));
            edges.extend(build_uses_field_edges(&items));
        }

        info!(nodes = nodes.len(), edges = edges.len(), "Built meta graph");

        Self { nodes, edges }
    }

    /// Fetch the configured board and build from it
    pub async fn fetch<T: GraphQLTransport>(
        fetcher: &ProjectFetcher<T>,
        filter: &GraphFilter,
    ) -> Result<Self> {
        let snapshot = fetcher.fetch_project().await?;
        Ok(Self::new(snapshot, filter))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

/// One node per option of each allow-listed field
pub fn build_field_option_nodes(fields: &[Field]) -> Vec<Node> {
    fields
        .iter()
        .filter(|field| is_option_field(&field.name))
        .flat_map(|field| {
            let label = field.name.to_lowercase();
            field
                .options
                .iter()
                .map(move |option| Node::new(option.name.to_lowercase(), label.clone()))
        })
        .collect()
}

/// Fold every item's field values into its attribute map
pub fn flatten_item_fields(items: &mut ItemMap) {
    for item in items.values_mut() {
        item.flatten_fields();
    }
}

/// Classification label such as "gene adapter" or "pipeline"
///
/// Field values are scanned in order; a "Pipeline" component type returns
/// immediately, so any granularity seen afterwards is ignored.
pub fn derive_label(item: &Item) -> String {
    let mut granularity = "";
    let mut component = "";

    for value in &item.field_values {
        if value.field_name == COMPONENT_TYPE_FIELD {
            component = value.value().unwrap_or_default();
        }

        if component == PIPELINE {
            return "pipeline".to_string();
        }

        if value.field_name == GRANULARITY_FIELD {
            granularity = value.value().unwrap_or_default();
        }
    }

    let mut parts = Vec::with_capacity(3);
    if !granularity.is_empty() {
        parts.push(granularity.to_lowercase());
    }
    if !component.is_empty() {
        parts.push(component.to_lowercase());
    }
    parts.push("adapter".to_string());

    parts.join(" ")
}

/// Node for an item; `None` (with a warning) when it has no title
pub fn build_item_node(item: &Item) -> Option<Node> {
    let title = match item.attribute(TITLE_FIELD) {
        Some(title) if !title.is_empty() => title,
        _ => {
            warn!(item = %item.id, key = %item.key(), "Item has no title");
            return None;
        }
    };

    Some(
        Node::new(item.key(), derive_label(item))
            .with_property("name", Some(title.to_string()))
            .with_property(
                "url",
                item.attribute(RESOURCE_URL_FIELD).map(str::to_string),
            ),
    )
}

/// "uses" edges from each item to the options it selects
pub fn build_uses_field_edges(items: &ItemMap) -> Vec<Edge> {
    let mut edges = Vec::new();

    for item in items.values() {
        let key = item.key();
        for value in &item.field_values {
            if !is_option_field(&value.field_name) {
                continue;
            }
            if let Some(v) = value.value() {
                edges.push(Edge::uses(key.clone(), v.to_lowercase()));
            }
        }
    }

    edges
}

/// "part of" edges from body references, plus pipeline data-type usage
///
/// Every `Uses:` reference yields `referenced -> item` "part of". For
/// pipelines, the referenced item's data type also becomes a "uses" edge
/// from the pipeline; references to items not on the board skip only that
/// extra edge.
pub fn build_part_of_edges(items: &ItemMap) -> Vec<Edge> {
    let mut edges = Vec::new();

    for item in items.values() {
        let key = item.key();
        let is_pipeline = item.attribute(COMPONENT_TYPE_FIELD) == Some(PIPELINE);

        for token in extract_uses_list(&item.body) {
            if token.is_empty() {
                continue;
            }

            let part = reference_key(token);
            edges.push(Edge::part_of(part.clone(), key.clone()));

            if !is_pipeline {
                continue;
            }

            match items.get(&part) {
                Some(referenced) => {
                    if let Some(data_type) = referenced.attribute(DATA_TYPE_FIELD) {
                        edges.push(Edge::uses(key.clone(), data_type.to_lowercase()));
                    }
                }
                None => {
                    warn!(pipeline = %key, reference = %part, "Referenced item is not on the board");
                }
            }
        }
    }

    edges
}
