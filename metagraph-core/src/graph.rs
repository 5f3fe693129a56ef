//! Node and edge records handed to the knowledge graph writer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Node/edge property map; `None` serializes as `null`
pub type Properties = BTreeMap<String, Option<String>>;

/// Relationship label for issue-to-issue containment
pub const PART_OF: &str = "part of";

/// Relationship label for issue-to-option usage
pub const USES: &str = "uses";

/// A graph node: (identifier, label, properties)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub properties: Properties,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            properties: Properties::new(),
        }
    }

    /// Add a property, builder style
    pub fn with_property(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

/// A graph edge: (edge id, source, target, label, properties)
///
/// The edge id is always `None`; the writer assigns its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub label: String,
    pub properties: Properties,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            label: label.into(),
            properties: Properties::new(),
        }
    }

    pub fn part_of(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(child, parent, PART_OF)
    }

    pub fn uses(user: impl Into<String>, used: impl Into<String>) -> Self {
        Self::new(user, used, USES)
    }
}

/// Node types the adapter can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Issue,
}

impl NodeType {
    pub const ALL: &'static [NodeType] = &[NodeType::Issue];
}

/// Edge types the adapter can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    PartOf,
}

impl EdgeType {
    pub const ALL: &'static [EdgeType] = &[EdgeType::PartOf];
}

/// Which node and edge types to emit
///
/// An empty list selects every variant.
#[derive(Debug, Clone, Default)]
pub struct GraphFilter {
    pub node_types: Vec<NodeType>,
    pub edge_types: Vec<EdgeType>,
}

impl GraphFilter {
    pub fn new(node_types: Vec<NodeType>, edge_types: Vec<EdgeType>) -> Self {
        Self {
            node_types,
            edge_types,
        }
    }

    pub fn includes_node(&self, node_type: NodeType) -> bool {
        self.node_types.is_empty() || self.node_types.contains(&node_type)
    }

    pub fn includes_edge(&self, edge_type: EdgeType) -> bool {
        self.edge_types.is_empty() || self.edge_types.contains(&edge_type)
    }
}
