//! Metagraph GitHub - GitHub Projects integration for the meta graph
//!
//! This crate fetches a ProjectV2 board over GraphQL and turns its items
//! into adapter/pipeline nodes and "part of"/"uses" edges.

mod adapter;
mod client;
mod error;
mod graphql;
mod models;
mod project;
#[cfg(test)]
mod testing;
mod uses;

pub use adapter::{
    build_field_option_nodes, build_item_node, build_part_of_edges, build_uses_field_edges,
    derive_label, flatten_item_fields, MetaAdapter, OPTION_FIELDS,
};
pub use client::{GraphQLClient, GraphQLTransport};
pub use error::{Error, Result};
pub use models::{issue_key, Field, FieldOption, FieldValue, FieldValueKind, Item, ItemMap};
pub use project::{ProjectFetcher, ProjectSnapshot};
pub use uses::{extract_uses_list, reference_key, USES_PREFIX};
