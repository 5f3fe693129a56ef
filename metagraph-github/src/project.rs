//! Project board fetching: id lookup, field definitions, paginated items

use metagraph_core::GitHubConfig;
use tracing::{debug, info};

use crate::client::GraphQLTransport;
use crate::graphql::{
    decode_data, fields_query, items_query, project_id_query, FieldsData, ItemsData,
    ProjectIdData,
};
use crate::models::{Field, ItemMap};
use crate::{Error, Result};

/// Everything fetched from the board in one run
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    pub fields: Vec<Field>,
    pub items: ItemMap,
}

/// Fetches a single ProjectV2 board through a GraphQL transport
#[derive(Debug)]
pub struct ProjectFetcher<T> {
    transport: T,
    settings: GitHubConfig,
}

impl<T: GraphQLTransport> ProjectFetcher<T> {
    pub fn new(transport: T, settings: GitHubConfig) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Get the board settings
    pub fn settings(&self) -> &GitHubConfig {
        &self.settings
    }

    /// Fetch fields and items of the configured board
    pub async fn fetch_project(&self) -> Result<ProjectSnapshot> {
        let project_id = self
            .resolve_project_id(&self.settings.organization, self.settings.project_number)
            .await?;
        let fields = self.fetch_fields(&project_id).await?;
        let items = self.fetch_items(&project_id).await?;

        Ok(ProjectSnapshot { fields, items })
    }

    /// Look up the node id of `organization`'s project number `number`
    pub async fn resolve_project_id(&self, organization: &str, number: u64) -> Result<String> {
        debug!(organization, number, "Resolving project id");

        let body = self
            .transport
            .post_query(&project_id_query(organization, number))
            .await?;
        let data: ProjectIdData = decode_data(body)?;

        let id = data
            .organization
            .and_then(|o| o.project_v2)
            .map(|p| p.id)
            .ok_or_else(|| Error::ProjectNotFound {
                organization: organization.to_string(),
                number,
            })?;

        info!(organization, number, project_id = %id, "Resolved project");
        Ok(id)
    }

    /// Fetch the board's field definitions
    ///
    /// Single request; anything past `field_page_size` fields is not seen.
    pub async fn fetch_fields(&self, project_id: &str) -> Result<Vec<Field>> {
        debug!(project_id, "Fetching project fields");

        let body = self
            .transport
            .post_query(&fields_query(project_id, self.settings.field_page_size))
            .await?;
        let data: FieldsData = decode_data(body)?;

        let connection = data
            .node
            .and_then(|n| n.fields)
            .ok_or_else(|| Error::MalformedResponse("node.fields missing".to_string()))?;

        let fields: Vec<Field> = connection
            .nodes
            .into_iter()
            .flatten()
            .filter_map(|raw| raw.into_field())
            .collect();

        info!(count = fields.len(), "Fetched project fields");
        Ok(fields)
    }

    /// Fetch every issue-backed item, following the page cursor
    ///
    /// Items without a linked issue are dropped. Two items for the same
    /// issue collapse to the last one seen.
    pub async fn fetch_items(&self, project_id: &str) -> Result<ItemMap> {
        let mut items = ItemMap::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0u32;

        loop {
            if pages >= self.settings.max_pages {
                return Err(Error::PaginationLimit(self.settings.max_pages));
            }
            pages += 1;

            debug!(project_id, page = pages, cursor = ?cursor, "Fetching project items");

            let query = items_query(
                project_id,
                self.settings.item_page_size,
                self.settings.field_value_page_size,
                cursor.as_deref(),
            );
            let data: ItemsData = decode_data(self.transport.post_query(&query).await?)?;

            let connection = data
                .node
                .and_then(|n| n.items)
                .ok_or_else(|| Error::MalformedResponse("node.items missing".to_string()))?;

            for raw in connection.nodes.into_iter().flatten() {
                let raw_id = raw.id.clone();
                match raw.into_item() {
                    Some(item) => {
                        let key = item.key();
                        if items.insert(key.clone(), item).is_some() {
                            debug!(key = %key, item = %raw_id, "Duplicate issue on board, keeping last");
                        }
                    }
                    None => debug!(item = %raw_id, "Skipping item without linked issue"),
                }
            }

            if !connection.page_info.has_next_page {
                break;
            }

            cursor = Some(connection.page_info.end_cursor.ok_or_else(|| {
                Error::MalformedResponse("hasNextPage set without endCursor".to_string())
            })?);
        }

        info!(count = items.len(), pages, "Fetched project items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        fields_response, issue_item, items_page, project_id_response, ScriptedTransport,
    };
    use serde_json::json;

    fn fetcher(transport: ScriptedTransport) -> ProjectFetcher<ScriptedTransport> {
        ProjectFetcher::new(transport, GitHubConfig::default())
    }

    fn numbered(range: std::ops::Range<u64>) -> Vec<serde_json::Value> {
        range.map(|n| issue_item(n, &format!("Item {}", n), "")).collect()
    }

    #[tokio::test]
    async fn test_resolve_project_id() {
        let f = fetcher(ScriptedTransport::new(vec![project_id_response("PVT_3")]));
        let id = f.resolve_project_id("biocypher", 3).await.unwrap();
        assert_eq!(id, "PVT_3");

        let queries = f.transport.queries();
        assert!(queries[0].contains(r#"organization(login: "biocypher")"#));
        assert!(queries[0].contains("projectV2(number: 3)"));
    }

    #[tokio::test]
    async fn test_project_not_found() {
        let f = fetcher(ScriptedTransport::new(vec![json!({
            "data": { "organization": { "projectV2": null } }
        })]));
        let err = f.resolve_project_id("biocypher", 99).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ProjectNotFound { ref organization, number: 99 } if organization == "biocypher"
        ));
    }

    #[tokio::test]
    async fn test_missing_data_is_malformed() {
        let f = fetcher(ScriptedTransport::new(vec![json!({ "message": "Bad credentials" })]));
        let err = f.resolve_project_id("biocypher", 3).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_fields() {
        let f = fetcher(ScriptedTransport::new(vec![fields_response(json!([
            { "id": "F1", "name": "Title" },
            { "id": "F2", "name": "Data Type", "options": [
                { "id": "o1", "name": "Tabular" },
                { "id": "o2", "name": "Graph" }
            ] },
            {}
        ]))]));

        let fields = f.fetch_fields("PVT_3").await.unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].options.len(), 2);
        assert!(f.transport.queries()[0].contains("fields(first: 20)"));
    }

    #[tokio::test]
    async fn test_pagination_accumulates_pages() {
        let f = fetcher(ScriptedTransport::new(vec![
            items_page(numbered(0..20), Some("c1")),
            items_page(numbered(20..40), Some("c2")),
            items_page(numbered(40..45), None),
        ]));

        let items = f.fetch_items("PVT_3").await.unwrap();
        assert_eq!(items.len(), 45);

        let queries = f.transport.queries();
        assert_eq!(queries.len(), 3);
        assert!(!queries[0].contains("after:"));
        assert!(queries[1].contains(r#"after: "c1""#));
        assert!(queries[2].contains(r#"after: "c2""#));
    }

    #[tokio::test]
    async fn test_items_without_issue_are_dropped() {
        let draft = json!({ "id": "PVTI_draft", "fieldValues": { "nodes": [] }, "content": {} });
        let f = fetcher(ScriptedTransport::new(vec![items_page(
            vec![issue_item(1, "One", ""), draft, issue_item(2, "Two", "")],
            None,
        )]));

        let items = f.fetch_items("PVT_3").await.unwrap();
        assert_eq!(items.keys().collect::<Vec<_>>(), vec!["i1", "i2"]);
    }

    // Silent overwrite on duplicate issues is kept as observed behavior
    // rather than a verified requirement.
    #[tokio::test]
    async fn test_duplicate_issue_last_wins() {
        let f = fetcher(ScriptedTransport::new(vec![items_page(
            vec![issue_item(1, "First", ""), issue_item(1, "Second", "")],
            None,
        )]));

        let items = f.fetch_items("PVT_3").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items["i1"].title, "Second");
    }

    #[tokio::test]
    async fn test_next_page_without_cursor() {
        let mut page = items_page(numbered(0..1), None);
        page["data"]["node"]["items"]["pageInfo"]["hasNextPage"] = json!(true);
        let f = fetcher(ScriptedTransport::new(vec![page]));

        let err = f.fetch_items("PVT_3").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_pagination_limit() {
        let settings = GitHubConfig {
            max_pages: 2,
            ..GitHubConfig::default()
        };
        let f = ProjectFetcher::new(
            ScriptedTransport::new(vec![
                items_page(numbered(0..1), Some("c1")),
                items_page(numbered(1..2), Some("c2")),
                items_page(numbered(2..3), Some("c3")),
            ]),
            settings,
        );

        let err = f.fetch_items("PVT_3").await.unwrap_err();
        assert!(matches!(err, Error::PaginationLimit(2)));
        assert_eq!(f.transport.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_project_runs_queries_in_order() {
        let f = fetcher(ScriptedTransport::new(vec![
            project_id_response("PVT_3"),
            fields_response(json!([{ "id": "F1", "name": "Title" }])),
            items_page(numbered(1..3), None),
        ]));

        let snapshot = f.fetch_project().await.unwrap();
        assert_eq!(snapshot.fields.len(), 1);
        assert_eq!(snapshot.items.len(), 2);

        let queries = f.transport.queries();
        assert!(queries[0].contains("organization("));
        assert!(queries[1].contains(r#"node(id: "PVT_3")"#) && queries[1].contains("fields("));
        assert!(queries[2].contains("items(first: 20)"));
    }
}
