//! GitHub GraphQL queries and response shapes for ProjectV2 boards

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::models::{Field, FieldOption, FieldValue, FieldValueKind, Item};
use crate::{Error, Result};

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

/// Unwrap the `data` member of a GraphQL response body
///
/// Errors alongside usable data are logged and the data is returned; the
/// caller's path checks decide whether it is complete.
pub(crate) fn decode_data<T: DeserializeOwned>(body: Value) -> Result<T> {
    let response: GraphQLResponse = serde_json::from_value(body)
        .map_err(|e| Error::MalformedResponse(format!("not a GraphQL response: {}", e)))?;

    let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();

    match response.data {
        Some(data) if !data.is_null() => {
            if !messages.is_empty() {
                warn!(errors = %messages.join(", "), "GraphQL response carried errors");
            }
            serde_json::from_value(data)
                .map_err(|e| Error::MalformedResponse(format!("unexpected data shape: {}", e)))
        }
        _ if !messages.is_empty() => Err(Error::GraphQL(messages.join(", "))),
        _ => Err(Error::MalformedResponse(
            "GraphQL response missing data".to_string(),
        )),
    }
}

/// Render a string as a GraphQL string literal
fn literal(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}

pub(crate) fn project_id_query(organization: &str, number: u64) -> String {
    format!(
        r#"query {{
  organization(login: {org}) {{
    projectV2(number: {number}) {{
      id
    }}
  }}
}}"#,
        org = literal(organization),
        number = number,
    )
}

pub(crate) fn fields_query(project_id: &str, first: u32) -> String {
    format!(
        r#"query {{
  node(id: {id}) {{
    ... on ProjectV2 {{
      fields(first: {first}) {{
        nodes {{
          ... on ProjectV2Field {{
            id
            name
          }}
          ... on ProjectV2SingleSelectField {{
            id
            name
            options {{
              id
              name
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
        id = literal(project_id),
        first = first,
    )
}

pub(crate) fn items_query(
    project_id: &str,
    first: u32,
    field_values: u32,
    after: Option<&str>,
) -> String {
    let after = after
        .map(|cursor| format!(", after: {}", literal(cursor)))
        .unwrap_or_default();

    format!(
        r#"query {{
  node(id: {id}) {{
    ... on ProjectV2 {{
      items(first: {first}{after}) {{
        nodes {{
          id
          fieldValues(first: {field_values}) {{
            nodes {{
              ... on ProjectV2ItemFieldTextValue {{
                text
                field {{ ... on ProjectV2FieldCommon {{ name }} }}
              }}
              ... on ProjectV2ItemFieldDateValue {{
                date
                field {{ ... on ProjectV2FieldCommon {{ name }} }}
              }}
              ... on ProjectV2ItemFieldSingleSelectValue {{
                name
                field {{ ... on ProjectV2FieldCommon {{ name }} }}
              }}
            }}
          }}
          content {{
            ... on Issue {{
              title
              body
              number
            }}
          }}
        }}
        pageInfo {{
          endCursor
          hasNextPage
        }}
      }}
    }}
  }}
}}"#,
        id = literal(project_id),
        first = first,
        after = after,
        field_values = field_values,
    )
}

/// Generic `{ nodes: [...] }` connection
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Connection<T> {
    #[serde(default)]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectIdData {
    pub organization: Option<OrganizationData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationData {
    #[serde(rename = "projectV2")]
    pub project_v2: Option<ProjectRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldsData {
    pub node: Option<FieldsNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldsNode {
    pub fields: Option<Connection<RawField>>,
}

/// Field definition; fields matching neither fragment arrive as `{}`
#[derive(Debug, Deserialize)]
pub(crate) struct RawField {
    pub id: Option<String>,
    pub name: Option<String>,
    pub options: Option<Vec<FieldOption>>,
}

impl RawField {
    pub fn into_field(self) -> Option<Field> {
        Some(Field {
            id: self.id.unwrap_or_default(),
            name: self.name?,
            options: self.options.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsData {
    pub node: Option<ItemsNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsNode {
    pub items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemConnection {
    #[serde(default)]
    pub nodes: Vec<Option<RawItem>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItem {
    pub id: String,
    pub field_values: Option<Connection<RawFieldValue>>,
    pub content: Option<RawContent>,
}

/// Issue content; draft items and pull requests arrive as `{}`
#[derive(Debug, Deserialize)]
pub(crate) struct RawContent {
    pub title: Option<String>,
    pub body: Option<String>,
    pub number: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFieldValue {
    pub text: Option<String>,
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub field: Option<FieldRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldRef {
    pub name: Option<String>,
}

impl RawFieldValue {
    pub fn into_field_value(self) -> Option<FieldValue> {
        let field_name = self.field?.name?;
        let kind = match (self.text, self.name, self.date) {
            (Some(text), _, _) => FieldValueKind::Text(text),
            (None, Some(name), _) => FieldValueKind::SingleSelect(name),
            (None, None, Some(date)) => FieldValueKind::Date(date),
            (None, None, None) => return None,
        };
        Some(FieldValue { field_name, kind })
    }
}

impl RawItem {
    /// Convert to an [`Item`]; `None` when no issue is linked
    pub fn into_item(self) -> Option<Item> {
        let content = self.content?;
        let number = content.number?;

        let field_values = self
            .field_values
            .map(|c| {
                c.nodes
                    .into_iter()
                    .flatten()
                    .filter_map(RawFieldValue::into_field_value)
                    .collect()
            })
            .unwrap_or_default();

        let mut item = Item::new(self.id, number).with_body(content.body.unwrap_or_default());
        item.title = content.title.unwrap_or_default();
        item.field_values = field_values;
        Some(item)
    }
}
