//! Project board fields and items

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Items keyed by issue key (`"i" + number`)
pub type ItemMap = BTreeMap<String, Item>;

/// Canonical identifier of an issue-backed item
pub fn issue_key(number: u64) -> String {
    format!("i{}", number)
}

/// One option of a single-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: String,
    pub name: String,
}

/// A custom field defined on the project board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    /// Empty unless the field is single-select
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

/// Value held by an item for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValueKind {
    Text(String),
    Date(NaiveDate),
    SingleSelect(String),
}

/// A field value attached to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub field_name: String,
    pub kind: FieldValueKind,
}

impl FieldValue {
    pub fn text(field_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FieldValueKind::Text(text.into()),
        }
    }

    pub fn single_select(field_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FieldValueKind::SingleSelect(name.into()),
        }
    }

    pub fn date(field_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            field_name: field_name.into(),
            kind: FieldValueKind::Date(date),
        }
    }

    /// Text or single-select name; dates have no string value
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            FieldValueKind::Text(text) => Some(text),
            FieldValueKind::SingleSelect(name) => Some(name),
            FieldValueKind::Date(_) => None,
        }
    }
}

/// One card on the board, backed by an issue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    /// Project item node id
    pub id: String,
    /// Issue number
    pub number: u64,
    /// Issue title as stored on the issue itself
    pub title: String,
    /// Issue body text
    pub body: String,
    /// Field values in the order the API returned them
    pub field_values: Vec<FieldValue>,
    attributes: HashMap<String, String>,
}

impl Item {
    pub fn new(id: impl Into<String>, number: u64) -> Self {
        Self {
            id: id.into(),
            number,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_field(mut self, value: FieldValue) -> Self {
        self.field_values.push(value);
        self
    }

    /// Key under which this item is stored
    pub fn key(&self) -> String {
        issue_key(self.number)
    }

    /// Fold every field value into the attribute map under its field name
    ///
    /// Later values for the same field replace earlier ones.
    pub fn flatten_fields(&mut self) {
        for value in &self.field_values {
            if let Some(v) = value.value() {
                self.attributes
                    .insert(value.field_name.clone(), v.to_string());
            }
        }
    }

    /// Flattened value of a field, if any
    pub fn attribute(&self, field_name: &str) -> Option<&str> {
        self.attributes.get(field_name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key() {
        assert_eq!(issue_key(42), "i42");
        assert_eq!(Item::new("PVTI_1", 7).key(), "i7");
    }

    #[test]
    fn test_flatten_fields() {
        let mut item = Item::new("PVTI_1", 1)
            .with_field(FieldValue::text("Title", "Gene adapter"))
            .with_field(FieldValue::single_select("Data Type", "Tabular"))
            .with_field(FieldValue::date(
                "Start date",
                NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            ));

        assert!(item.attribute("Title").is_none());

        item.flatten_fields();

        assert_eq!(item.attribute("Title"), Some("Gene adapter"));
        assert_eq!(item.attribute("Data Type"), Some("Tabular"));
        assert_eq!(item.attribute("Start date"), None);
    }

    #[test]
    fn test_flatten_last_value_wins() {
        let mut item = Item::new("PVTI_1", 1)
            .with_field(FieldValue::single_select("Data Type", "Tabular"))
            .with_field(FieldValue::single_select("Data Type", "Graph"));
        item.flatten_fields();
        assert_eq!(item.attribute("Data Type"), Some("Graph"));
    }
}
