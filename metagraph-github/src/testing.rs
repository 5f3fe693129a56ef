//! Scripted transport and response builders for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::GraphQLTransport;
use crate::{Error, Result};

/// Replays canned response bodies in order and records every query
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Value>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl GraphQLTransport for ScriptedTransport {
    async fn post_query(&self, query: &str) -> Result<Value> {
        self.queries.lock().unwrap().push(query.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::MalformedResponse("no scripted response left".to_string()))
    }
}

pub(crate) fn project_id_response(id: &str) -> Value {
    json!({ "data": { "organization": { "projectV2": { "id": id } } } })
}

pub(crate) fn fields_response(nodes: Value) -> Value {
    json!({ "data": { "node": { "fields": { "nodes": nodes } } } })
}

pub(crate) fn items_page(nodes: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "data": { "node": { "items": {
            "nodes": nodes,
            "pageInfo": {
                "endCursor": next_cursor,
                "hasNextPage": next_cursor.is_some()
            }
        } } }
    })
}

/// Issue-backed item whose only field value is its Title
pub(crate) fn issue_item(number: u64, title: &str, body: &str) -> Value {
    issue_item_with(number, title, body, vec![text_value("Title", title)])
}

pub(crate) fn issue_item_with(number: u64, title: &str, body: &str, values: Vec<Value>) -> Value {
    json!({
        "id": format!("PVTI_{}", number),
        "fieldValues": { "nodes": values },
        "content": { "title": title, "body": body, "number": number }
    })
}

pub(crate) fn text_value(field: &str, text: &str) -> Value {
    json!({ "text": text, "field": { "name": field } })
}

pub(crate) fn select_value(field: &str, name: &str) -> Value {
    json!({ "name": name, "field": { "name": field } })
}
