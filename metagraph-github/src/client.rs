//! GraphQL transport over reqwest

use std::time::Duration;

use async_trait::async_trait;
use metagraph_core::{Config, TokenProvider};
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::{Error, Result};

/// Sends a literal GraphQL query and returns the parsed JSON body
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    async fn post_query(&self, query: &str) -> Result<Value>;
}

/// Authenticated GitHub GraphQL client
pub struct GraphQLClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl GraphQLClient {
    /// Create a client for `endpoint` authenticating with `token`
    pub fn new(endpoint: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| Error::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("metagraph/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    /// Create a client from configuration
    ///
    /// Token is loaded from (in priority order):
    /// 1. The configured environment variable
    /// 2. The configured gzip token file
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = TokenProvider::from_config(&config.auth).get_token()?;
        let client = Self::new(
            &config.github.endpoint,
            token,
            config.github.request_timeout,
        )?;

        info!(endpoint = %client.endpoint, "Created GraphQL client");

        Ok(client)
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQLTransport for GraphQLClient {
    async fn post_query(&self, query: &str) -> Result<Value> {
        debug!(endpoint = %self.endpoint, bytes = query.len(), "Posting GraphQL query");

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::MalformedResponse(format!("response body is not JSON: {}", e)))
    }
}

impl std::fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GraphQLClient {
        GraphQLClient::new(
            &format!("{}/graphql", server.uri()),
            "ghp_test",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_post_query_sends_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer ghp_test"))
            .and(body_json(json!({ "query": "query{ viewer { login } }" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "viewer": { "login": "octocat" } } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .post_query("query{ viewer { login } }")
            .await
            .unwrap();

        assert_eq!(body["data"]["viewer"]["login"], "octocat");
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).post_query("query{}").await.unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).post_query("query{}").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = GraphQLClient::new("not a url", "t", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let client =
            GraphQLClient::new("https://api.github.com/graphql", "ghp_secret", Duration::from_secs(1))
                .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("api.github.com"));
        assert!(!debug.contains("ghp_secret"));
    }
}
