use async_trait::async_trait;
use linker_core::CollaboratorError;

use crate::retry::with_single_retry;
use crate::traits::{SparqlClient, UrlResolver};

/// `reqwest`-backed SPARQL client, bucketed per §5 (the caller is
/// expected to batch queries into buckets of up to 500 identifiers and
/// call this once per bucket).
pub struct HttpSparqlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSparqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.into() }
    }

    async fn query_classes(&self, class_qid: &str, direction: &str) -> Result<Vec<String>, CollaboratorError> {
        with_single_retry("sparql_query_classes", || async {
            let resp = self
                .client
                .get(&self.endpoint)
                .query(&[("class", class_qid), ("direction", direction), ("format", "json")])
                .send()
                .await
                .map_err(CollaboratorError::from)?;
            if !resp.status().is_success() {
                return Err(CollaboratorError::HttpStatus(resp.status().as_u16()));
            }
            let body: Vec<String> = resp
                .json()
                .await
                .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
            Ok(body)
        })
        .await
    }
}

#[async_trait]
impl SparqlClient for HttpSparqlClient {
    async fn superclasses(&self, class_qid: &str) -> Result<Vec<String>, CollaboratorError> {
        self.query_classes(class_qid, "super").await
    }

    async fn subclasses(&self, class_qid: &str) -> Result<Vec<String>, CollaboratorError> {
        self.query_classes(class_qid, "sub").await
    }
}

/// `reqwest`-backed URL resolver delegating the actual GET-and-classify
/// behavior to `text_normalize::resolve`.
pub struct HttpUrlResolver {
    client: reqwest::Client,
}

impl Default for HttpUrlResolver {
    fn default() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

#[async_trait]
impl UrlResolver for HttpUrlResolver {
    async fn resolve(&self, url: &str) -> text_normalize::Liveness {
        text_normalize::resolve(&self.client, url).await
    }
}
