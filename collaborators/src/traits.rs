use async_trait::async_trait;
use linker_core::{CatalogRecord, CollaboratorError, KbItem};

/// A single edit to upload: (subject, predicate, value, reference id).
/// Mirrors the tuple contract the edit bot is expected to accept (§6).
#[derive(Debug, Clone)]
pub struct EditTuple {
    pub subject: String,
    pub predicate: String,
    pub value: String,
    pub reference_id: String,
}

/// External catalog relational store (§4.2, §6). Out of core scope in
/// production (an importer owns ingestion into the real store); this
/// trait is the seam the dataset builder consumes, with a file-backed
/// implementation for tests and offline runs.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn entity_rows(
        &self,
        entity: &str,
        tids: Option<&[String]>,
    ) -> Result<Vec<CatalogRecord>, CollaboratorError>;

    /// Full-text search over catalog names for `entity`, returning up to
    /// `top_n` matching TIDs ranked by relevance to `terms` (§4.4).
    async fn search_candidates(
        &self,
        entity: &str,
        terms: &[String],
        top_n: usize,
    ) -> Result<Vec<String>, CollaboratorError>;
}

/// KB web-API client (§6): `get_data_for_linker`, `get_metadata`,
/// `get_links`.
#[async_trait]
pub trait KbClient: Send + Sync {
    async fn get_data_for_linker(
        &self,
        catalog: &str,
        entity: &str,
        qids: &[String],
    ) -> Result<Vec<KbItem>, CollaboratorError>;

    /// Returns `(qid, property, value)` triples.
    async fn get_metadata(&self, qids: &[String]) -> Result<Vec<(String, String, String)>, CollaboratorError>;

    /// Returns `(qid, url)` pairs.
    async fn get_links(&self, qids: &[String]) -> Result<Vec<(String, String)>, CollaboratorError>;
}

/// SPARQL client (§6), used by occupation-class expansion (§4.5.7) and
/// dead-ID checks against the KB side.
#[async_trait]
pub trait SparqlClient: Send + Sync {
    async fn superclasses(&self, class_qid: &str) -> Result<Vec<String>, CollaboratorError>;
    async fn subclasses(&self, class_qid: &str) -> Result<Vec<String>, CollaboratorError>;
}

/// Idempotent edit-upload bot (§6).
#[async_trait]
pub trait EditBot: Send + Sync {
    async fn upload(&self, edits: &[EditTuple]) -> Result<(), CollaboratorError>;
}

/// Wraps `text_normalize::resolve`'s GET-and-classify behavior behind a
/// trait so validators can be tested against a stub.
#[async_trait]
pub trait UrlResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> text_normalize::Liveness;
}
