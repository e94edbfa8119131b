use std::path::{Path, PathBuf};

use async_trait::async_trait;
use linker_core::{CatalogRecord, CollaboratorError, KbItem};
use tracing::warn;

use crate::traits::{CatalogStore, KbClient};

/// Reads `CatalogRecord`s from a JSONL file, one per line. Malformed
/// lines are logged and skipped rather than aborting the run (§7).
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn entity_rows(
        &self,
        _entity: &str,
        tids: Option<&[String]>,
    ) -> Result<Vec<CatalogRecord>, CollaboratorError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;
        let mut out = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CatalogRecord>(line) {
                Ok(record) => {
                    if tids.map(|t| t.contains(&record.tid)).unwrap_or(true) {
                        out.push(record);
                    }
                }
                Err(e) => warn!(lineno, error = %e, "skipping malformed catalog row"),
            }
        }
        Ok(out)
    }

    async fn search_candidates(
        &self,
        entity: &str,
        terms: &[String],
        top_n: usize,
    ) -> Result<Vec<String>, CollaboratorError> {
        let rows = self.entity_rows(entity, None).await?;
        let query: std::collections::BTreeSet<String> = terms.iter().map(|t| t.to_ascii_lowercase()).collect();
        let mut scored: Vec<(usize, String)> = rows
            .into_iter()
            .map(|row| {
                let row_tokens: std::collections::BTreeSet<String> =
                    row.name.iter().flat_map(|n| n.split_whitespace()).map(|w| w.to_ascii_lowercase()).collect();
                let overlap = query.intersection(&row_tokens).count();
                (overlap, row.tid)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().take(top_n).map(|(_, tid)| tid).collect())
    }
}

/// Reads `KbItem`s from a JSONL file. Used for tests and offline runs in
/// place of the live KB web API.
pub struct FileKbClient {
    path: PathBuf,
}

impl FileKbClient {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl KbClient for FileKbClient {
    async fn get_data_for_linker(
        &self,
        _catalog: &str,
        _entity: &str,
        qids: &[String],
    ) -> Result<Vec<KbItem>, CollaboratorError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;
        let mut out = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<KbItem>(line) {
                Ok(item) => {
                    if qids.is_empty() || qids.contains(&item.qid) {
                        out.push(item);
                    }
                }
                Err(e) => warn!(lineno, error = %e, "skipping malformed KB row"),
            }
        }
        Ok(out)
    }

    async fn get_metadata(&self, qids: &[String]) -> Result<Vec<(String, String, String)>, CollaboratorError> {
        let items = self.get_data_for_linker("", "", qids).await?;
        let mut out = Vec::new();
        for item in items {
            if let Some(g) = &item.gender {
                out.push((item.qid.clone(), "gender".to_string(), g.clone()));
            }
        }
        Ok(out)
    }

    async fn get_links(&self, qids: &[String]) -> Result<Vec<(String, String)>, CollaboratorError> {
        let items = self.get_data_for_linker("", "", qids).await?;
        let mut out = Vec::new();
        for item in items {
            for url in item.sitelinks.iter().chain(item.third_party_urls.iter()) {
                out.push((item.qid.clone(), url.clone()));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_malformed_lines_and_keeps_valid_ones() {
        let path = std::env::temp_dir().join(format!("collab-test-{}.jsonl", std::process::id()));
        std::fs::write(
            &path,
            "{\"qid\":\"Q1\",\"labels\":[\"Joey Ramone\"]}\nnot json\n{\"qid\":\"Q2\",\"labels\":[\"Another\"]}\n",
        )
        .unwrap();
        let client = FileKbClient::new(&path);
        let items = client.get_data_for_linker("catalog", "entity", &[]).await.unwrap();
        assert_eq!(items.len(), 2);
        let _ = std::fs::remove_file(&path);
    }
}
