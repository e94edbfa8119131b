use std::path::Path;

use collaborators::{CatalogStore, KbClient};
use linker_core::{CatalogRecord, KbItem};
use tracing::{debug, info};

use crate::cache::{catalog_dataset_path, kb_dataset_path, Goal};
use crate::error::DatasetError;
use crate::jsonl_gz::{append_gz_jsonl, chunks, read_gz_jsonl};

/// Builds (or reuses, if cached) the KB dataset for `(catalog, entity,
/// goal)` and returns it split into fixed-size chunks (§4.2, §5).
pub async fn build_kb_dataset(
    cache_dir: &Path,
    catalog: &str,
    entity: &str,
    goal: Goal,
    qids: &[String],
    client: &dyn KbClient,
    chunk_size: usize,
) -> Result<Vec<Vec<KbItem>>, DatasetError> {
    let path = kb_dataset_path(cache_dir, catalog, entity, goal);
    if path.exists() {
        info!(?path, "reusing cached KB dataset");
        let items: Vec<KbItem> = read_gz_jsonl(&path)?;
        return Ok(chunks(&items, chunk_size).collect());
    }

    info!(catalog, entity, "building KB dataset");
    let mut all = Vec::new();
    for bucket in chunks(qids, chunk_size) {
        let items = client.get_data_for_linker(catalog, entity, &bucket).await?;
        debug!(count = items.len(), "fetched KB chunk");
        append_gz_jsonl(&path, &items)?;
        all.extend(items);
    }
    info!(total = all.len(), "KB dataset built");
    Ok(chunks(&all, chunk_size).collect())
}

/// Builds (or reuses) the catalog dataset for `(catalog, entity, goal)`
/// filtered to `tids` (the positives in training, or the blocker's
/// candidate TIDs in classification).
pub async fn build_catalog_dataset(
    cache_dir: &Path,
    catalog: &str,
    entity: &str,
    goal: Goal,
    tids: Option<&[String]>,
    store: &dyn CatalogStore,
    chunk_size: usize,
) -> Result<Vec<Vec<CatalogRecord>>, DatasetError> {
    let path = catalog_dataset_path(cache_dir, catalog, entity, goal);
    if path.exists() {
        info!(?path, "reusing cached catalog dataset");
        let records: Vec<CatalogRecord> = read_gz_jsonl(&path)?;
        return Ok(chunks(&records, chunk_size).collect());
    }

    info!(catalog, entity, "building catalog dataset");
    let records = store.entity_rows(entity, tids).await?;
    append_gz_jsonl(&path, &records)?;
    info!(total = records.len(), "catalog dataset built");
    Ok(chunks(&records, chunk_size).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collaborators::FileKbClient;

    #[tokio::test]
    async fn reuses_cached_dataset_on_second_call() {
        let dir = std::env::temp_dir().join(format!("dataset-builder-cache-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let kb_path = dir.join("source.jsonl");
        std::fs::write(&kb_path, "{\"qid\":\"Q1\",\"labels\":[\"Joey Ramone\"]}\n").unwrap();
        let client = FileKbClient::new(&kb_path);

        let first = build_kb_dataset(&dir, "cat", "person", Goal::Training, &[], &client, 1000)
            .await
            .unwrap();
        assert_eq!(first.iter().map(|c| c.len()).sum::<usize>(), 1);

        // second call must not re-fetch: truncate the collaborator source
        // and confirm the cached file still satisfies the read.
        std::fs::write(&kb_path, "").unwrap();
        let second = build_kb_dataset(&dir, "cat", "person", Goal::Training, &[], &client, 1000)
            .await
            .unwrap();
        assert_eq!(second.iter().map(|c| c.len()).sum::<usize>(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
