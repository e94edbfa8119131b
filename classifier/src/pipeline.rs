use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use blocker::{full_text_query_block, training_positive_block, PairIndex};
use collaborators::{CatalogStore, KbClient, SparqlClient};
use dataset_builder::{build_catalog_dataset, build_kb_dataset, Goal};
use features::{extract_chunk, FeatureVectorChunk, OccupationExpander};
use linker_core::{Pair, RunConfig};
use preprocess::{align_training_positives, infer_schema, prepare_catalog_record, prepare_kb_item};
use tracing::{info, warn};

use crate::algorithms::{build, FittedModel};
use crate::capability::{Algorithm, ClassifierCapability};
use crate::dataset::{to_predict_matrix, to_training_matrix};
use crate::error::ClassifierError;
use crate::postrules::{one_when_self_link_correct, zero_when_different_names};

/// Everything persisted for a (catalog, entity, algorithm) model (§6.1):
/// the fitted model plus the positive-pair index it was trained against,
/// so a later `classify` run can still apply the self-link override.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersistedModel {
    pub model: FittedModel,
    pub positives: PairIndex,
}

pub fn model_path(output_dir: &Path, catalog: &str, entity: &str, algorithm: Algorithm) -> std::path::PathBuf {
    output_dir.join(format!("{catalog}_{entity}_{:?}.model.bin", algorithm))
}

/// Blocks training positives, builds both dataset sides, prepares them,
/// and extracts a feature matrix (the shared first half of `train` and
/// of cross-validation, which needs the same matrix without fitting a
/// model against all of it up front).
pub async fn build_training_matrix(
    config: &RunConfig,
    catalog: &str,
    entity: &str,
    catalog_property: &str,
    qids: &[String],
    kb_client: &dyn KbClient,
    catalog_store: &dyn CatalogStore,
    sparql_client: Arc<dyn SparqlClient>,
) -> Result<(ndarray::Array2<f64>, ndarray::Array1<f64>, PairIndex), ClassifierError> {
    let kb_chunks = build_kb_dataset(
        &config.cache_dir,
        catalog,
        entity,
        Goal::Training,
        qids,
        kb_client,
        config.kb_chunk_size as usize,
    )
    .await?;
    let kb_items: Vec<_> = kb_chunks.into_iter().flatten().collect();

    let positives = training_positive_block(&kb_items, catalog_property);
    let aligned = align_training_positives(&positives.pairs);
    let positives = PairIndex::from_pairs(aligned);

    let tids: Vec<String> = positives.pairs.iter().map(|(_, tid)| tid.clone()).collect();
    let catalog_chunks = build_catalog_dataset(
        &config.cache_dir,
        catalog,
        entity,
        Goal::Training,
        Some(&tids),
        catalog_store,
        config.catalog_chunk_size as usize,
    )
    .await?;
    let catalog_records: Vec<_> = catalog_chunks.into_iter().flatten().collect();

    let prepared_kb: Vec<_> = kb_items.into_iter().map(prepare_kb_item).collect();
    let catalog_by_tid: HashMap<String, _> = catalog_records
        .into_iter()
        .map(|record| (record.tid.clone(), prepare_catalog_record(record)))
        .collect();

    let schema = infer_schema(catalog, entity, &prepared_kb, &catalog_by_tid.values().cloned().collect::<Vec<_>>());
    let occupations = OccupationExpander::new(sparql_client);
    let features = extract_chunk(&prepared_kb, &catalog_by_tid, &positives.pairs, &schema, &occupations, 8).await?;

    let (records, targets) = to_training_matrix(&features, &positives);
    info!(rows = features.rows.len(), "training matrix built");
    Ok((records, targets, positives))
}

/// Trains a model for `(catalog, entity)` against the target catalog
/// identifier property, persisting it under `config.output_dir` (§4.6
/// training lifecycle).
pub async fn train(
    config: &RunConfig,
    catalog: &str,
    entity: &str,
    catalog_property: &str,
    algorithm: Algorithm,
    qids: &[String],
    kb_client: &dyn KbClient,
    catalog_store: &dyn CatalogStore,
    sparql_client: Arc<dyn SparqlClient>,
) -> Result<PersistedModel, ClassifierError> {
    info!(catalog, entity, algorithm = ?algorithm, "training classifier");

    let (records, targets, positives) = build_training_matrix(
        config,
        catalog,
        entity,
        catalog_property,
        qids,
        kb_client,
        catalog_store,
        sparql_client,
    )
    .await?;

    if !algorithm.supports_tuning() {
        warn!(algorithm = ?algorithm, "grid-search tuning not supported for this algorithm, fitting with default hyperparameters");
    }

    let mut model = build(algorithm);
    model.fit(&records, &targets)?;

    info!("classifier fit complete");
    Ok(PersistedModel { model, positives })
}

pub fn save_model(path: &Path, persisted: &PersistedModel) -> Result<(), ClassifierError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = bincode::serialize(persisted)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

pub fn load_model(path: &Path) -> Result<PersistedModel, ClassifierError> {
    let bytes = std::fs::read(path)?;
    Ok(bincode::deserialize(&bytes)?)
}

/// Scores every candidate (QID, TID) pair produced by the full-text
/// query block for `qids`, applies the post-classification rules in
/// order, dedups keeping the first occurrence, and filters by
/// `config.classification_threshold` (§4.6 classification lifecycle).
pub async fn classify(
    config: &RunConfig,
    catalog: &str,
    entity: &str,
    persisted: &PersistedModel,
    qids: &[String],
    kb_client: &dyn KbClient,
    catalog_store: &dyn CatalogStore,
    sparql_client: Arc<dyn SparqlClient>,
) -> Result<Vec<Pair>, ClassifierError> {
    info!(catalog, entity, "classifying candidates");

    let kb_chunks = build_kb_dataset(
        &config.cache_dir,
        catalog,
        entity,
        Goal::Classification,
        qids,
        kb_client,
        config.kb_chunk_size as usize,
    )
    .await?;
    let kb_items: Vec<_> = kb_chunks.into_iter().flatten().collect();
    let prepared_kb: Vec<_> = kb_items.into_iter().map(prepare_kb_item).collect();

    let candidates = full_text_query_block(
        &prepared_kb,
        entity,
        catalog_store,
        config.fulltext_block_top_n as usize,
    )
    .await?;

    let tids: Vec<String> = candidates.pairs.iter().map(|(_, tid)| tid.clone()).collect();
    let catalog_chunks = build_catalog_dataset(
        &config.cache_dir,
        catalog,
        entity,
        Goal::Classification,
        Some(&tids),
        catalog_store,
        config.catalog_chunk_size as usize,
    )
    .await?;
    let catalog_records: Vec<_> = catalog_chunks.into_iter().flatten().collect();

    let kb_by_qid: HashMap<String, _> =
        prepared_kb.iter().map(|p| (p.item.qid.clone(), p.item.clone())).collect();
    let catalog_by_tid_raw: HashMap<String, _> =
        catalog_records.iter().map(|r| (r.tid.clone(), r.clone())).collect();
    let catalog_by_tid: HashMap<String, _> = catalog_records
        .into_iter()
        .map(|record| (record.tid.clone(), prepare_catalog_record(record)))
        .collect();

    let schema = infer_schema(catalog, entity, &prepared_kb, &catalog_by_tid.values().cloned().collect::<Vec<_>>());
    let occupations = OccupationExpander::new(sparql_client);
    let mut features: FeatureVectorChunk =
        extract_chunk(&prepared_kb, &catalog_by_tid, &candidates.pairs, &schema, &occupations, 8).await?;

    if let Some(expected) = persisted.model.expected_width() {
        features.pad_to_width(expected);
    }

    let records = to_predict_matrix(&features);
    let scores = persisted.model.predict(&records)?;

    let mut seen = std::collections::HashSet::new();
    let mut pairs = Vec::new();
    for (row, mut score) in features.rows.iter().zip(scores.into_iter()) {
        if !seen.insert((row.qid.clone(), row.tid.clone())) {
            continue;
        }
        let (Some(kb), Some(catalog)) = (kb_by_qid.get(&row.qid), catalog_by_tid_raw.get(&row.tid)) else {
            continue;
        };
        if config.name_rule {
            score = zero_when_different_names(kb, catalog, score);
        }
        if config.self_link_rule {
            score = one_when_self_link_correct(&row.qid, catalog, score);
        }
        if score >= config.classification_threshold {
            pairs.push(Pair { qid: row.qid.clone(), tid: row.tid.clone(), score });
        }
    }

    info!(total = pairs.len(), "classification complete");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_path_is_stable_per_algorithm() {
        let dir = Path::new("/tmp/out");
        let a = model_path(dir, "discogs", "person", Algorithm::NaiveBayes);
        let b = model_path(dir, "discogs", "person", Algorithm::RandomForest);
        assert_ne!(a, b);
    }
}
