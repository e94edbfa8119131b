use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use linker_core::{CollaboratorError, EntitySchema};
use preprocess::{PreparedCatalogRecord, PreparedKbItem};

use crate::cosine::{cosine_similarity, Analyzer};
use crate::dates::similar_dates;
use crate::exact_match::exact_match;
use crate::levenshtein::levenshtein_similarity;
use crate::occupations::{shared_occupations, OccupationExpander};
use crate::shared_tokens::{shared_tokens, shared_tokens_plus};
use crate::vector::{FeatureRow, FeatureVectorChunk, MISSING_VALUE};

/// A column counts as usable for this pair only if the chunk-level
/// schema carries it on both sides *and* this particular row has a
/// value for it (§3.1/§4.5: chunk-level presence is declarative, the
/// per-row null check still applies beneath it).
fn column_present(schema: &EntitySchema, name: &str, kb_has_value: bool, catalog_has_value: bool) -> bool {
    schema.kb_column(name).is_some() && schema.catalog_column(name).is_some() && kb_has_value && catalog_has_value
}

/// Computes the fixed-width feature row for one (KB item, catalog
/// record) pair (§4.5). A column absent from `schema` on either side, or
/// null on either side of this particular pair, receives `MISSING_VALUE`
/// rather than a computed score.
pub async fn extract_pair(
    kb: &PreparedKbItem,
    catalog: &PreparedCatalogRecord,
    schema: &EntitySchema,
    occupations: &OccupationExpander,
) -> Result<FeatureRow, CollaboratorError> {
    let name_exact = exact_match(&kb.item.labels, &catalog.record.name, 1.0, 0.0, MISSING_VALUE);

    let name_levenshtein = if column_present(schema, "name", !kb.item.labels.is_empty(), !catalog.record.name.is_empty()) {
        levenshtein_similarity(&kb.item.labels, &catalog.record.name, None)
    } else {
        MISSING_VALUE
    };

    let name_cosine = if column_present(schema, "name", !kb.item.labels.is_empty(), !catalog.record.name.is_empty()) {
        cosine_similarity(&kb.item.labels, &catalog.record.name, Analyzer::Word { n: 1 })
    } else {
        MISSING_VALUE
    };

    let date_of_birth_similar = match (kb.item.birth_date, catalog.record.birth_date) {
        (Some(a), Some(b)) if column_present(schema, "birth_date", true, true) => similar_dates(&[a], &[b]),
        _ => MISSING_VALUE,
    };

    let date_of_death_similar = match (kb.item.death_date, catalog.record.death_date) {
        (Some(a), Some(b)) if column_present(schema, "death_date", true, true) => similar_dates(&[a], &[b]),
        _ => MISSING_VALUE,
    };

    let url_shared_tokens_plus = if column_present(schema, "url", !kb.url_tokens.is_empty(), !catalog.url_tokens.is_empty()) {
        shared_tokens_plus(&kb.url_tokens, &catalog.url_tokens, None)
    } else {
        MISSING_VALUE
    };

    let occupation_shared = if column_present(
        schema,
        "occupations",
        !kb.item.occupations.is_empty(),
        !catalog.record.relationships.is_empty(),
    ) {
        let mut expanded = std::collections::BTreeSet::new();
        for (related_id, kind) in &catalog.record.relationships {
            if kind == "occupation" {
                expanded.extend(occupations.expand(related_id).await?);
            }
        }
        shared_occupations(&kb.item.occupations, &expanded)
    } else {
        MISSING_VALUE
    };

    let genre_shared_tokens = if column_present(schema, "genres", !kb.genre_tokens.is_empty(), !catalog.genre_tokens.is_empty()) {
        shared_tokens(&kb.genre_tokens, &catalog.genre_tokens)
    } else {
        MISSING_VALUE
    };

    Ok(FeatureRow {
        qid: kb.item.qid.clone(),
        tid: catalog.record.tid.clone(),
        values: vec![
            name_exact,
            name_levenshtein,
            name_cosine,
            date_of_birth_similar,
            date_of_death_similar,
            url_shared_tokens_plus,
            occupation_shared,
            genre_shared_tokens,
        ],
    })
}

/// Computes feature rows for every candidate pair in a chunk, fanning
/// out with bounded concurrency (§5) — one task per (KB item, candidate
/// TID), generalized from the embedding-fan-out idiom used elsewhere in
/// this codebase. `schema` is inferred once for the whole chunk
/// (`preprocess::infer_schema`) and applied declaratively to every pair,
/// rather than re-deriving column presence per pair.
pub async fn extract_chunk(
    kb_items: &[PreparedKbItem],
    catalog_by_tid: &HashMap<String, PreparedCatalogRecord>,
    candidate_pairs: &[(String, String)],
    schema: &EntitySchema,
    occupations: &OccupationExpander,
    concurrency: usize,
) -> Result<FeatureVectorChunk, CollaboratorError> {
    let kb_by_qid: HashMap<&str, &PreparedKbItem> =
        kb_items.iter().map(|item| (item.item.qid.as_str(), item)).collect();

    let results: Vec<FeatureRow> = stream::iter(candidate_pairs.iter())
        .filter_map(|(qid, tid)| {
            let kb = kb_by_qid.get(qid.as_str()).copied();
            let catalog = catalog_by_tid.get(tid);
            async move { kb.zip(catalog) }
        })
        .map(|(kb, catalog)| async move { extract_pair(kb, catalog, schema, occupations).await })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, CollaboratorError>>()?;

    Ok(FeatureVectorChunk::from_rows(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use collaborators::SparqlClient;
    use linker_core::{CatalogRecord, KbItem};
    use preprocess::{prepare_catalog_record, prepare_kb_item};
    use std::sync::Arc;

    struct EmptySparql;

    #[async_trait]
    impl SparqlClient for EmptySparql {
        async fn superclasses(&self, _class_qid: &str) -> Result<Vec<String>, CollaboratorError> {
            Ok(vec![])
        }
        async fn subclasses(&self, _class_qid: &str) -> Result<Vec<String>, CollaboratorError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn extract_pair_computes_every_feature_column() {
        let kb = prepare_kb_item(KbItem { qid: "Q1".into(), labels: vec!["Joey Ramone".into()], ..Default::default() });
        let catalog = prepare_catalog_record(CatalogRecord { tid: "T1".into(), name: vec!["Joey Ramone".into()], ..Default::default() });
        let schema = preprocess::infer_schema("discogs", "person", std::slice::from_ref(&kb), std::slice::from_ref(&catalog));
        let occupations = OccupationExpander::new(Arc::new(EmptySparql));
        let row = extract_pair(&kb, &catalog, &schema, &occupations).await.unwrap();
        assert_eq!(row.values.len(), crate::vector::FEATURE_COLUMNS.len());
        assert_eq!(row.values[0], 1.0);
    }

    #[tokio::test]
    async fn extract_pair_computes_genre_shared_tokens() {
        let kb = prepare_kb_item(KbItem { qid: "Q1".into(), genres: vec!["punk rock".into()], ..Default::default() });
        let catalog = prepare_catalog_record(CatalogRecord { tid: "T1".into(), genres: vec!["punk".into()], ..Default::default() });
        let schema = preprocess::infer_schema("discogs", "band", std::slice::from_ref(&kb), std::slice::from_ref(&catalog));
        let occupations = OccupationExpander::new(Arc::new(EmptySparql));
        let row = extract_pair(&kb, &catalog, &schema, &occupations).await.unwrap();
        let index = crate::vector::FEATURE_COLUMNS.iter().position(|c| *c == "genre_shared_tokens").unwrap();
        assert!(row.values[index] > 0.0);
    }

    #[tokio::test]
    async fn schema_absent_column_forces_missing_value_even_with_data() {
        let kb = prepare_kb_item(KbItem { qid: "Q1".into(), genres: vec!["punk".into()], ..Default::default() });
        let catalog = prepare_catalog_record(CatalogRecord { tid: "T1".into(), genres: vec!["punk".into()], ..Default::default() });
        // Schema built from a different, genre-less chunk: the column isn't
        // present even though this particular pair happens to carry one.
        let bare_kb = prepare_kb_item(KbItem { qid: "Q2".into(), ..Default::default() });
        let bare_catalog = prepare_catalog_record(CatalogRecord { tid: "T2".into(), ..Default::default() });
        let schema = preprocess::infer_schema(
            "discogs",
            "person",
            std::slice::from_ref(&bare_kb),
            std::slice::from_ref(&bare_catalog),
        );
        let occupations = OccupationExpander::new(Arc::new(EmptySparql));
        let row = extract_pair(&kb, &catalog, &schema, &occupations).await.unwrap();
        let index = crate::vector::FEATURE_COLUMNS.iter().position(|c| *c == "genre_shared_tokens").unwrap();
        assert_eq!(row.values[index], MISSING_VALUE);
    }

    #[tokio::test]
    async fn all_null_pair_yields_all_missing_sentinels() {
        let kb = prepare_kb_item(KbItem { qid: "Q1".into(), ..Default::default() });
        let catalog = prepare_catalog_record(CatalogRecord { tid: "T1".into(), ..Default::default() });
        let schema = preprocess::infer_schema("discogs", "person", std::slice::from_ref(&kb), std::slice::from_ref(&catalog));
        let occupations = OccupationExpander::new(Arc::new(EmptySparql));
        let row = extract_pair(&kb, &catalog, &schema, &occupations).await.unwrap();
        assert!(row.values.iter().all(|v| *v == MISSING_VALUE));
    }
}
