use collaborators::CatalogStore;
use linker_core::KbItem;
use preprocess::PreparedKbItem;
use tracing::debug;

use crate::pair_index::PairIndex;

/// Builds the known-correct training pair index from KB items carrying
/// an identifier for the target catalog property (§4.4).
pub fn training_positive_block(kb_items: &[KbItem], catalog_property: &str) -> PairIndex {
    let mut pairs = Vec::new();
    for item in kb_items {
        for claim in &item.identifier_claims {
            if claim.property == catalog_property {
                pairs.push((item.qid.clone(), claim.value.clone()));
            }
        }
    }
    debug!(count = pairs.len(), "built training-positive block");
    PairIndex::from_pairs(pairs)
}

/// For each KB row, issues one full-text query against the catalog name
/// index using the row's tokenized name and keeps up to `top_n` hits
/// (§4.4). One query per KB row; results are unioned into a pair index.
pub async fn full_text_query_block(
    kb_chunk: &[PreparedKbItem],
    entity: &str,
    store: &dyn CatalogStore,
    top_n: usize,
) -> Result<PairIndex, linker_core::CollaboratorError> {
    let mut pairs = Vec::new();
    for prepared in kb_chunk {
        let terms: Vec<String> = prepared.name_tokens.iter().flatten().cloned().collect();
        if terms.is_empty() {
            continue;
        }
        let hits = store.search_candidates(entity, &terms, top_n).await?;
        for tid in hits {
            pairs.push((prepared.item.qid.clone(), tid));
        }
    }
    debug!(count = pairs.len(), "built full-text query block");
    Ok(PairIndex::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linker_core::IdentifierClaim;

    #[test]
    fn training_positive_block_pairs_only_matching_property() {
        let items = vec![
            KbItem {
                qid: "Q1".into(),
                identifier_claims: vec![
                    IdentifierClaim { property: "P1953".into(), value: "T1".into(), url: None },
                    IdentifierClaim { property: "P646".into(), value: "X1".into(), url: None },
                ],
                ..Default::default()
            },
            KbItem { qid: "Q2".into(), ..Default::default() },
        ];
        let index = training_positive_block(&items, "P1953");
        assert_eq!(index.pairs, vec![("Q1".to_string(), "T1".to_string())]);
    }
}
