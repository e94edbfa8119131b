use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use collaborators::SparqlClient;
use dashmap::DashMap;
use linker_core::CollaboratorError;

/// Process-wide, set-once memoization of transitive sub-/super-class
/// expansion for occupation QIDs (§4.5.7, §5). Writes are monotonic:
/// concurrent workers computing the same expansion independently is
/// acceptable, the cache simply keeps whichever finishes last.
#[derive(Clone)]
pub struct OccupationExpander {
    cache: Arc<DashMap<String, BTreeSet<String>>>,
    client: Arc<dyn SparqlClient>,
}

impl OccupationExpander {
    pub fn new(client: Arc<dyn SparqlClient>) -> Self {
        Self { cache: Arc::new(DashMap::new()), client }
    }

    pub async fn expand(&self, qid: &str) -> Result<BTreeSet<String>, CollaboratorError> {
        if let Some(hit) = self.cache.get(qid) {
            return Ok(hit.clone());
        }
        let expanded = self.expand_transitive(qid).await?;
        self.cache.insert(qid.to_string(), expanded.clone());
        Ok(expanded)
    }

    async fn expand_transitive(&self, qid: &str) -> Result<BTreeSet<String>, CollaboratorError> {
        let mut visited = BTreeSet::new();
        visited.insert(qid.to_string());
        let mut queue: VecDeque<String> = VecDeque::from([qid.to_string()]);
        while let Some(current) = queue.pop_front() {
            for neighbor in self
                .client
                .superclasses(&current)
                .await?
                .into_iter()
                .chain(self.client.subclasses(&current).await?)
            {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(visited)
    }
}

/// Jaccard-min score over two occupation-QID sets, one of which (the
/// catalog side) has already been transitively expanded (§4.5.7).
pub fn shared_occupations(kb_occupations: &BTreeSet<String>, expanded_catalog_occupations: &BTreeSet<String>) -> f32 {
    if kb_occupations.is_empty() || expanded_catalog_occupations.is_empty() {
        return 0.0;
    }
    let shared = kb_occupations.intersection(expanded_catalog_occupations).count() as f32;
    let min_len = kb_occupations.len().min(expanded_catalog_occupations.len()) as f32;
    shared / min_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubSparql;

    #[async_trait]
    impl SparqlClient for StubSparql {
        async fn superclasses(&self, class_qid: &str) -> Result<Vec<String>, CollaboratorError> {
            match class_qid {
                "Q_SINGER" => Ok(vec!["Q_MUSICIAN".to_string()]),
                _ => Ok(vec![]),
            }
        }
        async fn subclasses(&self, _class_qid: &str) -> Result<Vec<String>, CollaboratorError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn expand_follows_superclasses_transitively() {
        let expander = OccupationExpander::new(Arc::new(StubSparql));
        let expanded = expander.expand("Q_SINGER").await.unwrap();
        assert!(expanded.contains("Q_SINGER"));
        assert!(expanded.contains("Q_MUSICIAN"));
    }

    #[tokio::test]
    async fn second_call_hits_the_cache() {
        let expander = OccupationExpander::new(Arc::new(StubSparql));
        let first = expander.expand("Q_SINGER").await.unwrap();
        let second = expander.expand("Q_SINGER").await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shared_occupations_is_min_normalized() {
        let kb: BTreeSet<String> = ["Q_MUSICIAN".to_string()].into();
        let catalog: BTreeSet<String> = ["Q_SINGER".to_string(), "Q_MUSICIAN".to_string()].into();
        assert_eq!(shared_occupations(&kb, &catalog), 1.0);
    }
}
