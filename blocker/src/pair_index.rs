use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error(transparent)]
    Collaborator(#[from] linker_core::CollaboratorError),
}

/// A cache key: (catalog, entity, goal, chunk number).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PairIndexKey {
    pub catalog: String,
    pub entity: String,
    pub goal: String,
    pub chunk: u32,
}

/// An ordered, deduplicated set of (QID, TID) candidate pairs, the
/// logical equivalent of the pickled `pandas.MultiIndex` the blocker
/// produces upstream, persisted here via `bincode` (§6).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairIndex {
    pub pairs: Vec<(String, String)>,
}

impl PairIndex {
    pub fn from_pairs(mut pairs: Vec<(String, String)>) -> Self {
        pairs.sort();
        pairs.dedup();
        Self { pairs }
    }

    pub fn contains(&self, qid: &str, tid: &str) -> bool {
        self.pairs.binary_search(&(qid.to_string(), tid.to_string())).is_ok()
    }

    pub fn is_subset_of(&self, other: &PairIndex) -> bool {
        self.pairs.iter().all(|p| other.pairs.binary_search(p).is_ok())
    }
}

fn cache_path(cache_dir: &Path, key: &PairIndexKey) -> PathBuf {
    cache_dir.join(format!("{}_{}_{}_{}.pairs.bin", key.catalog, key.entity, key.goal, key.chunk))
}

pub fn load_cached(cache_dir: &Path, key: &PairIndexKey) -> Option<PairIndex> {
    let path = cache_path(cache_dir, key);
    let bytes = std::fs::read(path).ok()?;
    bincode::deserialize(&bytes).ok()
}

pub fn store_cached(cache_dir: &Path, key: &PairIndexKey, index: &PairIndex) -> Result<(), BlockerError> {
    std::fs::create_dir_all(cache_dir)?;
    let path = cache_path(cache_dir, key);
    let bytes = bincode::serialize(index)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_and_sorts_pairs() {
        let idx = PairIndex::from_pairs(vec![
            ("Q2".into(), "T2".into()),
            ("Q1".into(), "T1".into()),
            ("Q1".into(), "T1".into()),
        ]);
        assert_eq!(idx.pairs.len(), 2);
        assert!(idx.contains("Q1", "T1"));
        assert!(!idx.contains("Q3", "T3"));
    }
}
