use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::vector::FeatureVectorChunk;

#[derive(Debug, Error)]
pub enum FeatureCacheError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Bincode(#[from] Box<bincode::ErrorKind>),
}

fn cache_path(cache_dir: &Path, catalog: &str, entity: &str, goal: &str, chunk: u32) -> PathBuf {
    cache_dir.join(format!("{catalog}_{entity}_{goal}_{chunk}.features.bin"))
}

pub fn load_cached(
    cache_dir: &Path,
    catalog: &str,
    entity: &str,
    goal: &str,
    chunk: u32,
) -> Option<FeatureVectorChunk> {
    let bytes = std::fs::read(cache_path(cache_dir, catalog, entity, goal, chunk)).ok()?;
    bincode::deserialize(&bytes).ok()
}

pub fn store_cached(
    cache_dir: &Path,
    catalog: &str,
    entity: &str,
    goal: &str,
    chunk: u32,
    features: &FeatureVectorChunk,
) -> Result<(), FeatureCacheError> {
    std::fs::create_dir_all(cache_dir)?;
    let bytes = bincode::serialize(features)?;
    std::fs::write(cache_path(cache_dir, catalog, entity, goal, chunk), bytes)?;
    Ok(())
}
