use std::path::{Path, PathBuf};

/// What a dataset chunk is being built for. Training sees only KB items
/// with an identifier for the target catalog; classification sees items
/// lacking one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Training,
    Classification,
}

impl Goal {
    fn as_str(self) -> &'static str {
        match self {
            Goal::Training => "training",
            Goal::Classification => "classification",
        }
    }
}

/// Cache key for a KB/catalog dataset file: `<cache_dir>/<catalog>_<entity>_<goal>.jsonl.gz`.
/// Mirrors the latest-dump-directory discovery idiom, specialized to a
/// single deterministic path per (catalog, entity, goal) instead of a
/// timestamp scan, since dataset files are keyed, not timestamped.
pub fn kb_dataset_path(cache_dir: &Path, catalog: &str, entity: &str, goal: Goal) -> PathBuf {
    cache_dir.join(format!("{catalog}_{entity}_{}_kb.jsonl.gz", goal.as_str()))
}

pub fn catalog_dataset_path(cache_dir: &Path, catalog: &str, entity: &str, goal: Goal) -> PathBuf {
    cache_dir.join(format!("{catalog}_{entity}_{}_catalog.jsonl.gz", goal.as_str()))
}
