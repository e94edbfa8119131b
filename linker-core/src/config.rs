use std::path::PathBuf;

use crate::error::ConfigError;

fn must_env(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var.to_string()))
}

fn env_opt_string(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

fn env_opt_u32(var: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::InvalidNumber {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn env_opt_f32(var: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.parse::<f32>().map_err(|e| ConfigError::InvalidNumber {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn env_opt_bool(var: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(ConfigError::InvalidFormat {
                var: var.to_string(),
                reason: format!("expected a boolean, got `{other}`"),
            }),
        },
        Err(_) => Ok(default),
    }
}

/// Process-wide configuration, built from the environment and overridden
/// by CLI flags (§6.1). Values unrelated to a given subcommand are simply
/// left at their defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
    pub kb_chunk_size: u32,
    pub catalog_chunk_size: u32,
    pub bucket_chunk_size: u32,
    pub kb_api_bucket_size: u32,
    pub sparql_bucket_size: u32,
    pub fulltext_block_top_n: u32,
    pub kfold_k: u32,
    pub kfold_seed: u64,
    pub classification_threshold: f32,
    /// §9 Open Question 2: preserve the self-link post-rule unconditionally
    /// by default, but allow disabling it.
    pub self_link_rule: bool,
    /// Name-overlap post-rule (`classify.py`'s `--name-rule`): opt-in,
    /// off by default, matching the original CLI's default exactly.
    pub name_rule: bool,
    /// §9 Open Question 3: default off, matching the original semantics
    /// exactly (no extra case/scheme normalization in the links validator).
    pub normalize_link_urls: bool,
    pub sparql_endpoint: Option<String>,
    pub kb_api_endpoint: Option<String>,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_dir = env_opt_string("LINKER_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".cache/linker"));
        let output_dir = env_opt_string("LINKER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output"));

        Ok(Self {
            cache_dir,
            output_dir,
            kb_chunk_size: env_opt_u32("LINKER_KB_CHUNK_SIZE", 1000)?,
            catalog_chunk_size: env_opt_u32("LINKER_CATALOG_CHUNK_SIZE", 1000)?,
            bucket_chunk_size: env_opt_u32("LINKER_BUCKET_CHUNK_SIZE", 5000)?,
            kb_api_bucket_size: env_opt_u32("LINKER_KB_API_BUCKET_SIZE", 50)?,
            sparql_bucket_size: env_opt_u32("LINKER_SPARQL_BUCKET_SIZE", 500)?,
            fulltext_block_top_n: env_opt_u32("LINKER_FULLTEXT_TOP_N", 5)?,
            kfold_k: env_opt_u32("LINKER_KFOLD_K", 5)?,
            kfold_seed: env_opt_u32("LINKER_KFOLD_SEED", 42)? as u64,
            classification_threshold: env_opt_f32("LINKER_THRESHOLD", 0.5)?,
            self_link_rule: env_opt_bool("LINKER_SELF_LINK_RULE", true)?,
            name_rule: env_opt_bool("LINKER_NAME_RULE", false)?,
            normalize_link_urls: env_opt_bool("LINKER_NORMALIZE_LINK_URLS", false)?,
            sparql_endpoint: env_opt_string("LINKER_SPARQL_ENDPOINT"),
            kb_api_endpoint: env_opt_string("LINKER_KB_API_ENDPOINT"),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classification_threshold < 0.0 || self.classification_threshold > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "classification_threshold".to_string(),
                detail: "must be within [0, 1]".to_string(),
            });
        }
        if self.kfold_k < 2 {
            return Err(ConfigError::OutOfRange {
                field: "kfold_k".to_string(),
                detail: "must be at least 2".to_string(),
            });
        }
        Ok(())
    }

    /// `must_env` is exposed for collaborator configs (e.g. database URL,
    /// API tokens) that live outside this struct's own fields.
    pub fn require(var: &str) -> Result<String, ConfigError> {
        must_env(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut cfg = RunConfig {
            cache_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            kb_chunk_size: 1000,
            catalog_chunk_size: 1000,
            bucket_chunk_size: 5000,
            kb_api_bucket_size: 50,
            sparql_bucket_size: 500,
            fulltext_block_top_n: 5,
            kfold_k: 5,
            kfold_seed: 42,
            classification_threshold: 1.5,
            self_link_rule: true,
            name_rule: false,
            normalize_link_urls: false,
            sparql_endpoint: None,
            kb_api_endpoint: None,
        };
        assert!(cfg.validate().is_err());
        cfg.classification_threshold = 0.5;
        assert!(cfg.validate().is_ok());
    }
}
