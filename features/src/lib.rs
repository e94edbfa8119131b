mod cache;
mod cosine;
mod dates;
mod exact_match;
mod extractor;
mod levenshtein;
mod occupations;
mod shared_tokens;
mod vector;

pub use cache::{load_cached, store_cached, FeatureCacheError};
pub use cosine::{cosine_similarity, Analyzer};
pub use dates::similar_dates;
pub use exact_match::exact_match;
pub use extractor::{extract_chunk, extract_pair};
pub use levenshtein::levenshtein_similarity;
pub use occupations::{shared_occupations, OccupationExpander};
pub use shared_tokens::{shared_tokens, shared_tokens_plus};
pub use vector::{FeatureRow, FeatureVectorChunk, FEATURE_COLUMNS, MISSING_VALUE};
