mod pair_index;
mod strategies;

pub use pair_index::{load_cached, store_cached, BlockerError, PairIndex, PairIndexKey};
pub use strategies::{full_text_query_block, training_positive_block};
