mod builder;
mod cache;
mod error;
mod jsonl_gz;

pub use builder::{build_catalog_dataset, build_kb_dataset};
pub use cache::{catalog_dataset_path, kb_dataset_path, Goal};
pub use error::DatasetError;
pub use jsonl_gz::{append_gz_jsonl, chunks, read_gz_jsonl, read_gz_jsonl_tolerant};
