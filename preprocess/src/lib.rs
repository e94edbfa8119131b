mod aggregate;
mod dates;
mod prepared;
mod schema;
mod training;

pub use aggregate::aggregate_by_tid;
pub use dates::validate_date;
pub use prepared::{prepare_catalog_record, prepare_kb_item, PreparedCatalogRecord, PreparedKbItem};
pub use schema::infer_schema;
pub use training::align_training_positives;
