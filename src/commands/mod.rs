mod import;
mod ingest;
mod linker;
mod sync;

pub use import::run_import;
pub use ingest::run_ingest;
pub use linker::run_linker;
pub use sync::run_sync;
