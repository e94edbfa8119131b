mod file_backed;
mod http;
mod noop;
mod retry;
mod traits;

pub use file_backed::{FileCatalogStore, FileKbClient};
pub use http::{HttpSparqlClient, HttpUrlResolver};
pub use noop::LoggingEditBot;
pub use retry::with_single_retry;
pub use traits::{CatalogStore, EditBot, EditTuple, KbClient, SparqlClient, UrlResolver};
