pub mod config;
pub mod error;
pub mod model;

pub use config::RunConfig;
pub use error::{CollaboratorError, ConfigError, LinkerError};
pub use model::{
    CatalogRecord, ColumnDescriptor, ColumnKind, DatePrecision, EntitySchema, FormatterRegistry,
    FormatterRule, GenderToken, IdentifierClaim, KbItem, Pair, PrecisionDate,
};
