use thiserror::Error;

/// Root error type. Every crate in the workspace composes its own
/// narrower error enum and converts into this one at the CLI boundary.
#[derive(Debug, Error)]
pub enum LinkerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("missing model for {catalog}/{entity}/{algo}: run `linker train` first")]
    MissingModel {
        catalog: String,
        entity: String,
        algo: String,
    },

    #[error("unknown classifier algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] Box<bincode::ErrorKind>),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber { var: String, reason: String },
    #[error("invalid format in {var}: {reason}")]
    InvalidFormat { var: String, reason: String },
    #[error("{field} out of range: {detail}")]
    OutOfRange { field: String, detail: String },
}

/// Errors surfaced by the external collaborator traits (§4.11): catalog
/// store, KB client, SPARQL client, edit bot, URL resolver.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("server error: status {0}")]
    Server(u16),
    #[error("unexpected http status: {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("bucket dropped after retry: {0}")]
    BucketDropped(String),
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return CollaboratorError::Timeout;
        }
        if let Some(status) = err.status() {
            return match status.as_u16() {
                401 => CollaboratorError::Unauthorized,
                403 => CollaboratorError::Forbidden,
                404 => CollaboratorError::NotFound,
                429 => CollaboratorError::RateLimited {
                    retry_after_secs: 1,
                },
                500..=599 => CollaboratorError::Server(status.as_u16()),
                other => CollaboratorError::HttpStatus(other),
            };
        }
        CollaboratorError::Network(err.to_string())
    }
}
