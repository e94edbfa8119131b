use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("unknown classifier algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("model is not fitted yet")]
    NotFitted,
    #[error("grid search / tuning is not supported for {0}")]
    TuningUnsupported(String),
    #[error("underlying fit/predict failure: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error(transparent)]
    Collaborator(#[from] linker_core::CollaboratorError),
    #[error(transparent)]
    Blocker(#[from] blocker::BlockerError),
    #[error(transparent)]
    Dataset(#[from] dataset_builder::DatasetError),
    #[error(transparent)]
    FeatureCache(#[from] features::FeatureCacheError),
}
