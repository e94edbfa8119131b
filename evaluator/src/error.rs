use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error(transparent)]
    Classifier(#[from] classifier::ClassifierError),
}
