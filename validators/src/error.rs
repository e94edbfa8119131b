use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Collaborator(#[from] linker_core::CollaboratorError),
}
