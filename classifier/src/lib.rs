mod algorithms;
mod capability;
mod dataset;
mod error;
mod postrules;

pub mod pipeline;

pub use algorithms::{build, FittedModel};
pub use capability::{Algorithm, ClassifierCapability};
pub use dataset::{to_predict_matrix, to_training_matrix};
pub use error::ClassifierError;
pub use pipeline::{build_training_matrix, classify, load_model, model_path, save_model, train, PersistedModel};
pub use postrules::{one_when_self_link_correct, zero_when_different_names};
