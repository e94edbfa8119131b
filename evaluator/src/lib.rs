mod error;
mod metrics;
mod report;
mod splits;

pub use error::EvaluatorError;
pub use metrics::Metrics;
pub use report::{evaluate_averaged, evaluate_single, AveragedReport, SingleReport};
pub use splits::{stratified_kfold, Fold};
