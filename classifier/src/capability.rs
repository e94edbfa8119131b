use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Uniform interface every supported algorithm implements (§4.6):
/// `fit` binarizes positive-pair membership into the target vector, and
/// `predict`/`predict_proba` score a feature matrix. SVM-family models
/// return discrete {0.0, 1.0}; everything else returns a continuous
/// score in [0, 1].
pub trait ClassifierCapability: Send + Sync {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError>;
    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError>;
    fn expected_width(&self) -> Option<usize>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    NaiveBayes,
    LogisticRegression,
    LinearSvm,
    SvmWithProbabilities,
    RandomForest,
    SingleLayerPerceptron,
    MultiLayerPerceptron,
    EnsembleVoting,
    EnsembleGated,
    EnsembleStacked,
}

impl Algorithm {
    pub fn parse(name: &str) -> Result<Self, ClassifierError> {
        match name {
            "naive_bayes" => Ok(Algorithm::NaiveBayes),
            "logistic_regression" => Ok(Algorithm::LogisticRegression),
            "linear_svm" => Ok(Algorithm::LinearSvm),
            "svm" => Ok(Algorithm::SvmWithProbabilities),
            "random_forest" => Ok(Algorithm::RandomForest),
            "single_layer_perceptron" => Ok(Algorithm::SingleLayerPerceptron),
            "multi_layer_perceptron" => Ok(Algorithm::MultiLayerPerceptron),
            "voting" => Ok(Algorithm::EnsembleVoting),
            "gated" => Ok(Algorithm::EnsembleGated),
            "stacked" => Ok(Algorithm::EnsembleStacked),
            other => Err(ClassifierError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// Whether this algorithm supports grid-search tuning (§4.6: "not
    /// supported for neural models").
    pub fn supports_tuning(self) -> bool {
        !matches!(self, Algorithm::SingleLayerPerceptron | Algorithm::MultiLayerPerceptron)
    }

    /// Per-algorithm missing-feature-column padding width source
    /// (§4.6): mirrors the original's branch on classifier type to
    /// decide how many columns a fitted model expects.
    pub fn expected_width_source(self) -> &'static str {
        match self {
            Algorithm::NaiveBayes => "binarizer_count",
            Algorithm::LinearSvm | Algorithm::SvmWithProbabilities => "coefficient_width",
            Algorithm::SingleLayerPerceptron | Algorithm::MultiLayerPerceptron => "input_shape",
            Algorithm::LogisticRegression | Algorithm::RandomForest => "coefficient_width",
            Algorithm::EnsembleVoting | Algorithm::EnsembleGated | Algorithm::EnsembleStacked => "ensemble",
        }
    }
}
