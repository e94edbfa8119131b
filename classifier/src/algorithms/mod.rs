pub mod ensemble;
pub mod logistic;
pub mod naive_bayes;
pub mod perceptron;
pub mod svm;
pub mod tree;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::capability::{Algorithm, ClassifierCapability};
use crate::error::ClassifierError;
use ensemble::{GatedEnsemble, StackedEnsemble, VotingEnsemble};
use logistic::LogisticRegressionModel;
use naive_bayes::NaiveBayesModel;
use perceptron::{MultiLayerPerceptronModel, SingleLayerPerceptronModel};
use svm::LinearSvmModel;
use tree::RandomForestModel;

/// Constructs a fresh, untrained model for the given algorithm (§4.6).
pub fn build(algorithm: Algorithm) -> FittedModel {
    match algorithm {
        Algorithm::NaiveBayes => FittedModel::NaiveBayes(NaiveBayesModel::default()),
        Algorithm::LogisticRegression => FittedModel::LogisticRegression(LogisticRegressionModel::new()),
        Algorithm::LinearSvm => FittedModel::LinearSvm(LinearSvmModel::new(false)),
        Algorithm::SvmWithProbabilities => FittedModel::Svm(LinearSvmModel::new(true)),
        Algorithm::RandomForest => FittedModel::RandomForest(RandomForestModel::default()),
        Algorithm::SingleLayerPerceptron => FittedModel::SingleLayerPerceptron(SingleLayerPerceptronModel::default()),
        Algorithm::MultiLayerPerceptron => FittedModel::MultiLayerPerceptron(MultiLayerPerceptronModel::default()),
        Algorithm::EnsembleVoting => FittedModel::Voting(VotingEnsemble::default()),
        Algorithm::EnsembleGated => FittedModel::Gated(GatedEnsemble::default()),
        Algorithm::EnsembleStacked => FittedModel::Stacked(StackedEnsemble::default()),
    }
}

/// A concrete, serializable sum of every supported algorithm (§4.6,
/// §6.1 model persistence). Trait objects (`Box<dyn
/// ClassifierCapability>`) can't derive `Serialize`/`Deserialize`, so
/// the model that gets written to and read back from disk is this enum
/// rather than a boxed trait object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FittedModel {
    NaiveBayes(NaiveBayesModel),
    LogisticRegression(LogisticRegressionModel),
    LinearSvm(LinearSvmModel),
    Svm(LinearSvmModel),
    RandomForest(RandomForestModel),
    SingleLayerPerceptron(SingleLayerPerceptronModel),
    MultiLayerPerceptron(MultiLayerPerceptronModel),
    Voting(VotingEnsemble),
    Gated(GatedEnsemble),
    Stacked(StackedEnsemble),
}

impl FittedModel {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            FittedModel::NaiveBayes(_) => Algorithm::NaiveBayes,
            FittedModel::LogisticRegression(_) => Algorithm::LogisticRegression,
            FittedModel::LinearSvm(_) => Algorithm::LinearSvm,
            FittedModel::Svm(_) => Algorithm::SvmWithProbabilities,
            FittedModel::RandomForest(_) => Algorithm::RandomForest,
            FittedModel::SingleLayerPerceptron(_) => Algorithm::SingleLayerPerceptron,
            FittedModel::MultiLayerPerceptron(_) => Algorithm::MultiLayerPerceptron,
            FittedModel::Voting(_) => Algorithm::EnsembleVoting,
            FittedModel::Gated(_) => Algorithm::EnsembleGated,
            FittedModel::Stacked(_) => Algorithm::EnsembleStacked,
        }
    }

    fn inner(&self) -> &dyn ClassifierCapability {
        match self {
            FittedModel::NaiveBayes(m) => m,
            FittedModel::LogisticRegression(m) => m,
            FittedModel::LinearSvm(m) => m,
            FittedModel::Svm(m) => m,
            FittedModel::RandomForest(m) => m,
            FittedModel::SingleLayerPerceptron(m) => m,
            FittedModel::MultiLayerPerceptron(m) => m,
            FittedModel::Voting(m) => m,
            FittedModel::Gated(m) => m,
            FittedModel::Stacked(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ClassifierCapability {
        match self {
            FittedModel::NaiveBayes(m) => m,
            FittedModel::LogisticRegression(m) => m,
            FittedModel::LinearSvm(m) => m,
            FittedModel::Svm(m) => m,
            FittedModel::RandomForest(m) => m,
            FittedModel::SingleLayerPerceptron(m) => m,
            FittedModel::MultiLayerPerceptron(m) => m,
            FittedModel::Voting(m) => m,
            FittedModel::Gated(m) => m,
            FittedModel::Stacked(m) => m,
        }
    }
}

impl ClassifierCapability for FittedModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        self.inner_mut().fit(records, targets)
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        self.inner().predict(records)
    }

    fn expected_width(&self) -> Option<usize> {
        self.inner().expected_width()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn build_covers_every_algorithm_variant() {
        let variants = [
            Algorithm::NaiveBayes,
            Algorithm::LogisticRegression,
            Algorithm::LinearSvm,
            Algorithm::SvmWithProbabilities,
            Algorithm::RandomForest,
            Algorithm::SingleLayerPerceptron,
            Algorithm::MultiLayerPerceptron,
            Algorithm::EnsembleVoting,
            Algorithm::EnsembleGated,
            Algorithm::EnsembleStacked,
        ];
        let records = Array2::from_shape_vec((4, 2), vec![0.0, 0.0, 0.1, 0.1, 1.0, 1.0, 1.1, 1.1]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        for algorithm in variants {
            let mut model = build(algorithm);
            model.fit(&records, &targets).unwrap();
            let preds = model.predict(&records).unwrap();
            assert_eq!(preds.len(), 4);
        }
    }
}
