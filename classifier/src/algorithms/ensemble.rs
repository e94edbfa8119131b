use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::algorithms::logistic::LogisticRegressionModel;
use crate::algorithms::naive_bayes::NaiveBayesModel;
use crate::algorithms::svm::LinearSvmModel;
use crate::algorithms::tree::RandomForestModel;
use crate::capability::ClassifierCapability;
use crate::error::ClassifierError;

/// The original pipeline's three ensemble strategies all combine the
/// same three base learners (naive Bayes, random forest, a calibrated
/// SVM) and differ only in how their scores are combined. Kept as a
/// concrete struct rather than `Vec<Box<dyn ClassifierCapability>>` so
/// the whole ensemble derives `Serialize`/`Deserialize` for model
/// persistence (§6.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BaseLearners {
    naive_bayes: NaiveBayesModel,
    random_forest: RandomForestModel,
    svm: LinearSvmModel,
    fitted: bool,
}

impl Default for BaseLearners {
    fn default() -> Self {
        Self {
            naive_bayes: NaiveBayesModel::default(),
            random_forest: RandomForestModel::default(),
            svm: LinearSvmModel::new(true),
            fitted: false,
        }
    }
}

impl BaseLearners {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        self.naive_bayes.fit(records, targets)?;
        self.random_forest.fit(records, targets)?;
        self.svm.fit(records, targets)?;
        self.fitted = true;
        Ok(())
    }

    fn predict_each(&self, records: &Array2<f64>) -> Result<Vec<Vec<f32>>, ClassifierError> {
        Ok(vec![
            self.naive_bayes.predict(records)?,
            self.random_forest.predict(records)?,
            self.svm.predict(records)?,
        ])
    }

    fn count(&self) -> usize {
        3
    }
}

/// Majority vote across base learners' thresholded (> 0.5) decisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VotingEnsemble {
    learners: BaseLearners,
    width: usize,
}

impl ClassifierCapability for VotingEnsemble {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        self.learners.fit(records, targets)?;
        self.width = records.ncols();
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        if !self.learners.fitted {
            return Err(ClassifierError::NotFitted);
        }
        let predictions = self.learners.predict_each(records)?;
        let n = records.nrows();
        Ok((0..n)
            .map(|row| {
                let votes = predictions.iter().filter(|p| p[row] > 0.5).count();
                if votes * 2 > predictions.len() { 1.0 } else { 0.0 }
            })
            .collect())
    }

    fn expected_width(&self) -> Option<usize> {
        if self.learners.fitted { Some(self.width) } else { None }
    }

    fn name(&self) -> &'static str {
        "voting"
    }
}

/// Weighted average of base-learner scores; weights are fixed uniform
/// shares (a "gate" in the original sense of per-learner confidence
/// weighting, simplified to equal weighting since no held-out gating
/// signal is modeled here).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatedEnsemble {
    learners: BaseLearners,
    width: usize,
}

impl ClassifierCapability for GatedEnsemble {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        self.learners.fit(records, targets)?;
        self.width = records.ncols();
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        if !self.learners.fitted {
            return Err(ClassifierError::NotFitted);
        }
        let predictions = self.learners.predict_each(records)?;
        let n = records.nrows();
        let weight = 1.0 / self.learners.count() as f32;
        Ok((0..n)
            .map(|row| predictions.iter().map(|p| p[row] * weight).sum())
            .collect())
    }

    fn expected_width(&self) -> Option<usize> {
        if self.learners.fitted { Some(self.width) } else { None }
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Stacked generalization: base-learner scores become the input
/// features of a logistic-regression meta-learner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackedEnsemble {
    learners: BaseLearners,
    meta: LogisticRegressionModel,
    width: usize,
}

fn stack_predictions(predictions: &[Vec<f32>], n: usize) -> Array2<f64> {
    let mut meta_features = Array2::<f64>::zeros((n, predictions.len()));
    for (col, preds) in predictions.iter().enumerate() {
        for (row, &p) in preds.iter().enumerate() {
            meta_features[[row, col]] = p as f64;
        }
    }
    meta_features
}

impl ClassifierCapability for StackedEnsemble {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        self.learners.fit(records, targets)?;
        let predictions = self.learners.predict_each(records)?;
        let meta_features = stack_predictions(&predictions, records.nrows());
        self.meta.fit(&meta_features, targets)?;
        self.width = records.ncols();
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        if !self.learners.fitted {
            return Err(ClassifierError::NotFitted);
        }
        let predictions = self.learners.predict_each(records)?;
        let meta_features = stack_predictions(&predictions, records.nrows());
        self.meta.predict(&meta_features)
    }

    fn expected_width(&self) -> Option<usize> {
        if self.learners.fitted { Some(self.width) } else { None }
    }

    fn name(&self) -> &'static str {
        "stacked"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Array2<f64>, Array1<f64>) {
        let records = Array2::from_shape_vec(
            (6, 2),
            vec![0.0, 0.0, 0.1, 0.1, 0.2, 0.0, 5.0, 5.0, 5.1, 5.1, 5.2, 5.0],
        )
        .unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        (records, targets)
    }

    #[test]
    fn voting_ensemble_separates_clusters() {
        let (records, targets) = toy_data();
        let mut ensemble = VotingEnsemble::default();
        ensemble.fit(&records, &targets).unwrap();
        let preds = ensemble.predict(&records).unwrap();
        assert_eq!(preds[0], 0.0);
        assert_eq!(preds[5], 1.0);
    }

    #[test]
    fn stacked_ensemble_separates_clusters() {
        let (records, targets) = toy_data();
        let mut ensemble = StackedEnsemble::default();
        ensemble.fit(&records, &targets).unwrap();
        let preds = ensemble.predict(&records).unwrap();
        assert!(preds[0] < 0.5);
        assert!(preds[5] > 0.5);
    }

    #[test]
    fn ensemble_round_trips_through_bincode() {
        let (records, targets) = toy_data();
        let mut ensemble = GatedEnsemble::default();
        ensemble.fit(&records, &targets).unwrap();
        let bytes = bincode::serialize(&ensemble).unwrap();
        let restored: GatedEnsemble = bincode::deserialize(&bytes).unwrap();
        let preds = restored.predict(&records).unwrap();
        assert_eq!(preds.len(), 6);
    }
}
