use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::capability::ClassifierCapability;
use crate::error::ClassifierError;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Linear SVM trained by sub-gradient descent on the hinge loss with L2
/// regularization (Pegasos-style update). `calibrate_probability`
/// controls whether `predict` returns a raw {0.0, 1.0} decision
/// (`LinearSvm`, matching the original `SVMClassifier` without
/// `probability=True`) or a sigmoid-squashed score (`SvmWithProbabilities`,
/// matching `probability=True` / Platt scaling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvmModel {
    weights: Option<Array1<f64>>,
    bias: f64,
    regularization: f64,
    epochs: usize,
    calibrate_probability: bool,
}

impl LinearSvmModel {
    pub fn new(calibrate_probability: bool) -> Self {
        Self {
            weights: None,
            bias: 0.0,
            regularization: 1e-3,
            epochs: 200,
            calibrate_probability,
        }
    }
}

impl ClassifierCapability for LinearSvmModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        let (n, width) = records.dim();
        if n == 0 {
            return Err(ClassifierError::Backend("cannot fit on an empty training set".to_string()));
        }
        // Hinge loss wants labels in {-1, +1}.
        let signed_targets: Array1<f64> = targets.mapv(|t| if t > 0.5 { 1.0 } else { -1.0 });

        let mut weights = Array1::<f64>::zeros(width);
        let mut bias = 0.0;

        for epoch in 1..=self.epochs {
            let learning_rate = 1.0 / (self.regularization * epoch as f64);
            for (row, &label) in records.axis_iter(Axis(0)).zip(signed_targets.iter()) {
                let margin = label * (row.dot(&weights) + bias);
                weights = &weights * (1.0 - learning_rate * self.regularization);
                if margin < 1.0 {
                    weights = weights + learning_rate * label * row.to_owned();
                    bias += learning_rate * label;
                }
            }
        }

        self.weights = Some(weights);
        self.bias = bias;
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        let weights = self.weights.as_ref().ok_or(ClassifierError::NotFitted)?;
        Ok(records
            .axis_iter(Axis(0))
            .map(|row| {
                let margin = row.dot(weights) + self.bias;
                if self.calibrate_probability {
                    sigmoid(margin) as f32
                } else if margin >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            })
            .collect())
    }

    fn expected_width(&self) -> Option<usize> {
        self.weights.as_ref().map(|w| w.len())
    }

    fn name(&self) -> &'static str {
        if self.calibrate_probability {
            "svm"
        } else {
            "linear_svm"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_svm_returns_only_zero_or_one() {
        let records = Array2::from_shape_vec((4, 1), vec![-2.0, -1.0, 1.0, 2.0]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        let mut model = LinearSvmModel::new(false);
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds.iter().all(|&p| p == 0.0 || p == 1.0));
        assert_eq!(preds[3], 1.0);
    }

    #[test]
    fn calibrated_svm_returns_continuous_scores() {
        let records = Array2::from_shape_vec((4, 1), vec![-2.0, -1.0, 1.0, 2.0]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        let mut model = LinearSvmModel::new(true);
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds[3] > preds[0]);
    }
}
