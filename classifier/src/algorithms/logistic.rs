use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::capability::ClassifierCapability;
use crate::error::ClassifierError;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Binary logistic regression fit by full-batch gradient descent. Also
/// backs `SingleLayerPerceptron`, which is architecturally the same
/// model (one linear layer + sigmoid).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    weights: Option<Array1<f64>>,
    bias: f64,
    learning_rate: f64,
    epochs: usize,
}

impl LogisticRegressionModel {
    pub fn new() -> Self {
        Self { weights: None, bias: 0.0, learning_rate: 0.1, epochs: 500 }
    }

    fn score_row(&self, weights: &Array1<f64>, row: ndarray::ArrayView1<f64>) -> f64 {
        sigmoid(row.dot(weights) + self.bias)
    }
}

impl ClassifierCapability for LogisticRegressionModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        let (n, width) = records.dim();
        if n == 0 {
            return Err(ClassifierError::Backend("cannot fit on an empty training set".to_string()));
        }
        let mut weights = Array1::<f64>::zeros(width);
        let mut bias = 0.0;

        for _ in 0..self.epochs {
            let mut grad_w = Array1::<f64>::zeros(width);
            let mut grad_b = 0.0;
            for (row, &target) in records.axis_iter(Axis(0)).zip(targets.iter()) {
                let pred = sigmoid(row.dot(&weights) + bias);
                let error = pred - target;
                grad_w = grad_w + &row.to_owned() * error;
                grad_b += error;
            }
            weights = weights - (self.learning_rate / n as f64) * grad_w;
            bias -= (self.learning_rate / n as f64) * grad_b;
        }

        self.weights = Some(weights);
        self.bias = bias;
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        let weights = self.weights.as_ref().ok_or(ClassifierError::NotFitted)?;
        Ok(records.axis_iter(Axis(0)).map(|row| self.score_row(weights, row) as f32).collect())
    }

    fn expected_width(&self) -> Option<usize> {
        self.weights.as_ref().map(|w| w.len())
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learns_a_linearly_separable_boundary() {
        let records = Array2::from_shape_vec((4, 1), vec![0.0, 0.1, 0.9, 1.0]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        let mut model = LogisticRegressionModel::new();
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds[0] < 0.5);
        assert!(preds[3] > 0.5);
    }
}
