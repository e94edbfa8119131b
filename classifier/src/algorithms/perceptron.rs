use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::algorithms::logistic::LogisticRegressionModel;
use crate::capability::ClassifierCapability;
use crate::error::ClassifierError;

/// A single-layer perceptron with a sigmoid activation is the same
/// model as logistic regression; this wraps it under the distinct
/// `Algorithm::SingleLayerPerceptron` name rather than duplicating the
/// gradient-descent loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SingleLayerPerceptronModel {
    inner: LogisticRegressionModel,
}

impl ClassifierCapability for SingleLayerPerceptronModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        self.inner.fit(records, targets)
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        self.inner.predict(records)
    }

    fn expected_width(&self) -> Option<usize> {
        self.inner.expected_width()
    }

    fn name(&self) -> &'static str {
        "single_layer_perceptron"
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Feed-forward network with one hidden layer, sigmoid activations
/// throughout, trained by full-batch backpropagation. Mirrors the
/// hidden-layer-sized `MLPClassifier` wrapper in the original pipeline;
/// grid-search tuning is not supported for this model (§4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLayerPerceptronModel {
    hidden_weights: Option<Array2<f64>>,
    hidden_bias: Option<Array1<f64>>,
    output_weights: Option<Array1<f64>>,
    output_bias: f64,
    hidden_units: usize,
    learning_rate: f64,
    epochs: usize,
}

impl Default for MultiLayerPerceptronModel {
    fn default() -> Self {
        Self {
            hidden_weights: None,
            hidden_bias: None,
            output_weights: None,
            output_bias: 0.0,
            hidden_units: 8,
            learning_rate: 0.1,
            epochs: 300,
        }
    }
}

impl ClassifierCapability for MultiLayerPerceptronModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        let (n, width) = records.dim();
        if n == 0 {
            return Err(ClassifierError::Backend("cannot fit on an empty training set".to_string()));
        }

        // Deterministic, data-derived initialization (no RNG dependency
        // needed for a fixed, reproducible starting point).
        let mut hidden_weights = Array2::<f64>::zeros((width, self.hidden_units));
        for i in 0..width {
            for j in 0..self.hidden_units {
                hidden_weights[[i, j]] = 0.01 * ((i + 1) as f64 * (j + 2) as f64).sin();
            }
        }
        let mut hidden_bias = Array1::<f64>::zeros(self.hidden_units);
        let mut output_weights = Array1::<f64>::from_elem(self.hidden_units, 0.01);
        let mut output_bias = 0.0;

        for _ in 0..self.epochs {
            let mut grad_hidden_w = Array2::<f64>::zeros((width, self.hidden_units));
            let mut grad_hidden_b = Array1::<f64>::zeros(self.hidden_units);
            let mut grad_output_w = Array1::<f64>::zeros(self.hidden_units);
            let mut grad_output_b = 0.0;

            for (row, &target) in records.axis_iter(Axis(0)).zip(targets.iter()) {
                let hidden_pre = row.dot(&hidden_weights) + &hidden_bias;
                let hidden_act = hidden_pre.mapv(sigmoid);
                let output_pre = hidden_act.dot(&output_weights) + output_bias;
                let output_act = sigmoid(output_pre);

                let output_error = output_act - target;
                grad_output_w = grad_output_w + &hidden_act * output_error;
                grad_output_b += output_error;

                let hidden_error = hidden_act.mapv(|h| h * (1.0 - h)) * (&output_weights * output_error);
                for i in 0..width {
                    for j in 0..self.hidden_units {
                        grad_hidden_w[[i, j]] += row[i] * hidden_error[j];
                    }
                }
                grad_hidden_b = grad_hidden_b + &hidden_error;
            }

            let scale = self.learning_rate / n as f64;
            hidden_weights = hidden_weights - &grad_hidden_w * scale;
            hidden_bias = hidden_bias - &grad_hidden_b * scale;
            output_weights = output_weights - &grad_output_w * scale;
            output_bias -= scale * grad_output_b;
        }

        self.hidden_weights = Some(hidden_weights);
        self.hidden_bias = Some(hidden_bias);
        self.output_weights = Some(output_weights);
        self.output_bias = output_bias;
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        let hidden_weights = self.hidden_weights.as_ref().ok_or(ClassifierError::NotFitted)?;
        let hidden_bias = self.hidden_bias.as_ref().ok_or(ClassifierError::NotFitted)?;
        let output_weights = self.output_weights.as_ref().ok_or(ClassifierError::NotFitted)?;

        Ok(records
            .axis_iter(Axis(0))
            .map(|row| {
                let hidden_act = (row.dot(hidden_weights) + hidden_bias).mapv(sigmoid);
                sigmoid(hidden_act.dot(output_weights) + self.output_bias) as f32
            })
            .collect())
    }

    fn expected_width(&self) -> Option<usize> {
        self.hidden_weights.as_ref().map(|w| w.nrows())
    }

    fn name(&self) -> &'static str {
        "multi_layer_perceptron"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_layer_perceptron_delegates_to_logistic_regression() {
        let records = Array2::from_shape_vec((4, 1), vec![0.0, 0.1, 0.9, 1.0]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        let mut model = SingleLayerPerceptronModel::default();
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds[0] < preds[3]);
    }

    #[test]
    fn multi_layer_perceptron_learns_non_trivial_boundary() {
        let records = Array2::from_shape_vec((4, 1), vec![0.0, 0.05, 0.95, 1.0]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        let mut model = MultiLayerPerceptronModel::default();
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds[3] > preds[0]);
    }
}
