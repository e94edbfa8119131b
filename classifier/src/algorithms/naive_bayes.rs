use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::capability::ClassifierCapability;
use crate::error::ClassifierError;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassStats {
    mean: Array1<f64>,
    variance: Array1<f64>,
    prior: f64,
}

/// Gaussian Naive Bayes: assumes each feature column is normally
/// distributed within a class and independent of the others given the
/// class, per `sklearn.naive_bayes.GaussianNB` (the model the original
/// pipeline's `NaiveBayesClassifier` wraps).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    positive: Option<ClassStats>,
    negative: Option<ClassStats>,
}

const VARIANCE_FLOOR: f64 = 1e-9;

fn class_stats(rows: &Array2<f64>, prior: f64) -> ClassStats {
    let mean = rows.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(rows.ncols()));
    let mut variance = Array1::<f64>::zeros(rows.ncols());
    for row in rows.axis_iter(Axis(0)) {
        for (v, (&x, &m)) in variance.iter_mut().zip(row.iter().zip(mean.iter())) {
            *v += (x - m).powi(2);
        }
    }
    let n = rows.nrows().max(1) as f64;
    variance.mapv_inplace(|v| (v / n).max(VARIANCE_FLOOR));
    ClassStats { mean, variance, prior }
}

fn log_likelihood(stats: &ClassStats, row: ndarray::ArrayView1<f64>) -> f64 {
    let mut log_lik = stats.prior.max(1e-12).ln();
    for ((&x, &m), &v) in row.iter().zip(stats.mean.iter()).zip(stats.variance.iter()) {
        log_lik += -0.5 * (2.0 * std::f64::consts::PI * v).ln() - (x - m).powi(2) / (2.0 * v);
    }
    log_lik
}

impl ClassifierCapability for NaiveBayesModel {
    fn fit(&mut self, records: &Array2<f64>, targets: &Array1<f64>) -> Result<(), ClassifierError> {
        let n = records.nrows();
        if n == 0 {
            return Err(ClassifierError::Backend("cannot fit on an empty training set".to_string()));
        }
        let pos_rows: Vec<usize> = targets.iter().enumerate().filter(|(_, &t)| t > 0.5).map(|(i, _)| i).collect();
        let neg_rows: Vec<usize> = targets.iter().enumerate().filter(|(_, &t)| t <= 0.5).map(|(i, _)| i).collect();
        if pos_rows.is_empty() || neg_rows.is_empty() {
            return Err(ClassifierError::Backend("naive bayes needs both classes represented".to_string()));
        }

        let positive = records.select(Axis(0), &pos_rows);
        let negative = records.select(Axis(0), &neg_rows);
        let prior = pos_rows.len() as f64 / n as f64;

        self.positive = Some(class_stats(&positive, prior));
        self.negative = Some(class_stats(&negative, 1.0 - prior));
        Ok(())
    }

    fn predict(&self, records: &Array2<f64>) -> Result<Vec<f32>, ClassifierError> {
        let positive = self.positive.as_ref().ok_or(ClassifierError::NotFitted)?;
        let negative = self.negative.as_ref().ok_or(ClassifierError::NotFitted)?;
        Ok(records
            .axis_iter(Axis(0))
            .map(|row| {
                let log_pos = log_likelihood(positive, row);
                let log_neg = log_likelihood(negative, row);
                // log-odds -> probability, stable against overflow by
                // subtracting the max before exponentiating.
                let max = log_pos.max(log_neg);
                let pos = (log_pos - max).exp();
                let neg = (log_neg - max).exp();
                (pos / (pos + neg)) as f32
            })
            .collect())
    }

    fn expected_width(&self) -> Option<usize> {
        self.positive.as_ref().map(|s| s.mean.len())
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_two_well_apart_gaussian_clusters() {
        let records = Array2::from_shape_vec((4, 1), vec![0.0, 0.1, 5.0, 5.1]).unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);
        let mut model = NaiveBayesModel::default();
        model.fit(&records, &targets).unwrap();
        let preds = model.predict(&records).unwrap();
        assert!(preds[0] < 0.5);
        assert!(preds[2] > 0.5);
    }
}
