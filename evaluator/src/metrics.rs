use serde::{Deserialize, Serialize};

/// A binary confusion matrix plus the derived precision/recall/F1 (§4.7,
/// §8). `threshold` is the score cutoff used to binarize predictions
/// before counting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Metrics {
    pub fn from_predictions(predictions: &[f32], targets: &[f64], threshold: f32) -> Self {
        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut tn = 0usize;
        let mut fn_ = 0usize;

        for (&pred, &target) in predictions.iter().zip(targets.iter()) {
            let predicted_positive = pred >= threshold;
            let actual_positive = target > 0.5;
            match (predicted_positive, actual_positive) {
                (true, true) => tp += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
                (false, false) => tn += 1,
            }
        }

        let precision = if tp + fp == 0 { 0.0 } else { tp as f64 / (tp + fp) as f64 };
        let recall = if tp + fn_ == 0 { 0.0 } else { tp as f64 / (tp + fn_) as f64 };
        let f1 = if precision + recall == 0.0 { 0.0 } else { 2.0 * precision * recall / (precision + recall) };

        Self {
            true_positive: tp,
            false_positive: fp,
            true_negative: tn,
            false_negative: fn_,
            precision,
            recall,
            f1,
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_yield_f1_of_one() {
        let predictions = vec![1.0, 0.0, 1.0, 0.0];
        let targets = vec![1.0, 0.0, 1.0, 0.0];
        let m = Metrics::from_predictions(&predictions, &targets, 0.5);
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.f1, 1.0);
    }

    #[test]
    fn all_wrong_predictions_yield_zero_f1() {
        let predictions = vec![0.0, 1.0];
        let targets = vec![1.0, 0.0];
        let m = Metrics::from_predictions(&predictions, &targets, 0.5);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn stdev_of_identical_values_is_zero() {
        assert_eq!(stdev(&[0.8, 0.8, 0.8]), 0.0);
    }
}
