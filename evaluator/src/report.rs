use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use classifier::{build, Algorithm, ClassifierCapability};

use crate::error::EvaluatorError;
use crate::metrics::{mean, stdev, Metrics};
use crate::splits::stratified_kfold;

/// Per-fold metrics plus their mean/stdev across folds (§4.7 "averaged"
/// mode): each fold trains and scores independently, giving a sense of
/// how much performance varies with the training split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AveragedReport {
    pub folds: Vec<Metrics>,
    pub mean_precision: f64,
    pub mean_recall: f64,
    pub mean_f1: f64,
    pub stdev_f1: f64,
}

/// A single overall confusion matrix built from the union of every
/// fold's held-out predictions (§4.7 "single" mode): every row is
/// scored exactly once, by the model that did not see it in training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleReport {
    pub overall: Metrics,
}

fn select_rows(records: &Array2<f64>, rows: &[usize]) -> Array2<f64> {
    records.select(Axis(0), rows)
}

fn select_targets(targets: &Array1<f64>, rows: &[usize]) -> Array1<f64> {
    Array1::from_vec(rows.iter().map(|&r| targets[r]).collect())
}

/// Runs stratified k-fold cross-validation and reports each fold's
/// metrics independently (§4.7).
pub fn evaluate_averaged(
    records: &Array2<f64>,
    targets: &Array1<f64>,
    algorithm: Algorithm,
    k: usize,
    seed: u64,
    threshold: f32,
) -> Result<AveragedReport, EvaluatorError> {
    let folds = stratified_kfold(targets, k, seed);
    let mut per_fold = Vec::with_capacity(folds.len());

    for fold in &folds {
        let train_records = select_rows(records, &fold.train);
        let train_targets = select_targets(targets, &fold.train);
        let test_records = select_rows(records, &fold.test);
        let test_targets: Vec<f64> = fold.test.iter().map(|&r| targets[r]).collect();

        let mut model = build(algorithm);
        model.fit(&train_records, &train_targets)?;
        let predictions = model.predict(&test_records)?;

        per_fold.push(Metrics::from_predictions(&predictions, &test_targets, threshold));
    }

    let precisions: Vec<f64> = per_fold.iter().map(|m| m.precision).collect();
    let recalls: Vec<f64> = per_fold.iter().map(|m| m.recall).collect();
    let f1s: Vec<f64> = per_fold.iter().map(|m| m.f1).collect();

    Ok(AveragedReport {
        mean_precision: mean(&precisions),
        mean_recall: mean(&recalls),
        mean_f1: mean(&f1s),
        stdev_f1: stdev(&f1s),
        folds: per_fold,
    })
}

/// Runs stratified k-fold cross-validation and reports one confusion
/// matrix over the union of every fold's held-out predictions (§4.7).
pub fn evaluate_single(
    records: &Array2<f64>,
    targets: &Array1<f64>,
    algorithm: Algorithm,
    k: usize,
    seed: u64,
    threshold: f32,
) -> Result<SingleReport, EvaluatorError> {
    let folds = stratified_kfold(targets, k, seed);
    let n = records.nrows();
    let mut all_predictions = vec![0.0f32; n];

    for fold in &folds {
        let train_records = select_rows(records, &fold.train);
        let train_targets = select_targets(targets, &fold.train);
        let test_records = select_rows(records, &fold.test);

        let mut model = build(algorithm);
        model.fit(&train_records, &train_targets)?;
        let predictions = model.predict(&test_records)?;
        for (&row, pred) in fold.test.iter().zip(predictions.into_iter()) {
            all_predictions[row] = pred;
        }
    }

    let overall = Metrics::from_predictions(&all_predictions, &targets.to_vec(), threshold);
    Ok(SingleReport { overall })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Array2<f64>, Array1<f64>) {
        let records = Array2::from_shape_vec(
            (8, 1),
            vec![0.0, 0.05, 0.1, 0.15, 0.9, 0.95, 1.0, 1.05],
        )
        .unwrap();
        let targets = Array1::from_vec(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        (records, targets)
    }

    #[test]
    fn averaged_report_has_one_entry_per_fold() {
        let (records, targets) = toy_data();
        let report = evaluate_averaged(&records, &targets, Algorithm::LogisticRegression, 4, 3, 0.5).unwrap();
        assert_eq!(report.folds.len(), 4);
    }

    #[test]
    fn single_report_covers_every_row_exactly_once() {
        let (records, targets) = toy_data();
        let report = evaluate_single(&records, &targets, Algorithm::LogisticRegression, 4, 3, 0.5).unwrap();
        let total = report.overall.true_positive
            + report.overall.false_positive
            + report.overall.true_negative
            + report.overall.false_negative;
        assert_eq!(total, 8);
    }
}
