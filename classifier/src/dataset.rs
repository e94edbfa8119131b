use blocker::PairIndex;
use features::FeatureVectorChunk;
use ndarray::{Array1, Array2};

/// Converts a feature-vector chunk plus the positive-pair index into the
/// `(records, targets)` matrices every `ClassifierCapability` trains on.
pub fn to_training_matrix(features: &FeatureVectorChunk, positives: &PairIndex) -> (Array2<f64>, Array1<f64>) {
    let width = features.rows.first().map(|r| r.values.len()).unwrap_or(0);
    let mut records = Array2::<f64>::zeros((features.rows.len(), width));
    let mut targets = Array1::<f64>::zeros(features.rows.len());
    for (i, row) in features.rows.iter().enumerate() {
        for (j, v) in row.values.iter().enumerate() {
            records[[i, j]] = *v as f64;
        }
        targets[i] = if positives.contains(&row.qid, &row.tid) { 1.0 } else { 0.0 };
    }
    (records, targets)
}

pub fn to_predict_matrix(features: &FeatureVectorChunk) -> Array2<f64> {
    let width = features.rows.first().map(|r| r.values.len()).unwrap_or(0);
    let mut records = Array2::<f64>::zeros((features.rows.len(), width));
    for (i, row) in features.rows.iter().enumerate() {
        for (j, v) in row.values.iter().enumerate() {
            records[[i, j]] = *v as f64;
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use features::FeatureRow;

    #[test]
    fn training_matrix_labels_known_positives_as_one() {
        let features = FeatureVectorChunk::from_rows(vec![
            FeatureRow { qid: "Q1".into(), tid: "T1".into(), values: vec![1.0, 0.5] },
            FeatureRow { qid: "Q2".into(), tid: "T2".into(), values: vec![0.1, 0.2] },
        ]);
        let positives = PairIndex::from_pairs(vec![("Q1".to_string(), "T1".to_string())]);
        let (records, targets) = to_training_matrix(&features, &positives);
        assert_eq!(records.shape(), &[2, 2]);
        assert_eq!(targets[0], 1.0);
        assert_eq!(targets[1], 0.0);
    }
}
