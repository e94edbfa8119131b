use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sentinel written into any feature column that could not be computed
/// because one side of the pair was null for that column (§4.5 "missing
/// value policy").
pub const MISSING_VALUE: f32 = -1.0;

/// The feature columns this implementation actively computes, in a fixed
/// order so every `FeatureRow` has the same width.
pub const FEATURE_COLUMNS: &[&str] = &[
    "name_exact",
    "name_levenshtein",
    "name_cosine",
    "date_of_birth_similar",
    "date_of_death_similar",
    "url_shared_tokens_plus",
    "occupation_shared",
    "genre_shared_tokens",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRow {
    pub qid: String,
    pub tid: String,
    pub values: Vec<f32>,
}

/// A chunk's worth of feature rows, deduplicated by (qid, tid) (§4.5).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureVectorChunk {
    pub rows: Vec<FeatureRow>,
}

impl FeatureVectorChunk {
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        let mut seen = HashMap::new();
        let mut deduped = Vec::new();
        for row in rows {
            let key = (row.qid.clone(), row.tid.clone());
            if seen.insert(key, ()).is_none() {
                deduped.push(row);
            }
        }
        Self { rows: deduped }
    }

    /// Pads every row to `width` columns with the missing-value sentinel
    /// (§4.6, classifier output-width-skew policy): used when the active
    /// model expects more columns than this run computed.
    pub fn pad_to_width(&mut self, width: usize) {
        for row in &mut self.rows {
            if row.values.len() < width {
                tracing::warn!(qid = %row.qid, tid = %row.tid, have = row.values.len(), want = width, "padding feature row to expected width");
                row.values.resize(width, MISSING_VALUE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_rows_with_same_qid_tid_keeping_first() {
        let rows = vec![
            FeatureRow { qid: "Q1".into(), tid: "T1".into(), values: vec![1.0] },
            FeatureRow { qid: "Q1".into(), tid: "T1".into(), values: vec![2.0] },
        ];
        let chunk = FeatureVectorChunk::from_rows(rows);
        assert_eq!(chunk.rows.len(), 1);
        assert_eq!(chunk.rows[0].values, vec![1.0]);
    }

    #[test]
    fn pads_short_rows_with_missing_sentinel() {
        let mut chunk = FeatureVectorChunk::from_rows(vec![FeatureRow { qid: "Q1".into(), tid: "T1".into(), values: vec![1.0] }]);
        chunk.pad_to_width(3);
        assert_eq!(chunk.rows[0].values, vec![1.0, MISSING_VALUE, MISSING_VALUE]);
    }
}
