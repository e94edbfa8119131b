use std::collections::BTreeMap;

use tracing::warn;

/// Collapses a training positive-pair index so each QID maps to exactly
/// one TID, keeping the first TID encountered per QID.
///
/// This is a known-lossy step (§9 Open Question 1, preserved on purpose):
/// a QID legitimately linked to more than one catalog record loses all
/// but its first positive. The dropped count is logged so the behavior
/// stays visible rather than silent.
pub fn align_training_positives(pairs: &[(String, String)]) -> Vec<(String, String)> {
    let mut first_tid: BTreeMap<String, String> = BTreeMap::new();
    let mut dropped = 0usize;
    for (qid, tid) in pairs {
        if first_tid.contains_key(qid) {
            dropped += 1;
            continue;
        }
        first_tid.insert(qid.clone(), tid.clone());
    }
    if dropped > 0 {
        warn!(dropped, "collapsed multi-positive QIDs to a single TID during training preprocessing");
    }
    first_tid.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_tid_per_qid() {
        let pairs = vec![
            ("Q1".to_string(), "T1".to_string()),
            ("Q1".to_string(), "T2".to_string()),
            ("Q2".to_string(), "T3".to_string()),
        ];
        let aligned = align_training_positives(&pairs);
        assert_eq!(aligned, vec![("Q1".to_string(), "T1".to_string()), ("Q2".to_string(), "T3".to_string())]);
    }
}
