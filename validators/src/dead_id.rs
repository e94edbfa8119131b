use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

/// `checks.py::check_existence`: an identifier claim is invalid when the
/// target identifier it names does not exist as a row in the catalog at
/// all (as opposed to existing but disagreeing on metadata/links, which
/// is what the other two validators check).
pub fn dead_identifiers(
    kb_claims: &[(String, String)],
    existing_target_ids: &BTreeSet<String>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut invalid: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (qid, target_id) in kb_claims {
        if !existing_target_ids.contains(target_id) {
            warn!(qid, target_id, "identifier is invalid: no matching catalog row");
            invalid.entry(target_id.clone()).or_default().insert(qid.clone());
        }
    }
    info!(total = invalid.len(), "dead-identifier check complete");
    invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_claims_pointing_at_missing_target_ids() {
        let claims = vec![("Q1".to_string(), "T1".to_string()), ("Q2".to_string(), "T2".to_string())];
        let existing = BTreeSet::from(["T1".to_string()]);
        let invalid = dead_identifiers(&claims, &existing);
        assert_eq!(invalid.len(), 1);
        assert!(invalid.get("T2").unwrap().contains("Q2"));
    }

    #[test]
    fn empty_when_every_target_id_exists() {
        let claims = vec![("Q1".to_string(), "T1".to_string())];
        let existing = BTreeSet::from(["T1".to_string()]);
        assert!(dead_identifiers(&claims, &existing).is_empty());
    }
}
