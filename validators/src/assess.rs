use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tracing::{debug, warn};

/// One KB entity's claimed target identifiers plus whatever criterion
/// data (links, or biographical statements) was gathered for it.
#[derive(Debug, Clone, Default)]
pub struct WikidataEntry<V: Ord> {
    pub identifiers: BTreeSet<String>,
    pub data: BTreeSet<V>,
}

#[derive(Debug, Clone, Default)]
pub struct AssessResult<V: Ord> {
    /// target identifier -> QIDs whose claim should be deprecated
    /// (shared no data with the target record at all).
    pub to_deprecate: BTreeMap<String, BTreeSet<String>>,
    /// QID -> data present on the target side but missing on Wikidata.
    pub to_add: BTreeMap<String, BTreeSet<V>>,
}

/// The shared core of all three validators (`checks.py::_assess`): for
/// every Wikidata item's claimed target identifier, compare what
/// Wikidata already knows against what the target catalog record has.
/// No overlap at all means the identifier claim is probably wrong and
/// should be deprecated; extra target data that Wikidata is missing
/// becomes a statement to add.
pub fn assess<V: Ord + Clone>(
    source: &BTreeMap<String, WikidataEntry<V>>,
    target: &BTreeMap<String, BTreeSet<V>>,
) -> AssessResult<V> {
    let mut to_deprecate: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut to_add: BTreeMap<String, BTreeSet<V>> = BTreeMap::new();

    for (qid, entry) in source {
        if entry.data.is_empty() {
            warn!(qid, "skipping check: no data available for this QID");
            continue;
        }
        for target_id in &entry.identifiers {
            let Some(target_data) = target.get(target_id) else {
                continue;
            };
            if target_data.is_empty() {
                warn!(target_id, "skipping check: no data available for target identifier");
                continue;
            }

            let shared: BTreeSet<V> = entry.data.intersection(target_data).cloned().collect();
            let extra: BTreeSet<V> = target_data.difference(&entry.data).cloned().collect();

            if shared.is_empty() {
                debug!(qid, target_id, "no shared data, flagging identifier claim for deprecation");
                to_deprecate.entry(target_id.clone()).or_default().insert(qid.clone());
            }
            if !extra.is_empty() {
                to_add.entry(qid.clone()).or_default().extend(extra);
            }
        }
    }

    AssessResult { to_deprecate, to_add }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deprecates_identifier_with_no_shared_data() {
        let mut source = BTreeMap::new();
        source.insert(
            "Q1".to_string(),
            WikidataEntry { identifiers: BTreeSet::from(["T1".to_string()]), data: BTreeSet::from(["male".to_string()]) },
        );
        let mut target = BTreeMap::new();
        target.insert("T1".to_string(), BTreeSet::from(["female".to_string()]));

        let result = assess(&source, &target);
        assert!(result.to_deprecate.get("T1").unwrap().contains("Q1"));
        assert!(result.to_add.is_empty());
    }

    #[test]
    fn adds_extra_target_data_not_on_wikidata() {
        let mut source = BTreeMap::new();
        source.insert(
            "Q1".to_string(),
            WikidataEntry { identifiers: BTreeSet::from(["T1".to_string()]), data: BTreeSet::from(["male".to_string()]) },
        );
        let mut target = BTreeMap::new();
        target.insert("T1".to_string(), BTreeSet::from(["male".to_string(), "paris".to_string()]));

        let result = assess(&source, &target);
        assert!(result.to_deprecate.is_empty());
        assert_eq!(result.to_add.get("Q1").unwrap(), &BTreeSet::from(["paris".to_string()]));
    }

    #[test]
    fn ignores_identifiers_with_no_matching_target_record() {
        let mut source = BTreeMap::new();
        source.insert(
            "Q1".to_string(),
            WikidataEntry { identifiers: BTreeSet::from(["T404".to_string()]), data: BTreeSet::from(["male".to_string()]) },
        );
        let target = BTreeMap::new();

        let result = assess(&source, &target);
        assert!(result.to_deprecate.is_empty());
        assert!(result.to_add.is_empty());
    }
}
