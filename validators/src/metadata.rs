use std::collections::BTreeMap;

use linker_core::{CatalogRecord, KbItem, PrecisionDate};

use crate::assess::{assess, AssessResult, WikidataEntry};

/// One comparable biographical fact (`checks.py::check_metadata`'s four
/// criteria: birth/death date, gender, birth/death place). Dates compare
/// at whichever side's precision is coarser, same rule as the feature
/// extractor's date comparator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum BioFact {
    BirthDate(i32, u8, u8),
    DeathDate(i32, u8, u8),
    Gender(String),
    BirthPlace(String),
    DeathPlace(String),
}

impl BioFact {
    /// Wikidata property this fact is asserted under (`vocabulary.py`'s
    /// `SEX_OR_GENDER`/`PLACE_OF_BIRTH`/`PLACE_OF_DEATH`/`DATE_OF_BIRTH`/
    /// `DATE_OF_DEATH` constants).
    pub fn property(&self) -> &'static str {
        match self {
            BioFact::BirthDate(..) => "P569",
            BioFact::DeathDate(..) => "P570",
            BioFact::Gender(_) => "P21",
            BioFact::BirthPlace(_) => "P19",
            BioFact::DeathPlace(_) => "P20",
        }
    }

    /// Printable value for the `(property, value)` pair: a `YYYY[-MM[-DD]]`
    /// date string, truncated to whatever precision the fact carries, or
    /// the bare gender/place token.
    pub fn value(&self) -> String {
        match self {
            BioFact::BirthDate(y, 0, _) | BioFact::DeathDate(y, 0, _) => format!("{y}"),
            BioFact::BirthDate(y, m, 0) | BioFact::DeathDate(y, m, 0) => format!("{y}-{m:02}"),
            BioFact::BirthDate(y, m, d) | BioFact::DeathDate(y, m, d) => format!("{y}-{m:02}-{d:02}"),
            BioFact::Gender(g) | BioFact::BirthPlace(g) | BioFact::DeathPlace(g) => g.clone(),
        }
    }
}

fn date_fact(date: &PrecisionDate, wrap: fn(i32, u8, u8) -> BioFact) -> BioFact {
    match date.precision.attribute_index() {
        0 => wrap(date.year, 0, 0),
        1 => wrap(date.year, date.month, 0),
        _ => wrap(date.year, date.month, date.day),
    }
}

fn kb_facts(item: &KbItem) -> std::collections::BTreeSet<BioFact> {
    let mut facts = std::collections::BTreeSet::new();
    if let Some(d) = &item.birth_date {
        facts.insert(date_fact(d, BioFact::BirthDate));
    }
    if let Some(d) = &item.death_date {
        facts.insert(date_fact(d, BioFact::DeathDate));
    }
    if let Some(g) = &item.gender {
        facts.insert(BioFact::Gender(g.to_lowercase()));
    }
    facts.extend(item.birth_place.iter().map(|p| BioFact::BirthPlace(p.to_lowercase())));
    facts.extend(item.death_place.iter().map(|p| BioFact::DeathPlace(p.to_lowercase())));
    facts
}

fn catalog_facts(record: &CatalogRecord) -> std::collections::BTreeSet<BioFact> {
    let mut facts = std::collections::BTreeSet::new();
    if let Some(d) = &record.birth_date {
        facts.insert(date_fact(d, BioFact::BirthDate));
    }
    if let Some(d) = &record.death_date {
        facts.insert(date_fact(d, BioFact::DeathDate));
    }
    if let Some(g) = &record.gender {
        facts.insert(BioFact::Gender(g.to_lowercase()));
    }
    facts.extend(record.birth_place.iter().map(|p| BioFact::BirthPlace(p.to_lowercase())));
    facts.extend(record.death_place.iter().map(|p| BioFact::DeathPlace(p.to_lowercase())));
    facts
}

/// `checks.py::check_metadata`: compare birth/death dates, gender, and
/// birth/death place between a QID and the catalog record(s) its
/// identifier claims point at.
pub fn check_metadata(
    kb_items: &BTreeMap<String, (KbItem, std::collections::BTreeSet<String>)>,
    target_records: &BTreeMap<String, CatalogRecord>,
) -> AssessResult<BioFact> {
    let source: BTreeMap<String, WikidataEntry<BioFact>> = kb_items
        .iter()
        .map(|(qid, (item, target_ids))| {
            (qid.clone(), WikidataEntry { identifiers: target_ids.clone(), data: kb_facts(item) })
        })
        .collect();

    let target: BTreeMap<String, std::collections::BTreeSet<BioFact>> =
        target_records.iter().map(|(tid, record)| (tid.clone(), catalog_facts(record))).collect();

    assess(&source, &target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deprecates_on_gender_mismatch() {
        let mut kb_items = BTreeMap::new();
        kb_items.insert(
            "Q1".to_string(),
            (
                KbItem { qid: "Q1".to_string(), gender: Some("male".to_string()), ..Default::default() },
                std::collections::BTreeSet::from(["T1".to_string()]),
            ),
        );
        let mut target_records = BTreeMap::new();
        target_records.insert(
            "T1".to_string(),
            CatalogRecord { tid: "T1".to_string(), gender: Some("female".to_string()), ..Default::default() },
        );

        let result = check_metadata(&kb_items, &target_records);
        assert!(result.to_deprecate.get("T1").unwrap().contains("Q1"));
    }

    #[test]
    fn adds_birth_place_known_only_on_target_side() {
        let mut kb_items = BTreeMap::new();
        kb_items.insert(
            "Q1".to_string(),
            (
                KbItem {
                    qid: "Q1".to_string(),
                    birth_date: Some(PrecisionDate::new_year(1980)),
                    ..Default::default()
                },
                std::collections::BTreeSet::from(["T1".to_string()]),
            ),
        );
        let mut target_records = BTreeMap::new();
        target_records.insert(
            "T1".to_string(),
            CatalogRecord {
                tid: "T1".to_string(),
                birth_date: Some(PrecisionDate::new_year(1980)),
                birth_place: vec!["Paris".to_string()],
                ..Default::default()
            },
        );

        let result = check_metadata(&kb_items, &target_records);
        assert!(result.to_deprecate.is_empty());
        assert!(result.to_add.get("Q1").unwrap().contains(&BioFact::BirthPlace("paris".to_string())));
    }
}
