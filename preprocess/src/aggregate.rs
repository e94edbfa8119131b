use std::collections::BTreeMap;

use linker_core::CatalogRecord;

/// Aggregates denormalized catalog rows (one row per (TID, URL) or (TID,
/// relationship) join result) by TID: value columns become
/// lists/sets of distinct observed values (§4.3).
pub fn aggregate_by_tid(rows: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let mut by_tid: BTreeMap<String, CatalogRecord> = BTreeMap::new();
    for row in rows {
        let entry = by_tid.entry(row.tid.clone()).or_insert_with(|| CatalogRecord {
            tid: row.tid.clone(),
            ..Default::default()
        });
        for name in row.name {
            if !entry.name.contains(&name) {
                entry.name.push(name);
            }
        }
        entry.birth_date = entry.birth_date.or(row.birth_date);
        entry.death_date = entry.death_date.or(row.death_date);
        entry.gender = entry.gender.clone().or(row.gender);
        entry.description = entry.description.clone().or(row.description);
        for place in row.birth_place {
            if !entry.birth_place.contains(&place) {
                entry.birth_place.push(place);
            }
        }
        for place in row.death_place {
            if !entry.death_place.contains(&place) {
                entry.death_place.push(place);
            }
        }
        for url in row.urls {
            if !entry.urls.contains(&url) {
                entry.urls.push(url);
            }
        }
        for genre in row.genres {
            if !entry.genres.contains(&genre) {
                entry.genres.push(genre);
            }
        }
        for rel in row.relationships {
            if !entry.relationships.contains(&rel) {
                entry.relationships.push(rel);
            }
        }
    }
    by_tid.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_duplicate_tid_rows_into_one_record() {
        let rows = vec![
            CatalogRecord { tid: "T1".into(), urls: vec!["https://a".into()], ..Default::default() },
            CatalogRecord { tid: "T1".into(), urls: vec!["https://b".into()], ..Default::default() },
            CatalogRecord { tid: "T2".into(), urls: vec!["https://c".into()], ..Default::default() },
        ];
        let aggregated = aggregate_by_tid(rows);
        assert_eq!(aggregated.len(), 2);
        let t1 = aggregated.iter().find(|r| r.tid == "T1").unwrap();
        assert_eq!(t1.urls.len(), 2);
    }
}
