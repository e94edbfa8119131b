use std::collections::BTreeSet;

use linker_core::{CatalogRecord, KbItem};

use crate::dates::validate_date;

/// A KB item alongside derived, normalized/tokenized views used by the
/// feature extractor. Keeping the original next to the derived fields
/// avoids re-deriving them per feature (§4.3).
#[derive(Debug, Clone)]
pub struct PreparedKbItem {
    pub item: KbItem,
    pub name_tokens: Vec<BTreeSet<String>>,
    pub url_tokens: Vec<BTreeSet<String>>,
    pub genre_tokens: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct PreparedCatalogRecord {
    pub record: CatalogRecord,
    pub name_tokens: Vec<BTreeSet<String>>,
    pub url_tokens: Vec<BTreeSet<String>>,
    pub genre_tokens: BTreeSet<String>,
}

/// Normalize and tokenize a KB item's names, URLs, and genres, and
/// re-validate its dates (§4.3).
pub fn prepare_kb_item(mut item: KbItem) -> PreparedKbItem {
    item.birth_date = validate_date(item.birth_date, &format!("{}/birth_date", item.qid));
    item.death_date = validate_date(item.death_date, &format!("{}/death_date", item.qid));

    let all_names = item.labels.iter().chain(item.aliases.iter());
    let name_tokens = all_names.map(|n| text_normalize::tokenize(n)).collect();
    let url_tokens = item
        .sitelinks
        .iter()
        .chain(item.third_party_urls.iter())
        .filter_map(|u| text_normalize::tokenize_url(u, false))
        .collect();
    let genre_tokens = item.genres.iter().flat_map(|g| text_normalize::tokenize(g)).collect();

    PreparedKbItem { item, name_tokens, url_tokens, genre_tokens }
}

pub fn prepare_catalog_record(mut record: CatalogRecord) -> PreparedCatalogRecord {
    record.birth_date = validate_date(record.birth_date, &format!("{}/birth_date", record.tid));
    record.death_date = validate_date(record.death_date, &format!("{}/death_date", record.tid));

    let name_tokens = record.name.iter().map(|n| text_normalize::tokenize(n)).collect();
    let url_tokens = record.urls.iter().filter_map(|u| text_normalize::tokenize_url(u, false)).collect();
    let genre_tokens = record.genres.iter().flat_map(|g| text_normalize::tokenize(g)).collect();
    PreparedCatalogRecord { record, name_tokens, url_tokens, genre_tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_kb_item_derives_name_tokens_from_labels_and_aliases() {
        let item = KbItem {
            qid: "Q1".into(),
            labels: vec!["Joey Ramone".into()],
            aliases: vec!["Jeffry Hyman".into()],
            ..Default::default()
        };
        let prepared = prepare_kb_item(item);
        assert_eq!(prepared.name_tokens.len(), 2);
        assert!(prepared.name_tokens[0].contains("joey"));
        assert!(prepared.name_tokens[1].contains("hyman"));
    }
}
