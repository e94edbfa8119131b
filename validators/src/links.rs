use std::collections::{BTreeMap, BTreeSet};

use linker_core::{FormatterRegistry, KbItem};

use crate::assess::{assess, WikidataEntry};

/// Everything the links validator adds back to a QID: catalog URLs it
/// couldn't resolve to a registered external-ID property stay as plain
/// URLs to add; the rest become identifier-claim additions instead
/// (`checks.py::_extract_ids_from_urls`'s triple classification, minus
/// the "already known" bucket which `assess` already filters out).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinksToAdd {
    pub urls: BTreeSet<String>,
    pub identifiers: BTreeSet<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct LinksReport {
    pub to_deprecate: BTreeMap<String, BTreeSet<String>>,
    pub to_add: BTreeMap<String, LinksToAdd>,
}

fn kb_links(item: &KbItem) -> BTreeSet<String> {
    item.sitelinks
        .iter()
        .chain(item.third_party_urls.iter())
        .chain(item.identifier_claims.iter().filter_map(|c| c.url.as_ref()))
        .cloned()
        .collect()
}

/// Lower-cases scheme and host so `check_links` can treat
/// `HTTPS://Example.com/x` and `https://example.com/x` as the same URL.
/// Opt-in (`RunConfig.normalize_link_urls`); the original only
/// case-folds what `text-normalize::url` already normalizes at
/// ingestion time, so this stays off by default.
fn normalize_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else { return url.to_string() };
    match rest.split_once('/') {
        Some((host, path)) => format!("{}://{}/{}", scheme.to_lowercase(), host.to_lowercase(), path),
        None => format!("{}://{}", scheme.to_lowercase(), rest.to_lowercase()),
    }
}

fn normalize_set(urls: &BTreeSet<String>) -> BTreeSet<String> {
    urls.iter().map(|u| normalize_url(u)).collect()
}

/// `checks.py::check_links`: compare the set of URLs Wikidata already
/// carries for a QID against the set of URLs on the matched catalog
/// record. Missing target URLs are split, per `_extract_ids_from_urls`,
/// into ones that resolve through the formatter registry (become
/// identifier-claim additions) and ones that don't (stay plain URLs).
pub fn check_links(
    kb_items: &BTreeMap<String, (KbItem, BTreeSet<String>)>,
    target_links: &BTreeMap<String, BTreeSet<String>>,
    registry: &FormatterRegistry,
    normalize: bool,
) -> LinksReport {
    let source: BTreeMap<String, WikidataEntry<String>> = kb_items
        .iter()
        .map(|(qid, (item, target_ids))| {
            let data = if normalize { normalize_set(&kb_links(item)) } else { kb_links(item) };
            (qid.clone(), WikidataEntry { identifiers: target_ids.clone(), data })
        })
        .collect();

    let target_links: BTreeMap<String, BTreeSet<String>> = if normalize {
        target_links.iter().map(|(tid, urls)| (tid.clone(), normalize_set(urls))).collect()
    } else {
        target_links.clone()
    };

    let result = assess(&source, &target_links);

    let mut to_add: BTreeMap<String, LinksToAdd> = BTreeMap::new();
    for (qid, urls) in result.to_add {
        let mut bucket = LinksToAdd::default();
        for url in urls {
            match text_normalize::get_external_id_from_url(&url, registry) {
                Some((id, property)) => {
                    bucket.identifiers.insert((property, id));
                }
                None => {
                    bucket.urls.insert(url);
                }
            }
        }
        to_add.insert(qid, bucket);
    }

    LinksReport { to_deprecate: result.to_deprecate, to_add }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FormatterRegistry {
        let mut reg = FormatterRegistry::default();
        reg.insert("P1953", "https://www.discogs.com/artist/$1", None);
        reg
    }

    #[test]
    fn splits_unresolvable_urls_from_identifier_claims() {
        let reg = registry();
        let mut kb_items = BTreeMap::new();
        kb_items.insert(
            "Q1".to_string(),
            (
                KbItem { qid: "Q1".to_string(), sitelinks: vec!["https://en.wikipedia.org/wiki/Joey".to_string()], ..Default::default() },
                BTreeSet::from(["T1".to_string()]),
            ),
        );
        let mut target_links = BTreeMap::new();
        target_links.insert(
            "T1".to_string(),
            BTreeSet::from([
                "https://en.wikipedia.org/wiki/Joey".to_string(),
                "https://www.discogs.com/artist/264375".to_string(),
                "https://example.com/unrelated".to_string(),
            ]),
        );

        let report = check_links(&kb_items, &target_links, &reg, false);
        let bucket = report.to_add.get("Q1").unwrap();
        assert!(bucket.identifiers.contains(&("P1953".to_string(), "264375".to_string())));
        assert!(bucket.urls.contains("https://example.com/unrelated"));
        assert!(report.to_deprecate.is_empty());
    }

    #[test]
    fn deprecates_when_no_link_overlap() {
        let reg = registry();
        let mut kb_items = BTreeMap::new();
        kb_items.insert(
            "Q1".to_string(),
            (
                KbItem { qid: "Q1".to_string(), sitelinks: vec!["https://en.wikipedia.org/wiki/Joey".to_string()], ..Default::default() },
                BTreeSet::from(["T1".to_string()]),
            ),
        );
        let mut target_links = BTreeMap::new();
        target_links.insert("T1".to_string(), BTreeSet::from(["https://example.com/unrelated".to_string()]));

        let report = check_links(&kb_items, &target_links, &reg, false);
        assert!(report.to_deprecate.get("T1").unwrap().contains("Q1"));
    }

    #[test]
    fn normalization_matches_differently_cased_hosts() {
        let reg = registry();
        let mut kb_items = BTreeMap::new();
        kb_items.insert(
            "Q1".to_string(),
            (
                KbItem { qid: "Q1".to_string(), sitelinks: vec!["HTTPS://EN.Wikipedia.org/wiki/Joey".to_string()], ..Default::default() },
                BTreeSet::from(["T1".to_string()]),
            ),
        );
        let mut target_links = BTreeMap::new();
        target_links.insert("T1".to_string(), BTreeSet::from(["https://en.wikipedia.org/wiki/Joey".to_string()]));

        let without_normalization = check_links(&kb_items, &target_links, &reg, false);
        assert!(without_normalization.to_deprecate.get("T1").unwrap().contains("Q1"));

        let with_normalization = check_links(&kb_items, &target_links, &reg, true);
        assert!(with_normalization.to_deprecate.is_empty());
        assert!(with_normalization.to_add.get("Q1").is_none_or(|b| b.urls.is_empty() && b.identifiers.is_empty()));
    }
}
