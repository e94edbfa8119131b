use linker_core::{CatalogRecord, KbItem};
use regex::Regex;
use std::sync::OnceLock;

fn qid_in_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/=](Q\d+)(?:[/?#]|$)").expect("valid regex"))
}

/// Name-rule (`classify.py::_zero_when_different_names`): if the KB
/// item's labels/aliases share no normalized token with the catalog
/// record's name, the pair cannot be a match regardless of what the
/// model scored it — force the score to 0.
pub fn zero_when_different_names(kb: &KbItem, catalog: &CatalogRecord, score: f32) -> f32 {
    let kb_tokens: std::collections::BTreeSet<String> =
        kb.labels.iter().chain(kb.aliases.iter()).flat_map(|s| text_normalize::tokenize(s)).collect();
    let catalog_tokens: std::collections::BTreeSet<String> =
        catalog.name.iter().flat_map(|s| text_normalize::tokenize(s)).collect();

    if kb_tokens.is_empty() || catalog_tokens.is_empty() {
        return score;
    }
    if kb_tokens.is_disjoint(&catalog_tokens) {
        0.0
    } else {
        score
    }
}

/// Self-link rule (`classify.py::_one_when_wikidata_link_correct`): when
/// a catalog URL already points back at a KB entity page, that is
/// ground truth — override to 1.0 if the embedded QID matches the pair
/// under consideration, 0.0 if it names a different QID.
pub fn one_when_self_link_correct(qid: &str, catalog: &CatalogRecord, score: f32) -> f32 {
    for url in &catalog.urls {
        if let Some(captures) = qid_in_url_regex().captures(url) {
            let found = &captures[1];
            return if found == qid { 1.0 } else { 0.0 };
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroes_score_when_no_shared_name_tokens() {
        let kb = KbItem { labels: vec!["Joey Ramone".into()], ..Default::default() };
        let catalog = CatalogRecord { name: vec!["Totally Different Person".into()], ..Default::default() };
        assert_eq!(zero_when_different_names(&kb, &catalog, 0.9), 0.0);
    }

    #[test]
    fn keeps_score_when_names_share_a_token() {
        let kb = KbItem { labels: vec!["Joey Ramone".into()], ..Default::default() };
        let catalog = CatalogRecord { name: vec!["Joey Ramone (musician)".into()], ..Default::default() };
        assert_eq!(zero_when_different_names(&kb, &catalog, 0.9), 0.9);
    }

    #[test]
    fn overrides_to_one_when_self_link_qid_matches() {
        let catalog = CatalogRecord { urls: vec!["https://www.wikidata.org/wiki/Q42".into()], ..Default::default() };
        assert_eq!(one_when_self_link_correct("Q42", &catalog, 0.1), 1.0);
    }

    #[test]
    fn overrides_to_zero_when_self_link_qid_differs() {
        let catalog = CatalogRecord { urls: vec!["https://www.wikidata.org/wiki/Q1".into()], ..Default::default() };
        assert_eq!(one_when_self_link_correct("Q42", &catalog, 0.9), 0.0);
    }

    #[test]
    fn leaves_score_untouched_without_a_self_link() {
        let catalog = CatalogRecord { urls: vec!["https://example.com/artist/1".into()], ..Default::default() };
        assert_eq!(one_when_self_link_correct("Q42", &catalog, 0.73), 0.73);
    }
}
