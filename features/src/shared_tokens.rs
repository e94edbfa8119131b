use std::collections::BTreeSet;

/// Jaccard similarity between two token sets, with a 0.9-weighted
/// penalty subtracted for each token in the intersection that belongs to
/// the band-low-score stopword list (§4.5.5). Used for band/group names
/// where common words like "Orchestra" inflate naive overlap.
pub fn shared_tokens(source: &BTreeSet<String>, target: &BTreeSet<String>) -> f32 {
    if source.is_empty() && target.is_empty() {
        return 0.0;
    }
    let intersection: BTreeSet<&String> = source.intersection(target).collect();
    let union: BTreeSet<&String> = source.union(target).collect();
    if union.is_empty() {
        return 0.0;
    }
    let penalty: f32 = intersection
        .iter()
        .filter(|t| text_normalize::band_low_score_words().contains(t.as_str()))
        .count() as f32
        * 0.9;
    let raw = intersection.len() as f32 / union.len() as f32;
    (raw - penalty / union.len() as f32).max(0.0)
}

/// Min-normalized containment over flattened, lowercased token lists,
/// with an optional additional stopword set subtracted from both sides
/// before comparing (§4.5.6). Used for URL-token comparisons.
pub fn shared_tokens_plus(
    source: &[BTreeSet<String>],
    target: &[BTreeSet<String>],
    extra_stopwords: Option<&std::collections::HashSet<&str>>,
) -> f32 {
    let flatten = |sets: &[BTreeSet<String>]| -> BTreeSet<String> {
        sets.iter()
            .flatten()
            .map(|t| t.to_ascii_lowercase())
            .filter(|t| extra_stopwords.map(|sw| !sw.contains(t.as_str())).unwrap_or(true))
            .collect()
    };
    let a = flatten(source);
    let b = flatten(target);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(&b).count() as f32;
    let min_len = a.len().min(b.len()) as f32;
    shared / min_len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn shared_tokens_is_jaccard_when_no_low_score_words() {
        let a = set(&["ramones", "punk"]);
        let b = set(&["ramones", "rock"]);
        let score = shared_tokens(&a, &b);
        assert!((score - (1.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn shared_tokens_in_0_1_range_and_zero_when_disjoint() {
        let a = set(&["a"]);
        let b = set(&["b"]);
        assert_eq!(shared_tokens(&a, &b), 0.0);
    }

    #[test]
    fn shared_tokens_plus_is_min_normalized_containment() {
        let a = vec![set(&["discogs", "artist", "264375"])];
        let b = vec![set(&["artist", "264375"])];
        assert_eq!(shared_tokens_plus(&a, &b, None), 1.0);
    }
}
