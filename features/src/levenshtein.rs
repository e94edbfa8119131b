/// `1 - levenshtein(a,b) / max(|a|,|b|)` maximized over the cross-product
/// of two string lists (§4.5.2). An optional threshold binarizes the
/// result to `{0.0, 1.0}`.
pub fn levenshtein_similarity(source: &[String], target: &[String], threshold: Option<f32>) -> f32 {
    if source.is_empty() || target.is_empty() {
        return 0.0;
    }
    let mut best = 0.0f32;
    for s in source {
        for t in target {
            let max_len = s.chars().count().max(t.chars().count());
            let score = if max_len == 0 {
                1.0
            } else {
                1.0 - (strsim::levenshtein(s, t) as f32 / max_len as f32)
            };
            if score > best {
                best = score;
            }
        }
    }
    match threshold {
        Some(t) => if best >= t { 1.0 } else { 0.0 },
        None => best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        let source = vec!["Joey Ramone".to_string()];
        let target = vec!["Joey Ramone".to_string()];
        assert_eq!(levenshtein_similarity(&source, &target, None), 1.0);
    }

    #[test]
    fn picks_best_pair_across_cross_product() {
        let source = vec!["Joye Ramone".to_string(), "completely different".to_string()];
        let target = vec!["Joey Ramone".to_string()];
        let score = levenshtein_similarity(&source, &target, None);
        assert!(score > 0.8, "expected a high score, got {score}");
    }

    #[test]
    fn threshold_binarizes_output() {
        let source = vec!["abc".to_string()];
        let target = vec!["xyz".to_string()];
        assert_eq!(levenshtein_similarity(&source, &target, Some(0.9)), 0.0);
    }
}
