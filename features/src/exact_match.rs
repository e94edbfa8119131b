/// Pairwise equality over two lists of strings, maximized over the
/// cross-product (§4.5.1). Used for full-name and URL-list columns.
pub fn exact_match(
    source: &[String],
    target: &[String],
    agree: f32,
    disagree: f32,
    missing: f32,
) -> f32 {
    if source.is_empty() || target.is_empty() {
        return missing;
    }
    let mut best = disagree;
    for s in source {
        for t in target {
            let score = if s == t { agree } else { disagree };
            if score > best {
                best = score;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_agree_value_on_any_cross_product_match() {
        let source = vec!["Joey Ramone".to_string(), "Jeff Hyman".to_string()];
        let target = vec!["Jeff Hyman".to_string()];
        assert_eq!(exact_match(&source, &target, 1.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn returns_missing_when_either_side_empty() {
        assert_eq!(exact_match(&[], &["x".to_string()], 1.0, 0.0, -1.0), -1.0);
    }
}
