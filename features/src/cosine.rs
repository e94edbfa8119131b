use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

/// Tokenization strategy for the cosine string kernel (§4.5.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    /// Plain whitespace split (the system tokenizer).
    Split,
    /// Word n-grams.
    Word { n: usize },
    /// Character n-grams over the whole string.
    Char { n: usize },
    /// Character n-grams, not spanning word boundaries.
    CharWordBoundary { n: usize },
}

fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !unicode_normalization::char::is_combining_mark(*c)).collect()
}

fn analyze(text: &str, analyzer: Analyzer) -> Vec<String> {
    let folded = strip_accents(&text.to_lowercase());
    match analyzer {
        Analyzer::Split => folded.split_whitespace().map(str::to_string).collect(),
        Analyzer::Word { n } => {
            let words: Vec<&str> = folded.split_whitespace().collect();
            if words.len() < n {
                return Vec::new();
            }
            words.windows(n).map(|w| w.join(" ")).collect()
        }
        Analyzer::Char { n } => {
            let chars: Vec<char> = folded.chars().collect();
            if chars.len() < n {
                return vec![folded];
            }
            chars.windows(n).map(|w| w.iter().collect()).collect()
        }
        Analyzer::CharWordBoundary { n } => folded
            .split_whitespace()
            .flat_map(|word| {
                let chars: Vec<char> = word.chars().collect();
                if chars.len() < n {
                    vec![word.to_string()]
                } else {
                    chars.windows(n).map(|w| w.iter().collect()).collect()
                }
            })
            .collect(),
    }
}

fn term_counts(text: &str, analyzer: Analyzer) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in analyze(text, analyzer) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity between the token-count vectors of `source` and
/// `target` (each list joined into one string before tokenizing, the
/// same CountVectorizer-style comparison the original algorithm performs
/// per pair, simplified to a single joined document per side).
pub fn cosine_similarity(source: &[String], target: &[String], analyzer: Analyzer) -> f32 {
    if source.is_empty() || target.is_empty() {
        return 0.0;
    }
    let source_text = source.join(" ");
    let target_text = target.join(" ");
    let a = term_counts(&source_text, analyzer);
    let b = term_counts(&target_text, analyzer);

    let mut dot = 0.0f64;
    for (term, count_a) in &a {
        if let Some(count_b) = b.get(term) {
            dot += (*count_a as f64) * (*count_b as f64);
        }
    }
    let norm_a: f64 = a.values().map(|c| (*c as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|c| (*c as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_scores_one() {
        let source = vec!["Joey Ramone punk singer".to_string()];
        let target = vec!["Joey Ramone punk singer".to_string()];
        assert_eq!(cosine_similarity(&source, &target, Analyzer::Split), 1.0);
    }

    #[test]
    fn disjoint_text_scores_zero() {
        let source = vec!["aaaa".to_string()];
        let target = vec!["zzzz".to_string()];
        assert_eq!(cosine_similarity(&source, &target, Analyzer::Word { n: 1 }), 0.0);
    }

    #[test]
    fn char_ngrams_tolerate_small_typos() {
        let source = vec!["Ramone".to_string()];
        let target = vec!["Ramonne".to_string()];
        let score = cosine_similarity(&source, &target, Analyzer::Char { n: 2 });
        assert!(score > 0.7, "expected high char-ngram similarity, got {score}");
    }

    #[test]
    fn strips_accents_before_comparing() {
        let source = vec!["Müller".to_string()];
        let target = vec!["Muller".to_string()];
        assert_eq!(cosine_similarity(&source, &target, Analyzer::Char { n: 2 }), 1.0);
    }
}
