use std::collections::BTreeSet;

use crate::ascii_table::translate;
use crate::stopwords::stopwords_eng;

/// Strip, ASCII-fold and lowercase `text`, mirroring the two-stage
/// `(ascii_only, ascii_lowercase)` pipeline.
///
/// ```
/// assert_eq!(text_normalize::normalize("  Müller  "), "muller");
/// assert_eq!(text_normalize::normalize("Жанна"), "zhanna");
/// ```
pub fn normalize(text: &str) -> String {
    let ascii_only = translate(text.trim());
    ascii_only.to_lowercase()
}

/// Normalize and tokenize, dropping 0/1-grams and stopwords from `extra`
/// in addition to the built-in English stopword list.
pub fn tokenize_with(text: &str, extra_stopwords: &[&std::collections::HashSet<&str>]) -> BTreeSet<String> {
    let lowercase = normalize(text);
    let mut tokens = BTreeSet::new();
    for raw in split_non_word(&lowercase) {
        if raw.chars().count() <= 1 {
            continue;
        }
        if stopwords_eng().contains(raw) {
            continue;
        }
        if extra_stopwords.iter().any(|set| set.contains(raw)) {
            continue;
        }
        tokens.insert(raw.to_string());
    }
    tokens
}

/// Normalize and tokenize using only the built-in English stopword list.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    tokenize_with(text, &[])
}

pub(crate) fn split_non_word(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_')).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("Café Müller");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn tokenize_drops_stopwords_and_short_tokens() {
        let tokens = tokenize("The Joey Ramone Band, a");
        assert!(!tokens.contains("the"));
        assert!(!tokens.contains("a"));
        assert!(tokens.contains("joey"));
        assert!(tokens.contains("ramone"));
        assert!(tokens.contains("band"));
    }

    #[test]
    fn tokenize_never_returns_empty_string_token() {
        let tokens = tokenize("!!! -- ...");
        assert!(!tokens.contains(""));
    }
}
