use std::collections::HashSet;
use std::sync::OnceLock;

macro_rules! word_set {
    ($name:ident, $path:expr) => {
        pub fn $name() -> &'static HashSet<&'static str> {
            static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
            SET.get_or_init(|| include_str!($path).lines().filter(|l| !l.is_empty()).collect())
        }
    };
}

word_set!(stopwords_eng, "resources/stopwords_eng.txt");
word_set!(name_stopwords, "resources/name_stopwords.txt");
word_set!(url_stopwords, "resources/urls_stop_words.txt");
word_set!(band_low_score_words, "resources/band_low_score_words.txt");
