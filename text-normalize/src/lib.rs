mod ascii_table;
mod stopwords;
mod text;
mod url;

pub use stopwords::{band_low_score_words, name_stopwords, stopwords_eng, url_stopwords};
pub use text::{normalize, tokenize, tokenize_with};
pub use url::{clean, get_external_id_from_url, is_wiki_link, resolve, tokenize as tokenize_url, validate, Liveness, UrlError};
