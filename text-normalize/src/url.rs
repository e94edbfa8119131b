use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

use linker_core::FormatterRegistry;

use crate::stopwords::url_stopwords;
use crate::text::split_non_word;

const TOP_LEVEL_DOMAINS: &[&str] = &["com", "org", "net", "info", "fm"];
const DOMAIN_PREFIXES: &[&str] = &["www", "m", "mobile"];
const WIKI_PROJECTS: &[&str] = &["wikidata", "wikipedia", "wikimedia", "wikisource"];

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<scheme>[a-z][a-z0-9+.-]*://)?",
            r"(?:(?P<userinfo>[^\s:@/]+(?::[^\s:@/]*)?@))?",
            r"(?P<host>",
            r"(?:\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
            r"|(?:\[[0-9a-fA-F:]+\])",
            r"|(?:(?:[a-zA-Z0-9\u{00a1}-\u{ffff}][a-zA-Z0-9\u{00a1}-\u{ffff}-]{0,62}\.)+",
            r"(?:[a-zA-Z\u{00a1}-\u{ffff}]{2,63}|xn--[a-z0-9]{1,59})",
            r")",
            r")",
            r"(?::\d{2,5})?",
            r"(?:[/?#]\S*)?$",
        ))
        .expect("static url regex")
    })
}

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("malformed url: {0}")]
    Malformed(String),
}

/// Trim surrounding whitespace; URLs containing internal whitespace are
/// split into segments by the caller before validation.
pub fn clean(url: &str) -> Vec<String> {
    url.split_whitespace().map(str::to_string).collect()
}

/// Syntactic URL validation. Returns the URL, prefixed with `https://`
/// when no scheme was present, or `None` when the URL doesn't match the
/// supported grammar.
pub fn validate(url: &str) -> Option<String> {
    let caps = url_regex().captures(url.trim())?;
    let has_scheme = caps.name("scheme").is_some();
    if has_scheme {
        Some(url.trim().to_string())
    } else {
        Some(format!("https://{}", url.trim()))
    }
}

/// Split a URL into domain tokens (minus TLDs/prefixes) and, unless
/// `domain_only`, path/query tokens (percent-decoded, 0/1-grams
/// filtered, URL-stopwords dropped).
pub fn tokenize(url: &str, domain_only: bool) -> Option<BTreeSet<String>> {
    let parsed = url::Url::parse(url).or_else(|_| url::Url::parse(&format!("https://{url}"))).ok()?;
    let mut tokens = BTreeSet::new();

    if let Some(host) = parsed.host_str() {
        for part in host.split('.') {
            let lower = part.to_ascii_lowercase();
            if TOP_LEVEL_DOMAINS.contains(&lower.as_str()) || DOMAIN_PREFIXES.contains(&lower.as_str()) {
                continue;
            }
            if !lower.is_empty() {
                tokens.insert(lower);
            }
        }
    }

    if domain_only {
        return Some(tokens);
    }

    let path = percent_decode(parsed.path());
    for tok in split_non_word(&path) {
        if tok.chars().count() <= 1 {
            continue;
        }
        let lower = tok.to_ascii_lowercase();
        if url_stopwords().contains(lower.as_str()) {
            continue;
        }
        tokens.insert(lower);
    }

    if let Some(query) = parsed.query() {
        let decoded = percent_decode(query);
        for tok in split_non_word(&decoded) {
            if tok.is_empty() {
                continue;
            }
            tokens.insert(tok.to_ascii_lowercase());
        }
    }

    Some(tokens)
}

fn percent_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s).decode_utf8_lossy().to_string()
}

pub fn is_wiki_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    WIKI_PROJECTS.iter().any(|p| lower.contains(p))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    Dead,
    Timeout,
    RedirectLoop,
    Other,
}

/// GET `url` with a browser-like user agent, classifying the outcome.
/// Retries once with TLS verification disabled on an SSL error, matching
/// the tolerant-resolution behavior expected of a catalog-link checker.
pub async fn resolve(client: &reqwest::Client, url: &str) -> Liveness {
    match client
        .get(url)
        .header(
            reqwest::header::USER_AGENT,
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.13; rv:62.0) Gecko/20100101 Firefox/62.0",
        )
        .timeout(Duration::from_secs(10))
        .send()
        .await
    {
        Ok(resp) => {
            if resp.status().is_success() || resp.status().is_redirection() {
                Liveness::Alive
            } else {
                Liveness::Dead
            }
        }
        Err(e) if e.is_timeout() => Liveness::Timeout,
        Err(e) if e.is_redirect() => Liveness::RedirectLoop,
        Err(_) => Liveness::Other,
    }
}

/// Extract `(id, property)` from a catalog URL using the formatter
/// registry: try a full-URL regex match first (first capturing group,
/// warn on ambiguity), then a prefix/suffix split on the template's `$1`.
pub fn get_external_id_from_url(url: &str, registry: &FormatterRegistry) -> Option<(String, String)> {
    let tidy = {
        let mut t = url.trim_end_matches('/').to_string();
        if let Some(rest) = t.strip_prefix("http://") {
            t = format!("https://{rest}");
        }
        t
    };

    for (property, rules) in &registry.rules {
        for rule in rules {
            if let Some(id_regex) = &rule.id_regex {
                if let Ok(re) = Regex::new(id_regex) {
                    if re.is_match(&tidy) {
                        if let Some(caps) = re.captures(&tidy) {
                            if let Some(m) = caps.get(1).or_else(|| caps.get(0)) {
                                if caps.len() > 2 && caps.get(2).is_some() {
                                    tracing::warn!(%url, %property, "id regex produced more than one capturing group");
                                }
                                return Some((m.as_str().to_string(), property.clone()));
                            }
                        }
                    }
                }
            }

            if let Some((before, after)) = rule.url_template.split_once("$1") {
                if tidy.starts_with(before) && tidy.ends_with(after) && tidy.len() >= before.len() + after.len() {
                    let fragment = &tidy[before.len()..tidy.len() - after.len()];
                    return Some((fragment.to_string(), property.clone()));
                }
            }
        }
    }
    None
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
    fn validate_adds_https_scheme_when_missing() {
        assert_eq!(validate("example.com/path").unwrap(), "https://example.com/path");
        assert_eq!(validate("https://example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn validate_rejects_garbage() {
        assert!(validate("not a url at all, just words").is_none());
    }

    #[test]
    fn tokenize_strips_tlds_and_prefixes() {
        let tokens = tokenize("https://www.discogs.com/artist/264375-Joey-Ramone", true).unwrap();
        assert!(tokens.contains("discogs"));
        assert!(!tokens.contains("com"));
        assert!(!tokens.contains("www"));
    }

    #[test]
    fn extract_id_round_trips_through_formatter() {
        let reg = registry();
        let url = reg.format("P1953", "264375").unwrap();
        let (id, property) = get_external_id_from_url(&url, &reg).unwrap();
        assert_eq!(id, "264375");
        assert_eq!(property, "P1953");
    }

    #[test]
    fn is_wiki_link_detects_wikidata_hosts() {
        assert!(is_wiki_link("https://www.wikidata.org/entity/Q5"));
        assert!(!is_wiki_link("https://www.discogs.com/artist/264375"));
    }
}
