//! Structural URL signatures and query rewriting.
//!
//! Two URLs are duplicates when they only differ in parameter values:
//! `http://a.com/x?id=1` and `http://a.com/x?id=2` share a signature,
//! `http://a.com/x?name=1` does not.

use std::collections::HashSet;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlSignature {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
    /// sorted, each name once
    params: Vec<String>,
}

impl UrlSignature {
    pub fn of(url: &Url) -> Self {
        let mut params = param_names(url);
        params.sort();

        Self {
            scheme: url.scheme().to_string(),
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port(),
            path: url.path().to_string(),
            params,
        }
    }
}

/// trims and parses a raw line, `None` (with a warning) when it is not an absolute URL
pub fn parse_url(raw: &str) -> Option<Url> {
    match Url::parse(raw.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("skipping malformed url {raw}: {e}");
            None
        }
    }
}

/// Keeps the first URL of every signature, in input order. Unparseable lines
/// are dropped.
pub fn dedupe_urls<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    let mut seen: HashSet<UrlSignature> = HashSet::new();
    let mut kept = vec![];

    for raw in urls {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            continue;
        }
        let Some(url) = parse_url(raw) else {
            continue;
        };
        if seen.insert(UrlSignature::of(&url)) {
            kept.push(raw.to_string());
        }
    }
    kept
}

/// distinct query parameter names in order of first appearance
pub fn param_names(url: &Url) -> Vec<String> {
    let mut names: Vec<String> = vec![];
    for (name, _) in url.query_pairs() {
        if !names.iter().any(|n| *n == name) {
            names.push(name.into_owned());
        }
    }
    names
}

/// copy of `url` with `suffix` appended to every value of `name`.
/// the whole query is re-serialized, so an empty suffix normalizes the encoding only
pub fn with_param_suffix(url: &Url, name: &str, suffix: &str) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .map(|(k, mut v)| {
            if k == name {
                v.push_str(suffix);
            }
            (k, v)
        })
        .collect();

    let mut modified = url.clone();
    modified.query_pairs_mut().clear().extend_pairs(pairs);
    modified
}
