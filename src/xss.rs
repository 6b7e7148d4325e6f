//! Reflected parameter probing. Each parameter gets the marker appended on its
//! own and the response is searched for the marker word, the word followed by
//! its raw symbols, and the word inside `<script>` blocks.

use regex::Regex;
use url::Url;

use crate::{
    error::{Error, Result},
    findings::{Findings, Outcome},
    request::Prober,
    url_util::{param_names, with_param_suffix},
};

const SCRIPT_BLOCK: &str = r"(?is)<script\b[^>]*>(.*?)</script\s*>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub word: bool,
    pub symbols: bool,
    pub script: bool,
}

impl Reflection {
    pub fn any(&self) -> bool {
        self.word || self.symbols || self.script
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        let mut outcomes = vec![];
        if self.word {
            outcomes.push(Outcome::XssReflected);
        }
        if self.symbols {
            outcomes.push(Outcome::XssSymbolsReflected);
        }
        if self.script {
            outcomes.push(Outcome::XssInScript);
        }
        outcomes
    }

    pub fn labels(&self) -> Vec<&'static str> {
        [(self.word, "word"), (self.symbols, "symbols"), (self.script, "script")]
            .into_iter()
            .filter_map(|(hit, label)| hit.then_some(label))
            .collect()
    }
}

pub struct XssProbe {
    word: String,
    symbols: String,
    script_block: Regex,
}

impl XssProbe {
    pub fn new(word: &str, symbols: &str) -> Result<Self> {
        if word.is_empty() {
            return Err(Error::EmptyMarker);
        }
        Ok(Self {
            word: word.to_string(),
            symbols: symbols.to_string(),
            script_block: Regex::new(SCRIPT_BLOCK)?,
        })
    }

    /// what gets appended to a parameter value
    pub fn marker(&self) -> String {
        format!("{}{}", self.word, self.symbols)
    }

    /// the three checks are independent of each other
    pub fn classify(&self, body: &str) -> Reflection {
        let symbols = !self.symbols.is_empty() && body.contains(&self.marker());
        let script = self
            .script_block
            .captures_iter(body)
            .filter_map(|cap| cap.get(1))
            .any(|content| content.as_str().contains(&self.word));

        Reflection {
            word: body.contains(&self.word),
            symbols,
            script,
        }
    }

    /// Probes every parameter of `url` one at a time. A failed request is
    /// reported and counts as not reflected.
    pub async fn probe_url(&self, prober: &Prober, url: &Url) -> Vec<(String, Reflection)> {
        let marker = self.marker();
        let mut results = vec![];

        for param in param_names(url) {
            let modified = with_param_suffix(url, &param, &marker);
            let reflection = match prober.fetch_text(&modified).await {
                Ok(body) => self.classify(&body),
                Err(e) => {
                    warn!("Error requesting {modified}: {e}");
                    Reflection::default()
                }
            };
            results.push((param, reflection));
        }
        results
    }

    /// Records reflections of `url` into `findings` under the unmodified url,
    /// i.e. with the marker stripped back out.
    pub async fn probe(&self, prober: &Prober, url: &Url, findings: &mut Findings) {
        for (param, reflection) in self.probe_url(prober, url).await {
            if !reflection.any() {
                continue;
            }
            for outcome in reflection.outcomes() {
                findings.record(url.as_str(), outcome);
            }
            good!("Reflected [{}] {param} in {url}", reflection.labels().join(", "));
        }
    }
}
