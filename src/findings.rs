use std::collections::HashSet;

use serde::Serialize;

/// What a probe concluded about a url (or one of its parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NotVulnerable,
    XssReflected,
    XssSymbolsReflected,
    XssInScript,
    SqliPatternA,
    SqliPatternB,
}

/// Positive results of a run, each list in first-detected order without repeats.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Findings {
    pub reflected: Vec<String>,
    pub symbols_reflected: Vec<String>,
    pub script_reflected: Vec<String>,
    pub sqli_pattern_a: Vec<String>,
    pub sqli_pattern_b: Vec<String>,
    /// urls fully probed so far
    pub probed: usize,
    #[serde(skip)]
    seen: HashSet<(Outcome, String)>,
}

impl Findings {
    pub fn record(&mut self, url: &str, outcome: Outcome) {
        let list = match outcome {
            Outcome::NotVulnerable => return,
            Outcome::XssReflected => &mut self.reflected,
            Outcome::XssSymbolsReflected => &mut self.symbols_reflected,
            Outcome::XssInScript => &mut self.script_reflected,
            Outcome::SqliPatternA => &mut self.sqli_pattern_a,
            Outcome::SqliPatternB => &mut self.sqli_pattern_b,
        };
        if self.seen.insert((outcome, url.to_string())) {
            list.push(url.to_string());
        }
    }

    pub fn list(&self, outcome: Outcome) -> &[String] {
        let list = match outcome {
            Outcome::NotVulnerable => return &[],
            Outcome::XssReflected => &self.reflected,
            Outcome::XssSymbolsReflected => &self.symbols_reflected,
            Outcome::XssInScript => &self.script_reflected,
            Outcome::SqliPatternA => &self.sqli_pattern_a,
            Outcome::SqliPatternB => &self.sqli_pattern_b,
        };
        list
    }

    pub fn total(&self) -> usize {
        self.reflected.len()
            + self.symbols_reflected.len()
            + self.script_reflected.len()
            + self.sqli_pattern_a.len()
            + self.sqli_pattern_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
