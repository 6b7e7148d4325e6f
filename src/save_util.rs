//! Result files. Every save overwrites, nothing is appended.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    error::Result,
    file_util::write_to_file,
    findings::{Findings, Outcome},
    pipeline::Heuristics,
};

pub const CRAWL_FILE: &str = "url.txt";
pub const SUMMARY_FILE: &str = "summary.json";
const PARTIAL_PREFIX: &str = "partial_";

const SQLI_NOTE: &str = "pattern A/B are content-length heuristics: a response size that changes for one quote character but not the other. treat them as leads to verify by hand, not as confirmed injections";

/// file name for each output list
pub fn file_name(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::XssReflected => Some("reflectedUrl.txt"),
        Outcome::XssSymbolsReflected => Some("reflectedSymbolUrl.txt"),
        Outcome::XssInScript => Some("reflectedScriptUrl.txt"),
        Outcome::SqliPatternA => Some("pattern_a_sqli.txt"),
        Outcome::SqliPatternB => Some("pattern_b_sqli.txt"),
        Outcome::NotVulnerable => None,
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    partial: bool,
    urls_probed: usize,
    findings: &'a Findings,
    #[serde(skip_serializing_if = "Option::is_none")]
    sqli_note: Option<&'static str>,
}

pub struct ResultSink {
    dir: PathBuf,
}

impl ResultSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// crawl-only output
    pub fn save_crawl(&self, urls: &[String]) -> Result<PathBuf> {
        let path = self.dir.join(CRAWL_FILE);
        write_to_file(urls, &path)?;
        Ok(path)
    }

    /// writes the lists of every heuristic that ran, empty ones included
    pub fn save(&self, findings: &Findings, heuristics: Heuristics) -> Result<Vec<PathBuf>> {
        self.write_all(findings, heuristics, "")
    }

    /// same files, `partial_` prefixed
    pub fn save_partial(&self, findings: &Findings, heuristics: Heuristics) -> Result<Vec<PathBuf>> {
        self.write_all(findings, heuristics, PARTIAL_PREFIX)
    }

    fn write_all(
        &self,
        findings: &Findings,
        heuristics: Heuristics,
        prefix: &str,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)?;
        let mut written = vec![];

        for outcome in heuristics.outcomes() {
            let Some(name) = file_name(outcome) else {
                continue;
            };
            let path = self.dir.join(format!("{prefix}{name}"));
            write_to_file(findings.list(outcome), &path)?;
            written.push(path);
        }

        let summary = Summary {
            partial: !prefix.is_empty(),
            urls_probed: findings.probed,
            findings,
            sqli_note: heuristics.sqli.then_some(SQLI_NOTE),
        };
        let path = self.dir.join(format!("{prefix}{SUMMARY_FILE}"));
        fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        written.push(path);

        Ok(written)
    }
}
