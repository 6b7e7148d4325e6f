//! Archive crawler adapter. The crawling itself is done by an external tool
//! (waybackurls by default) that takes domains as arguments and prints one
//! historical URL per line.

use std::path::Path;

use crate::{
    cmd_handlers::{self, CmdInfo},
    config::Config,
    domains::Domain,
    error::{Error, Result},
    file_util::StagingFile,
};

pub const STAGING_FILE: &str = "domains.txt";

pub struct Crawler {
    program: String,
    args: Vec<String>,
}

impl Crawler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.crawler.clone(), config.crawler_args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn is_installed(&self) -> bool {
        Path::new(&self.program).is_file() || cmd_handlers::which(&self.program)
    }

    /// Stages `domains` under `staging_dir`, hands them to the crawler and
    /// returns its stdout lines. The staging file is gone once this returns,
    /// or once the future is dropped.
    pub async fn crawl(&self, domains: &[Domain], staging_dir: &Path) -> Result<Vec<String>> {
        let staging = StagingFile::create(staging_dir.join(STAGING_FILE), domains)?;
        info!(
            "Domains saved to {}, running {}...",
            staging.path().display(),
            self.program
        );

        let mut args = self.args.clone();
        args.extend(staging.read()?);

        let output = cmd_handlers::run_cmd(&self.program, &args)
            .await
            .map_err(|source| Error::CrawlerMissing {
                program: self.program.clone(),
                source,
            })?;
        drop(staging);

        self.lines(output)
    }

    fn lines(&self, output: CmdInfo) -> Result<Vec<String>> {
        if !output.success() {
            return Err(Error::CrawlerFailed {
                program: self.program.clone(),
                status: output.describe_status(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

/// sorted, exact duplicates removed
pub fn sort_unique(mut urls: Vec<String>) -> Vec<String> {
    urls.sort();
    urls.dedup();
    urls
}
