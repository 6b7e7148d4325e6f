//! Run settings: a JSON file (all keys optional) with command-line overrides on top.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// where staging and result files go, created on demand
    pub results_dir: PathBuf,
    /// archive crawler binary, domains are appended after `crawler_args`
    pub crawler: String,
    pub crawler_args: Vec<String>,
    /// per request timeout
    pub timeout_secs: u64,
    /// word appended to every probed parameter value
    pub marker: String,
    /// special characters appended right after the marker word
    pub marker_symbols: String,
    /// static headers sent with every probe, prompting is skipped when set
    pub headers: BTreeMap<String, String>,
    pub random_user_agent: bool,
    /// answer yes to the save prompts
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            crawler: "waybackurls".to_string(),
            crawler_args: vec![],
            timeout_secs: 10,
            marker: "RENGOKU".to_string(),
            marker_symbols: "<>".to_string(),
            headers: BTreeMap::new(),
            random_user_agent: false,
            assume_yes: false,
        }
    }
}

impl Config {
    /// reads `path` if given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
