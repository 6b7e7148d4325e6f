use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::{
    error::{Error, Result},
    operator::Operator,
    user_agents::get_user_agent,
};

/// Headers sent unchanged with every probe of a run.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    map: HeaderMap,
}

impl HeaderSet {
    pub fn insert(&mut self, name: &str, value: &str) -> Result<()> {
        let bad = || Error::MalformedHeader(format!("{name}:{value}"));
        let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| bad())?;
        let value = HeaderValue::from_str(value.trim()).map_err(|_| bad())?;
        self.map.insert(name, value);
        Ok(())
    }

    /// a `name:value` line, split on the first colon
    pub fn insert_line(&mut self, line: &str) -> Result<()> {
        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => self.insert(name, value),
            _ => Err(Error::MalformedHeader(line.to_string())),
        }
    }

    /// falls back to a lone browser user agent when nothing was supplied
    pub fn or_default_agent(mut self, random: bool) -> Self {
        if self.map.is_empty() {
            self.map
                .insert(USER_AGENT, HeaderValue::from_static(get_user_agent(random)));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn header_map(&self) -> &HeaderMap {
        &self.map
    }
}

/// reads `name:value` lines until a blank line, bad lines are re-prompted
pub async fn prompt_headers<O: Operator>(operator: &mut O) -> Result<HeaderSet> {
    info!("Enter Cookie/Authorization headers (name:value), one per line. Press Enter to finish/skip:");
    let mut headers = HeaderSet::default();

    while let Some(line) = operator.ask("header> ").await? {
        if line.is_empty() {
            break;
        }
        if let Err(e) = headers.insert_line(&line) {
            warn!("{e}");
        }
    }

    if headers.is_empty() {
        info!("No headers set, using a default user agent");
    } else {
        good!("{} header(s) set", headers.len());
    }
    Ok(headers)
}
