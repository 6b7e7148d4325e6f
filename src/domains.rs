use std::fmt;

use crate::{
    error::{Error, Result},
    operator::Operator,
};

/// bare hostname, no scheme or path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain(String);

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// "a.com, b.com" -> [a.com, b.com]. blanks are dropped, an empty result is an error
pub fn parse_domains(input: &str) -> Result<Vec<Domain>> {
    let domains: Vec<Domain> = input
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| Domain(d.to_string()))
        .collect();

    if domains.is_empty() {
        return Err(Error::NoDomains);
    }
    Ok(domains)
}

pub async fn prompt_domains<O: Operator>(operator: &mut O) -> Result<Vec<Domain>> {
    let input = operator
        .ask("Enter domain names (comma-separated, e.g., domain1.com, domain2.com): ")
        .await?
        .unwrap_or_default();
    parse_domains(&input)
}
