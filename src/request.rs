use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{error::Result, headers::HeaderSet};

/// Shared http side of the probers: one client and the run's header set.
/// Redirects follow reqwest's default policy (up to 10 hops).
pub struct Prober {
    client: Client,
    headers: HeaderSet,
}

impl Prober {
    pub fn new(headers: HeaderSet, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, headers })
    }

    /// GET `url` and read the whole body whatever the status
    pub async fn fetch(&self, url: &Url) -> std::result::Result<Vec<u8>, reqwest::Error> {
        let response = self
            .client
            .get(url.clone())
            .headers(self.headers.header_map().clone())
            .send()
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn fetch_text(&self, url: &Url) -> std::result::Result<String, reqwest::Error> {
        let body = self.fetch(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
