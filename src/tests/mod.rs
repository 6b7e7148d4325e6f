/*
 * Anything that needs http talks to a local wiremock server, nothing leaves the machine
 */
use std::time::Duration;

use wiremock::{Request, Respond, ResponseTemplate};

use crate::{headers::HeaderSet, request::Prober};

mod crawler;
mod dedupe;
mod sqli;

/// nothing listens on port 1, connections are refused straight away
const DEAD_HOST: &str = "http://127.0.0.1:1";

fn prober() -> Prober {
    prober_with(HeaderSet::default().or_default_agent(false))
}

fn prober_with(headers: HeaderSet) -> Prober {
    Prober::new(headers, Duration::from_secs(5)).unwrap()
}

/// echoes the decoded values of the given parameter (all of them when `None`)
struct EchoQuery(Option<&'static str>);

impl Respond for EchoQuery {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let values: Vec<String> = request
            .url
            .query_pairs()
            .filter(|(k, _)| self.0.map_or(true, |name| k == name))
            .map(|(_, v)| v.into_owned())
            .collect();
        ResponseTemplate::new(200).set_body_string(format!(
            "<html><body><p>results for {}</p></body></html>",
            values.join(" ")
        ))
    }
}
