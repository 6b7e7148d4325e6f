use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use super::{prober, prober_with, DEAD_HOST};
use crate::findings::Findings;
use crate::headers::HeaderSet;
use crate::sqli::{classify, probe, probe_url, Verdict};

/// longer body when the `id` value ends with one of the given quotes
struct QuoteSensitive(&'static [char]);

impl Respond for QuoteSensitive {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        let body = if id.ends_with(self.0) {
            "You have an error in your SQL syntax near ''"
        } else {
            "item found"
        };
        ResponseTemplate::new(200).set_body_string(body)
    }
}

async fn server_with(responder: QuoteSensitive) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(responder)
        .mount(&server)
        .await;
    server
}

#[test]
fn classify_patterns() {
    assert_eq!(classify([Some(100), Some(100), Some(100)]), Verdict::NotVulnerable);
    assert_eq!(classify([Some(100), Some(150), Some(150)]), Verdict::PatternB);
    assert_eq!(classify([Some(100), Some(150), Some(100)]), Verdict::PatternA);
    assert_eq!(classify([Some(100), None, Some(100)]), Verdict::Incomplete);
}

#[test]
fn classify_other_shapes() {
    // only the double quote moves the length
    assert_eq!(classify([Some(100), Some(100), Some(150)]), Verdict::NotVulnerable);
    // all three differ
    assert_eq!(classify([Some(100), Some(120), Some(150)]), Verdict::NotVulnerable);
    // an empty body is still a known length
    assert_eq!(classify([Some(0), Some(10), Some(0)]), Verdict::PatternA);
    assert_eq!(classify([None, None, None]), Verdict::Incomplete);
}

#[tokio::test]
async fn single_quote_sensitive_is_pattern_a() {
    let server = server_with(QuoteSensitive(&['\''])).await;
    let url = Url::parse(&format!("{}/item?id=7&sort=asc", server.uri())).unwrap();

    let verdicts = probe_url(&prober(), &url).await;
    assert_eq!(
        verdicts,
        vec![
            ("id".to_string(), Verdict::PatternA),
            ("sort".to_string(), Verdict::NotVulnerable)
        ]
    );

    let mut findings = Findings::default();
    probe(&prober(), &url, &mut findings).await;
    assert_eq!(findings.sqli_pattern_a, vec![url.to_string()]);
    assert!(findings.sqli_pattern_b.is_empty());
}

#[tokio::test]
async fn both_quotes_sensitive_is_pattern_b() {
    let server = server_with(QuoteSensitive(&['\'', '"'])).await;
    let url = Url::parse(&format!("{}/item?id=7", server.uri())).unwrap();

    let mut findings = Findings::default();
    probe(&prober(), &url, &mut findings).await;
    assert_eq!(findings.sqli_pattern_b, vec![url.to_string()]);
    assert!(findings.sqli_pattern_a.is_empty());
}

#[tokio::test]
async fn sends_three_requests_with_the_header_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("same"))
        .expect(3)
        .mount(&server)
        .await;

    let mut headers = HeaderSet::default();
    headers.insert_line("Cookie: session=abc").unwrap();
    let url = Url::parse(&format!("{}/item?id=1", server.uri())).unwrap();

    let verdicts = probe_url(&prober_with(headers), &url).await;
    assert_eq!(verdicts, vec![("id".to_string(), Verdict::NotVulnerable)]);
    server.verify().await;
}

#[tokio::test]
async fn failed_requests_do_not_stop_the_run() {
    let server = server_with(QuoteSensitive(&['\''])).await;
    let dead = Url::parse(&format!("{DEAD_HOST}/item?id=1")).unwrap();
    let live = Url::parse(&format!("{}/item?id=2", server.uri())).unwrap();

    let prober = prober();
    assert_eq!(
        probe_url(&prober, &dead).await,
        vec![("id".to_string(), Verdict::Incomplete)]
    );

    let mut findings = Findings::default();
    probe(&prober, &dead, &mut findings).await;
    probe(&prober, &live, &mut findings).await;
    assert_eq!(findings.sqli_pattern_a, vec![live.to_string()]);
}
