use crate::domains::{parse_domains, Domain};
use crate::error::Error;
use crate::waybackmachine::{sort_unique, Crawler, STAGING_FILE};

fn domains(input: &str) -> Vec<Domain> {
    parse_domains(input).unwrap()
}

/// stands in for waybackurls: one url per domain argument
fn fake_crawler(script: &str) -> Crawler {
    Crawler::new(
        "sh",
        vec!["-c".to_string(), script.to_string(), "sh".to_string()],
    )
}

#[test]
fn domains_are_trimmed_and_blanks_dropped() {
    let parsed = domains(" a.com, b.com ,, ");
    let parsed: Vec<String> = parsed.iter().map(Domain::to_string).collect();
    assert_eq!(parsed, vec!["a.com", "b.com"]);
}

#[test]
fn no_domains_is_an_error() {
    assert!(matches!(parse_domains(" , "), Err(Error::NoDomains)));
    assert!(matches!(parse_domains(""), Err(Error::NoDomains)));
}

#[test]
fn sort_unique_sorts_and_drops_exact_repeats() {
    let urls = vec!["b".to_string(), "a".to_string(), "b".to_string()];
    assert_eq!(sort_unique(urls), vec!["a", "b"]);
}

#[tokio::test]
async fn crawl_reads_stdout_lines_and_removes_the_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let crawler = fake_crawler(r#"for d in "$@"; do echo "https://$d/?id=1"; echo; done"#);

    let urls = crawler
        .crawl(&domains("a.com,b.com"), dir.path())
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://a.com/?id=1", "https://b.com/?id=1"]);
    assert!(!dir.path().join(STAGING_FILE).exists());
}

#[tokio::test]
async fn non_zero_exit_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let crawler = fake_crawler("echo rate limited >&2; exit 3");

    match crawler.crawl(&domains("a.com"), dir.path()).await {
        Err(Error::CrawlerFailed { status, stderr, .. }) => {
            assert_eq!(status, "status 3");
            assert_eq!(stderr, "rate limited");
        }
        other => panic!("expected CrawlerFailed, got {:?}", other.map(|u| u.len())),
    }
    assert!(!dir.path().join(STAGING_FILE).exists());
}

#[tokio::test]
async fn missing_binary_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let crawler = Crawler::new("paramhuntrs-no-such-crawler", vec![]);

    assert!(!crawler.is_installed());
    assert!(matches!(
        crawler.crawl(&domains("a.com"), dir.path()).await,
        Err(Error::CrawlerMissing { .. })
    ));
    assert!(!dir.path().join(STAGING_FILE).exists());
}
