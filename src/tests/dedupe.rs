use url::Url;

use crate::pipeline::probe_targets;
use crate::url_util::{dedupe_urls, param_names, with_param_suffix, UrlSignature};

fn sample() -> Vec<&'static str> {
    vec![
        "http://a.com/x?id=1",
        "http://a.com/x?id=2",
        "http://a.com/x?name=1",
        "https://a.com/x?id=1",
        "http://b.com/x?id=1",
        "not a url",
        "",
        "http://a.com/x?b=1&a=2",
        "http://a.com/x?a=3&b=4",
        "http://a.com/y",
        "http://a.com/y",
    ]
}

#[test]
fn values_do_not_matter() {
    let kept = dedupe_urls(&["http://a.com/x?id=1", "http://a.com/x?id=2"]);
    assert_eq!(kept, vec!["http://a.com/x?id=1"]);
}

#[test]
fn names_do_matter() {
    let kept = dedupe_urls(&["http://a.com/x?id=1", "http://a.com/x?name=1"]);
    assert_eq!(kept.len(), 2);
}

#[test]
fn name_order_and_repeats_are_ignored() {
    let kept = dedupe_urls(&[
        "http://a.com/x?a=1&b=2",
        "http://a.com/x?b=3&a=4",
        "http://a.com/x?a=5&b=6&a=7",
    ]);
    assert_eq!(kept, vec!["http://a.com/x?a=1&b=2"]);
}

#[test]
fn scheme_host_and_path_are_part_of_the_signature() {
    let kept = dedupe_urls(&[
        "http://a.com/x?id=1",
        "https://a.com/x?id=1",
        "http://b.com/x?id=1",
        "http://a.com:8080/x?id=1",
        "http://a.com/z?id=1",
    ]);
    assert_eq!(kept.len(), 5);
}

#[test]
fn urls_without_query_still_collide() {
    let kept = dedupe_urls(&["http://a.com/y", "http://a.com/y", "http://a.com/z"]);
    assert_eq!(kept, vec!["http://a.com/y", "http://a.com/z"]);
}

#[test]
fn malformed_lines_are_skipped() {
    let kept = dedupe_urls(&["not a url", "", "   ", "http://a.com/x?id=1"]);
    assert_eq!(kept, vec!["http://a.com/x?id=1"]);
}

#[test]
fn keeps_first_occurrence_order() {
    let kept = dedupe_urls(&sample());
    assert_eq!(
        kept,
        vec![
            "http://a.com/x?id=1",
            "http://a.com/x?name=1",
            "https://a.com/x?id=1",
            "http://b.com/x?id=1",
            "http://a.com/x?b=1&a=2",
            "http://a.com/y",
        ]
    );
}

#[test]
fn output_is_a_subset_of_the_input() {
    let input = sample();
    let kept = dedupe_urls(&input);
    assert!(kept.len() <= input.len());
    for url in &kept {
        assert!(input.contains(&url.as_str()), "{url} was not in the input");
    }
}

#[test]
fn idempotent_and_a_fixed_point() {
    let input = sample();
    let once = dedupe_urls(&input);
    assert_eq!(dedupe_urls(&input), once);
    assert_eq!(dedupe_urls(&once), once);
}

#[test]
fn signature_ignores_values() {
    let a = Url::parse("http://a.com/x?b=1&a=2").unwrap();
    let b = Url::parse("http://a.com/x?a=9&b=8").unwrap();
    let c = Url::parse("http://a.com/x?a=9").unwrap();
    assert_eq!(UrlSignature::of(&a), UrlSignature::of(&b));
    assert_ne!(UrlSignature::of(&a), UrlSignature::of(&c));
}

#[test]
fn param_names_are_distinct_in_order() {
    let url = Url::parse("http://a.com/?q=1&page=2&q=3&flag").unwrap();
    assert_eq!(param_names(&url), vec!["q", "page", "flag"]);
}

#[test]
fn suffix_only_touches_one_parameter() {
    let url = Url::parse("http://a.com/x?id=1&q=b").unwrap();
    let modified = with_param_suffix(&url, "id", "'");

    let pairs: Vec<(String, String)> = modified.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("id".to_string(), "1'".to_string()),
            ("q".to_string(), "b".to_string())
        ]
    );
    assert_eq!(modified.path(), "/x");
    assert_eq!(modified.host_str(), Some("a.com"));
}

#[test]
fn probe_targets_need_parameters() {
    let targets = probe_targets(&[
        "http://a.com/y",
        "http://a.com/x?id=1",
        "http://a.com/x?id=2",
        "garbage",
    ]);
    let targets: Vec<&str> = targets.iter().map(|u| u.as_str()).collect();
    assert_eq!(targets, vec!["http://a.com/x?id=1"]);
}
