//! Content-length differential probing.
//!
//! Each parameter is requested three times: as is, with `'` appended and with
//! `"` appended. When exactly one of the quotes changes the body length the
//! parameter is flagged. This is a weak heuristic signal, never a proof of
//! injection.

use url::Url;

use crate::{
    findings::{Findings, Outcome},
    request::Prober,
    url_util::{param_names, with_param_suffix},
};

/// baseline, single quote, double quote
pub const VARIANTS: [(&str, &str); 3] = [
    ("", "Normal request"),
    ("'", "Single apostrophe"),
    ("\"", "Double apostrophe"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NotVulnerable,
    /// baseline and `"` agree, `'` differs. the stronger of the two signals
    PatternA,
    /// both quotes agree with each other but not with the baseline
    PatternB,
    /// at least one of the three requests failed
    Incomplete,
}

impl Verdict {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Verdict::PatternA => Some(Outcome::SqliPatternA),
            Verdict::PatternB => Some(Outcome::SqliPatternB),
            Verdict::NotVulnerable => Some(Outcome::NotVulnerable),
            Verdict::Incomplete => None,
        }
    }
}

/// body lengths in `VARIANTS` order, `None` where the request failed
pub fn classify(lengths: [Option<usize>; 3]) -> Verdict {
    let [Some(l0), Some(l1), Some(l2)] = lengths else {
        return Verdict::Incomplete;
    };

    if l0 != l1 && l1 == l2 {
        Verdict::PatternB
    } else if l0 == l2 && l0 != l1 {
        Verdict::PatternA
    } else {
        Verdict::NotVulnerable
    }
}

/// the three lengths for one parameter. all variants go through the same
/// query serializer so only the suffix differs between them
pub async fn measure(prober: &Prober, url: &Url, param: &str) -> [Option<usize>; 3] {
    let mut lengths = [None; 3];

    for (slot, (suffix, description)) in VARIANTS.iter().enumerate() {
        let modified = with_param_suffix(url, param, suffix);
        match prober.fetch(&modified).await {
            Ok(body) => lengths[slot] = Some(body.len()),
            Err(e) => warn!("{description}: Error = {e}"),
        }
    }
    lengths
}

pub async fn probe_url(prober: &Prober, url: &Url) -> Vec<(String, Verdict)> {
    let mut verdicts = vec![];
    for param in param_names(url) {
        let lengths = measure(prober, url, &param).await;
        verdicts.push((param, classify(lengths)));
    }
    verdicts
}

pub async fn probe(prober: &Prober, url: &Url, findings: &mut Findings) {
    for (param, verdict) in probe_url(prober, url).await {
        match verdict {
            Verdict::PatternA => {
                good!("Pattern [A] on {param} in {url}: stronger length-differential signal (heuristic, not a proof)");
            }
            Verdict::PatternB => {
                warn!("Pattern [B] on {param} in {url}: weaker length-differential signal (heuristic, not a proof)");
            }
            Verdict::NotVulnerable => info!("{param}: no matching pattern"),
            Verdict::Incomplete => warn!("{param}: incomplete responses, not classified"),
        }
        if let Some(outcome) = verdict.outcome() {
            findings.record(url.as_str(), outcome);
        }
    }
}
