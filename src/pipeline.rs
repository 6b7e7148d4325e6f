//! One flow for every mode: collect urls, dedupe them structurally, run the
//! selected heuristics, save. An interrupt while crawling or probing stops the
//! work and offers to keep whatever was found so far.

use std::future::Future;
use std::path::{Path, PathBuf};

use url::Url;

use crate::{
    config::Config,
    domains::{prompt_domains, Domain},
    error::{Error, Result},
    file_util::{file_exists, read_from_file},
    findings::{Findings, Outcome},
    headers::{prompt_headers, HeaderSet},
    operator::Operator,
    request::Prober,
    save_util::ResultSink,
    sqli,
    url_util::{dedupe_urls, param_names, parse_url},
    waybackmachine::{sort_unique, Crawler},
    xss::XssProbe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Heuristics {
    pub xss: bool,
    pub sqli: bool,
}

impl Heuristics {
    pub fn outcomes(&self) -> Vec<Outcome> {
        let mut outcomes = vec![];
        if self.xss {
            outcomes.extend([
                Outcome::XssReflected,
                Outcome::XssSymbolsReflected,
                Outcome::XssInScript,
            ]);
        }
        if self.sqli {
            outcomes.extend([Outcome::SqliPatternA, Outcome::SqliPatternB]);
        }
        outcomes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Crawl,
    Xss,
    Sqli,
    Scan,
}

impl Mode {
    /// `None` for crawl-only
    pub fn heuristics(self) -> Option<Heuristics> {
        match self {
            Mode::Crawl => None,
            Mode::Xss => Some(Heuristics { xss: true, sqli: false }),
            Mode::Sqli => Some(Heuristics { xss: false, sqli: true }),
            Mode::Scan => Some(Heuristics { xss: true, sqli: true }),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Crawl => "Crawl Wayback URLs",
            Mode::Xss => "Find XSS Vulnerabilities",
            Mode::Sqli => "Find SQL Injection Vulnerabilities",
            Mode::Scan => "Run both heuristics",
        }
    }
}

/// what the operator settled before the run, anything missing is prompted for
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub domains: Option<Vec<Domain>>,
    pub url_file: Option<PathBuf>,
    pub headers: Option<HeaderSet>,
}

#[derive(Debug, Clone)]
pub enum UrlSource {
    File(PathBuf),
    Domains(Vec<Domain>),
}

pub struct Pipeline {
    prober: Prober,
    xss: Option<XssProbe>,
    sqli: bool,
}

impl Pipeline {
    pub fn new(prober: Prober, config: &Config, heuristics: Heuristics) -> Result<Self> {
        let xss = if heuristics.xss {
            Some(XssProbe::new(&config.marker, &config.marker_symbols)?)
        } else {
            None
        };
        Ok(Self {
            prober,
            xss,
            sqli: heuristics.sqli,
        })
    }

    pub fn heuristics(&self) -> Heuristics {
        Heuristics {
            xss: self.xss.is_some(),
            sqli: self.sqli,
        }
    }

    /// probes `urls` in order, one request at a time
    pub async fn run(&self, urls: &[Url], findings: &mut Findings) {
        let total = urls.len();
        for (idx, url) in urls.iter().enumerate() {
            let n = idx + 1;
            info!(
                "Processing URL {n}/{total} - Progress: {:.2}%",
                n as f64 / total as f64 * 100.0
            );

            if let Some(xss) = &self.xss {
                xss.probe(&self.prober, url, findings).await;
            }
            if self.sqli {
                sqli::probe(&self.prober, url, findings).await;
            }
            findings.probed += 1;
        }
    }
}

/// structural dedupe, then only urls that have something to inject into
pub fn probe_targets<S: AsRef<str>>(raw: &[S]) -> Vec<Url> {
    dedupe_urls(raw)
        .iter()
        .filter_map(|u| parse_url(u))
        .filter(|u| !param_names(u).is_empty())
        .collect()
}

fn url_file(path: &Path) -> Result<UrlSource> {
    if !file_exists(path) {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    Ok(UrlSource::File(path.to_path_buf()))
}

pub async fn resolve_source<O: Operator>(opts: &RunOptions, operator: &mut O) -> Result<UrlSource> {
    if let Some(path) = &opts.url_file {
        return url_file(path);
    }
    if let Some(domains) = &opts.domains {
        return Ok(UrlSource::Domains(domains.clone()));
    }

    if operator
        .confirm("Do you want to use your own custom file for URLs?")
        .await?
    {
        let path = operator
            .ask("Enter the path to your custom file: ")
            .await?
            .unwrap_or_default();
        return url_file(Path::new(&path));
    }
    Ok(UrlSource::Domains(prompt_domains(operator).await?))
}

async fn resolve_domains<O: Operator>(opts: &RunOptions, operator: &mut O) -> Result<Vec<Domain>> {
    match &opts.domains {
        Some(domains) => Ok(domains.clone()),
        None => prompt_domains(operator).await,
    }
}

async fn gather_and_probe(
    pipeline: &Pipeline,
    crawler: &Crawler,
    source: &UrlSource,
    staging_dir: &Path,
    findings: &mut Findings,
) -> Result<()> {
    let raw = match source {
        UrlSource::File(path) => read_from_file(path)?,
        UrlSource::Domains(domains) => sort_unique(crawler.crawl(domains, staging_dir).await?),
    };

    let targets = probe_targets(&raw);
    info!(
        "{} urls collected, {} unique with parameters to process",
        raw.len(),
        targets.len()
    );
    pipeline.run(&targets, findings).await;
    Ok(())
}

/// Runs `mode` until it finishes or ctrl-c is pressed. An interrupted run
/// returns `Error::Interrupted` once the partial save was offered, the session
/// is over at that point.
pub async fn run_mode<O: Operator>(
    mode: Mode,
    config: &Config,
    opts: &RunOptions,
    operator: &mut O,
) -> Result<()> {
    run_mode_until(mode, config, opts, operator, tokio::signal::ctrl_c()).await
}

/// `run_mode` stopped by `interrupt` resolving instead of ctrl-c
pub async fn run_mode_until<O, I>(
    mode: Mode,
    config: &Config,
    opts: &RunOptions,
    operator: &mut O,
    interrupt: I,
) -> Result<()>
where
    O: Operator,
    I: Future,
{
    match mode.heuristics() {
        None => crawl_only(config, opts, operator, interrupt).await,
        Some(heuristics) => probe_mode(heuristics, config, opts, operator, interrupt).await,
    }
}

async fn crawl_only<O: Operator, I: Future>(
    config: &Config,
    opts: &RunOptions,
    operator: &mut O,
    interrupt: I,
) -> Result<()> {
    let domains = resolve_domains(opts, operator).await?;
    let crawler = Crawler::from_config(config);
    let sink = ResultSink::new(&config.results_dir);

    let urls = tokio::select! {
        urls = crawler.crawl(&domains, sink.dir()) => urls?,
        _ = interrupt => {
            warn!("Process interrupted by user! Nothing was crawled, nothing to save");
            return Err(Error::Interrupted);
        }
    };

    let urls = sort_unique(urls);
    let path = sink.save_crawl(&urls)?;
    good!("{} urls, check {} for results", urls.len(), path.display());
    Ok(())
}

async fn probe_mode<O: Operator, I: Future>(
    heuristics: Heuristics,
    config: &Config,
    opts: &RunOptions,
    operator: &mut O,
    interrupt: I,
) -> Result<()> {
    let headers = match &opts.headers {
        Some(headers) => headers.clone(),
        None => prompt_headers(operator).await?,
    }
    .or_default_agent(config.random_user_agent);

    let source = resolve_source(opts, operator).await?;
    info!("{} header(s) sent with every request", headers.len());
    if let Some(agent) = headers.get("user-agent") {
        info!("User-Agent: {agent}");
    }

    let pipeline = Pipeline::new(Prober::new(headers, config.timeout())?, config, heuristics)?;
    let heuristics = pipeline.heuristics();
    let crawler = Crawler::from_config(config);
    let sink = ResultSink::new(&config.results_dir);

    let mut findings = Findings::default();
    let completed = tokio::select! {
        done = gather_and_probe(&pipeline, &crawler, &source, sink.dir(), &mut findings) => {
            done?;
            true
        }
        _ = interrupt => false,
    };

    if !completed {
        offer_partial_save(config, operator, &sink, &findings, heuristics).await?;
        return Err(Error::Interrupted);
    }
    report(&findings, heuristics);

    if findings.probed == 0 {
        warn!("Nothing was probed, no results saved");
        return Ok(());
    }
    if config.assume_yes || operator.confirm("Do you want to save the results?").await? {
        let written = sink.save(&findings, heuristics)?;
        good!("Results saved to {}", sink.dir().display());
        for path in written {
            info!("  {}", path.display());
        }
    } else {
        warn!("No results saved.");
    }
    Ok(())
}

fn report(findings: &Findings, heuristics: Heuristics) {
    info!("{} urls probed", findings.probed);
    for outcome in heuristics.outcomes() {
        let urls = findings.list(outcome);
        info!("{outcome:?}: {}", urls.len());
        for url in urls {
            println!("    {url}");
        }
    }
}

/// Whatever was found before the interrupt is written with a `partial_` prefix
/// if the operator agrees. Declining writes nothing.
pub async fn offer_partial_save<O: Operator>(
    config: &Config,
    operator: &mut O,
    sink: &ResultSink,
    findings: &Findings,
    heuristics: Heuristics,
) -> Result<()> {
    warn!("Process interrupted by user!");
    if findings.is_empty() {
        info!("No findings accumulated, nothing to save");
        return Ok(());
    }

    if config.assume_yes
        || operator
            .confirm("Do you want to save partially analyzed results?")
            .await?
    {
        sink.save_partial(findings, heuristics)?;
        good!("Partial results saved to {}", sink.dir().display());
    } else {
        warn!("No results saved.");
    }
    Ok(())
}
