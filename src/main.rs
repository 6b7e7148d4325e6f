use {
    clap::{Parser, Subcommand},
    colored::Colorize,
    config::Config,
    domains::parse_domains,
    error::Error,
    headers::HeaderSet,
    operator::{Console, Operator},
    pipeline::{run_mode, Mode, RunOptions},
    std::path::PathBuf,
    waybackmachine::Crawler,
};

// should stay first, the macros are used everywhere below
mod logging;

mod cmd_handlers;
mod config;
mod domains;
mod error;
mod file_util;
mod findings;
mod headers;
mod operator;
mod pipeline;
mod request;
mod save_util;
mod sqli;
mod url_util;
mod user_agents;
mod waybackmachine;
mod xss;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(
    name = "paramhuntrs",
    version,
    about = "Crawl archived urls, dedupe them by structure and probe their parameters for XSS reflection and SQLi length differentials"
)]
struct Cli {
    /// json settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// crawler binary, defaults to waybackurls
    #[arg(long)]
    crawler: Option<String>,

    /// request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// header sent with every probe, name:value. repeatable
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// comma separated domains, skips the prompt
    #[arg(short, long)]
    domains: Option<String>,

    /// custom url file, skips crawling
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// answer yes to save prompts
    #[arg(short, long)]
    yes: bool,

    /// pick the fallback user agent at random
    #[arg(long)]
    random_agent: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// crawl archived urls into <results>/url.txt
    Crawl,
    /// reflected parameter probing
    Xss,
    /// content-length differential probing
    Sqli,
    /// both heuristics in one pass
    Scan,
}

impl From<Command> for Mode {
    fn from(command: Command) -> Self {
        match command {
            Command::Crawl => Mode::Crawl,
            Command::Xss => Mode::Xss,
            Command::Sqli => Mode::Sqli,
            Command::Scan => Mode::Scan,
        }
    }
}

const MENU: [Mode; 4] = [Mode::Crawl, Mode::Xss, Mode::Sqli, Mode::Scan];

fn settings(cli: &Cli) -> error::Result<(Config, RunOptions)> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(crawler) = &cli.crawler {
        config.crawler = crawler.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config.assume_yes |= cli.yes;
    config.random_user_agent |= cli.random_agent;

    let mut opts = RunOptions {
        url_file: cli.file.clone(),
        ..Default::default()
    };
    if let Some(domains) = &cli.domains {
        opts.domains = Some(parse_domains(domains)?);
    }

    if !config.headers.is_empty() || !cli.headers.is_empty() {
        let mut headers = HeaderSet::default();
        for (name, value) in &config.headers {
            headers.insert(name, value)?;
        }
        for line in &cli.headers {
            headers.insert_line(line)?;
        }
        opts.headers = Some(headers);
    }

    Ok((config, opts))
}

fn print_menu() {
    println!("{}", "-".repeat(50).yellow());
    println!(
        "{}",
        "[!] legal disclaimer: Usage of this tool for attacking targets without prior mutual consent is illegal. \
         It is the end user's responsibility to obey all applicable local, state and federal laws. \
         Developers assume no liability and are not responsible for any misuse or damage caused by this program"
            .white()
    );
    println!("{}", "-".repeat(50).yellow());
    println!("{}", "\nMain Menu:".magenta());
    for (idx, mode) in MENU.iter().enumerate() {
        println!("{}", format!("{}. {}", idx + 1, mode.description()).cyan());
    }
    println!("{}", format!("{}. Exit", MENU.len() + 1).red());
}

/// picks a mode, `None` to exit
async fn choose<O: Operator>(operator: &mut O) -> error::Result<Option<Mode>> {
    loop {
        print_menu();
        let prompt = format!("Enter your choice (1-{}): ", MENU.len() + 1);
        let Some(choice) = operator.ask(&prompt).await? else {
            return Ok(None);
        };

        match choice.parse::<usize>() {
            Ok(n) if (1..=MENU.len()).contains(&n) => return Ok(Some(MENU[n - 1])),
            Ok(n) if n == MENU.len() + 1 => return Ok(None),
            _ => warn!("Invalid choice. Please enter a valid option (1-{}).", MENU.len() + 1),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (config, opts) = match settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            err!("{e}");
            std::process::exit(1);
        }
    };

    let crawler = Crawler::from_config(&config);
    if !crawler.is_installed() {
        warn!(
            "{} is not installed, crawling will fail. install it with: go install github.com/tomnomnom/waybackurls@latest",
            crawler.program()
        );
    }

    let mut console = Console::new();

    if let Some(command) = cli.command {
        let mode = Mode::from(command);
        info!("Running {}...", mode.description());
        match run_mode(mode, &config, &opts, &mut console).await {
            Ok(()) | Err(Error::Interrupted) => return Ok(()),
            Err(e) => {
                err!("{e}");
                std::process::exit(1);
            }
        }
    }

    loop {
        let mode = match choose(&mut console).await {
            Ok(Some(mode)) => mode,
            Ok(None) | Err(Error::Interrupted) => break,
            Err(e) => return Err(e.into()),
        };

        println!("\n{}", "-".repeat(50));
        info!("Running {}...", mode.description());
        println!("{}", "-".repeat(50));

        match run_mode(mode, &config, &opts, &mut console).await {
            Ok(()) => good!("{} completed", mode.description()),
            Err(Error::Interrupted) => break,
            Err(e) => err!("{e}"),
        }
    }

    println!("{}", "Exiting the program. Goodbye!".red());
    Ok(())
}
