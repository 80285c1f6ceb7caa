use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use docmirror_core::{
    CrawlConfig, CrawlReport, Crawler, DEFAULT_CONTENT_SELECTOR, ExtractConfig, ExtractReport, Preset,
    clear_output_dir, extract_all,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mirror a documentation site and extract the article text of every page
#[derive(Parser, Debug)]
#[command(name = "docmirror")]
#[command(author = "docmirror Contributors")]
#[command(version)]
#[command(about = "Mirror documentation sites and extract their article text", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print run reports as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download every HTML page below a seed URL (all presets when no seed is given)
    Crawl(CrawlArgs),
    /// Convert saved HTML pages into flat plain-text files
    Extract(ExtractArgs),
    /// Crawl and then extract the built-in presets
    Mirror(MirrorArgs),
    /// List the built-in presets
    Presets,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Seconds to wait after each fetch
    #[arg(long, default_value = "1", value_name = "SECS", value_parser = parse_wait)]
    wait: Duration,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Stop after this many pages
    #[arg(long, value_name = "NUM")]
    max_pages: Option<usize>,
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Starting URL; only links below it are followed
    #[arg(long, value_name = "URL", requires = "output", conflicts_with = "preset")]
    seed: Option<String>,

    /// Host links must match (default: the seed's host)
    #[arg(long, value_name = "HOST", requires = "seed")]
    domain: Option<String>,

    /// Directory the mirror is written under
    #[arg(short, long, value_name = "DIR", requires = "seed")]
    output: Option<PathBuf>,

    /// Run a single built-in preset
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Directory of saved HTML pages
    #[arg(value_name = "INPUT", requires = "output", conflicts_with = "preset")]
    input: Option<PathBuf>,

    /// Directory for the text files
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// CSS selector of the content node
    #[arg(long, default_value = DEFAULT_CONTENT_SELECTOR, value_name = "CSS")]
    selector: String,

    /// Run a single built-in preset
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,
}

#[derive(Args, Debug)]
struct MirrorArgs {
    /// Run a single built-in preset
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// CSS selector of the content node
    #[arg(long, default_value = DEFAULT_CONTENT_SELECTOR, value_name = "CSS")]
    selector: String,

    #[command(flatten)]
    fetch: FetchArgs,
}

fn parse_wait(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("wait must be a non-negative number of seconds, got {}", value));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("wait of {} seconds is out of range: {}", value, e))
}

/// Install the stderr tracing subscriber; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default = if verbose { "docmirror=debug,docmirror_core=debug" } else { "docmirror=info,docmirror_core=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl FetchArgs {
    fn apply(&self, builder: docmirror_core::CrawlConfigBuilder) -> CrawlConfig {
        let mut builder = builder.wait(self.wait).timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(max_pages) = self.max_pages {
            builder = builder.max_pages(max_pages);
        }
        builder.build()
    }
}

impl CrawlArgs {
    /// One explicit job, or the selected presets
    fn configs(&self) -> anyhow::Result<Vec<CrawlConfig>> {
        if let Some(seed) = &self.seed {
            let Some(output) = &self.output else {
                bail!("--output is required with --seed");
            };
            let domain = match &self.domain {
                Some(domain) => domain.clone(),
                None => Url::parse(seed)
                    .ok()
                    .and_then(|url| url.host_str().map(str::to_string))
                    .with_context(|| format!("Cannot derive a domain from seed '{}'; pass --domain", seed))?,
            };
            return Ok(vec![self.fetch.apply(CrawlConfig::builder(seed, output, domain))]);
        }

        Ok(Preset::select(self.preset.as_deref())?
            .into_iter()
            .map(|preset| self.fetch.apply(preset.crawl_builder()))
            .collect())
    }
}

async fn run_crawls(configs: Vec<CrawlConfig>, verbose: bool) -> anyhow::Result<Vec<CrawlReport>> {
    let total = configs.len();
    let mut reports = Vec::with_capacity(total);

    for (index, config) in configs.into_iter().enumerate() {
        echo::print_step(
            index + 1,
            total,
            &format!("Crawling {}", config.seed_url.bright_white().underline()),
        );
        if verbose {
            eprintln!("  {} {}", "Domain:".dimmed(), config.allowed_domain.bright_white());
            eprintln!("  {} {}", "Output:".dimmed(), config.output_dir.display().bright_white());
            eprintln!("  {} {:?}", "Wait:".dimmed(), config.wait);
        }

        let started = Instant::now();
        let crawler = Crawler::new(config).context("Invalid crawl configuration")?;
        let report = crawler.run().await.context("Crawl could not start")?;

        echo::print_crawl_summary(&report, started.elapsed());
        eprintln!();
        reports.push(report);
    }

    Ok(reports)
}

/// Extract one preset's html dir into a freshly cleared text dir
fn extract_preset(preset: &Preset, config: &ExtractConfig) -> anyhow::Result<ExtractReport> {
    let text_dir = preset.text_dir();
    if clear_output_dir(&text_dir).with_context(|| format!("Failed to remove {}", text_dir.display()))? {
        echo::print_info(&format!("Removed previous output {}", text_dir.display()));
    }

    extract_all(&preset.html_dir(), &text_dir, config)
        .with_context(|| format!("Failed to extract preset '{}'", preset.name))
}

fn run_extract(args: &ExtractArgs) -> anyhow::Result<Vec<ExtractReport>> {
    let config = ExtractConfig { content_selector: args.selector.clone() };

    if let (Some(input), Some(output)) = (&args.input, &args.output) {
        echo::print_step(1, 1, &format!("Extracting {} into {}", input.display(), output.display()));
        let report = extract_all(input, output, &config).context("Extraction failed")?;
        echo::print_extract_summary(&report);
        return Ok(vec![report]);
    }

    let presets = Preset::select(args.preset.as_deref())?;
    let total = presets.len();
    let mut reports = Vec::with_capacity(total);

    for (index, preset) in presets.into_iter().enumerate() {
        echo::print_step(index + 1, total, &format!("Extracting preset {}", preset.name.bright_white()));
        let report = extract_preset(preset, &config)?;
        echo::print_extract_summary(&report);
        reports.push(report);
    }

    Ok(reports)
}

fn print_presets() {
    for preset in Preset::all() {
        println!(
            "{}\n  seed:   {}\n  domain: {}\n  html:   {}\n  text:   {}",
            preset.name.bold(),
            preset.seed_url,
            preset.allowed_domain,
            preset.html_dir,
            preset.text_dir
        );
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize report")?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(command = ?cli.command, "parsed arguments");

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    match &cli.command {
        Command::Crawl(args) => {
            let reports = run_crawls(args.configs()?, cli.verbose).await?;
            if cli.json {
                print_json(&reports)?;
            }
        }
        Command::Extract(args) => {
            let reports = run_extract(args)?;
            if cli.json {
                print_json(&reports)?;
            }
        }
        Command::Mirror(args) => {
            let presets = Preset::select(args.preset.as_deref())?;
            let configs = presets.iter().map(|preset| args.fetch.apply(preset.crawl_builder())).collect();
            let crawls = run_crawls(configs, cli.verbose).await?;

            let config = ExtractConfig { content_selector: args.selector.clone() };
            let mut extracts = Vec::with_capacity(presets.len());
            for (index, preset) in presets.iter().enumerate() {
                echo::print_step(
                    index + 1,
                    presets.len(),
                    &format!("Extracting preset {}", preset.name.bright_white()),
                );
                let report = extract_preset(preset, &config)?;
                echo::print_extract_summary(&report);
                extracts.push(report);
            }

            if cli.json {
                print_json(&serde_json::json!({ "crawls": crawls, "extracts": extracts }))?;
            }
        }
        Command::Presets => print_presets(),
    }

    Ok(())
}
