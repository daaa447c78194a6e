mod fetch;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::webpage::DEFAULT_SCOPE;
use tse_core::{CrawlError, CrawlSummary, Crawler, PageDir, StoreError, UrlScope};

use crate::fetch::HttpFetcher;

const EXIT_ARGS: i32 = 1;
const EXIT_INIT: i32 = 2;
const EXIT_PERSIST: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl internal pages from a seed URL into a page directory")]
struct Cli {
    /// URL to start crawling from; must be internal
    seed_url: String,
    /// Existing directory to save pages in, one file per docID
    page_directory: PathBuf,
    /// Pages this many links from the seed are saved but not scanned
    max_depth: u32,
    /// URL prefix that marks a page as internal
    #[arg(long, default_value = DEFAULT_SCOPE)]
    scope: String,
    /// Number of fetches in flight. Above 1 the crawl is no longer strictly
    /// breadth-first, so a page may be saved at a deeper depth than its
    /// shortest path
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
    /// Pause before each request, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// User-Agent header sent with every request
    #[arg(long, default_value = "tse-crawler/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { EXIT_ARGS } else { 0 });
        }
    };

    let code = match run(cli).await {
        Ok(summary) => {
            eprintln!("done: saved={} seen={} failed={}", summary.saved, summary.seen, summary.failed);
            0
        }
        Err(e) => {
            eprintln!("crawler: {e:#}");
            exit_code(&e)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<CrawlSummary> {
    let scope = UrlScope::new(cli.scope);
    let seed = scope.normalize(&cli.seed_url).ok_or_else(|| anyhow!("seed URL {} does not parse", cli.seed_url))?;
    if !scope.is_internal(&seed) {
        return Err(anyhow!("seed URL {seed} is not internal to {}", scope.prefix()));
    }
    if !cli.page_directory.is_dir() {
        return Err(anyhow!("{} is not an existing directory", cli.page_directory.display()));
    }

    let mut pages = PageDir::new(&cli.page_directory);
    pages.init().with_context(|| format!("initializing {}", cli.page_directory.display()))?;
    let fetcher = HttpFetcher::new(&cli.user_agent, Duration::from_secs(cli.timeout_secs), Duration::from_millis(cli.delay_ms))
        .context("building HTTP client")?;

    tracing::info!(seed = %seed, max_depth = cli.max_depth, concurrency = cli.concurrency, "crawl starting");
    let summary = Crawler::new(scope, cli.max_depth)
        .with_concurrency(cli.concurrency)
        .run(&seed, &fetcher, &mut pages)
        .await?;
    Ok(summary)
}

fn exit_code(e: &anyhow::Error) -> i32 {
    if let Some(crawl) = e.downcast_ref::<CrawlError>() {
        return match crawl {
            CrawlError::SeedNotInternal(_) => EXIT_INIT,
            CrawlError::Persist { .. } => EXIT_PERSIST,
        };
    }
    if e.downcast_ref::<StoreError>().is_some() || e.downcast_ref::<reqwest::Error>().is_some() {
        return EXIT_INIT;
    }
    EXIT_ARGS
}
