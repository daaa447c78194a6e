use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use querier::{OutputFormat, Querier};
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::{InvertedIndex, PageDir};

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer and/or queries read from stdin against an index file")]
struct Args {
    /// Directory written by the crawler
    page_directory: PathBuf,
    /// Index file written by the indexer
    index_filename: PathBuf,
    /// Print one JSON object per query instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    if let Err(e) = run(&args) {
        eprintln!("querier: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let pages = PageDir::new(&args.page_directory);
    if !pages.is_crawler_directory() {
        return Err(anyhow!("{} is not a crawler directory", args.page_directory.display()));
    }
    let index = InvertedIndex::read_file(&args.index_filename)
        .with_context(|| format!("failed to build index from {}", args.index_filename.display()))?;
    tracing::info!(num_words = index.len(), "index loaded");

    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };
    let querier = Querier::new(index, pages, format);
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    querier.run(stdin.lock(), &mut io::stdout().lock(), &mut io::stderr().lock(), interactive)?;
    Ok(())
}
