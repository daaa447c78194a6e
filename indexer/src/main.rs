use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use indexer::{check_writable, index_build};
use tse_core::PageDir;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index file from a crawler page directory", long_about = None)]
struct Cli {
    /// Directory written by the crawler
    page_directory: PathBuf,
    /// Index file to create or overwrite
    index_filename: PathBuf,
}

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    if let Err(e) = run(&cli) {
        eprintln!("indexer: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let pages = PageDir::new(&cli.page_directory);
    if !pages.is_crawler_directory() {
        return Err(anyhow!("{} is not a crawler directory", cli.page_directory.display()));
    }
    check_writable(&cli.index_filename).with_context(|| format!("cannot write {}", cli.index_filename.display()))?;

    let idx = index_build(&pages).context("reading pages")?;
    tracing::info!(num_words = idx.len(), "ingested documents");
    idx.save_to_file(&cli.index_filename)
        .with_context(|| format!("writing {}", cli.index_filename.display()))?;
    tracing::info!(output = %cli.index_filename.display(), "index build complete");
    Ok(())
}
