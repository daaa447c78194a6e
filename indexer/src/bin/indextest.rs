//! Load an index file and save it again, to check that the file format
//! survives a round trip.

use std::path::PathBuf;

use clap::Parser;
use tse_core::InvertedIndex;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indextest")]
struct Cli {
    old_index_filename: PathBuf,
    new_index_filename: PathBuf,
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

    let idx = match InvertedIndex::read_file(&cli.old_index_filename) {
        Ok(idx) => idx,
        Err(e) => {
            eprintln!("indextest: reading {}: {e}", cli.old_index_filename.display());
            std::process::exit(2);
        }
    };
    if let Err(e) = idx.save_to_file(&cli.new_index_filename) {
        eprintln!("indextest: writing {}: {e}", cli.new_index_filename.display());
        std::process::exit(2);
    }
}
