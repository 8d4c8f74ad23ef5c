use clap::Parser;
use log::error;

use std::{path::PathBuf, process};

/// Validates and totals sales record files, writing per-branch and
/// per-commodity summaries into the working directory.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding the definition and sales record files
    directory: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = sales_tally::run(&cli.directory) {
        error!("{e}");
        process::exit(1);
    }
}
