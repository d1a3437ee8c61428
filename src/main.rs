mod config;
mod error;
mod geocode;
mod geodesy;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_THROTTLE_MS, DEFAULT_TIMEOUT_SECS, RunConfig};
use crate::error::RunError;
use crate::geocode::postcodes_io::DEFAULT_BASE_URL;
use crate::geocode::{PostcodesIoClient, Throttled};
use crate::model::score::NOT_AVAILABLE;
use crate::pipeline::progress::{BarProgress, ProgressObserver, SilentProgress};
use crate::pipeline::run_pipeline;

#[derive(Debug, Parser)]
#[command(name = "ppc-riskscore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode, match and score a leads table against a branches table.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Leads table (.csv/.tsv, optionally .gz).
    #[arg(long, value_name = "FILE")]
    leads: PathBuf,
    /// Branches table (.csv/.tsv, optionally .gz).
    #[arg(long, value_name = "FILE")]
    branches: PathBuf,
    /// Output directory.
    #[arg(long, value_name = "DIR")]
    out: PathBuf,
    /// Base URL of a postcodes.io compatible geocoder.
    #[arg(long, env = "PPC_GEOCODER_URL", default_value = DEFAULT_BASE_URL)]
    geocoder_url: String,
    /// Minimum milliseconds between postcode lookups.
    #[arg(long, default_value_t = DEFAULT_THROTTLE_MS)]
    throttle_ms: u64,
    /// Per-request geocoder timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Text written to cells that have no value.
    #[arg(long, default_value = NOT_AVAILABLE)]
    na_marker: String,
    /// Hide the progress bar.
    #[arg(long)]
    quiet: bool,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        RunConfig {
            leads_path: args.leads,
            branches_path: args.branches,
            out_dir: args.out,
            geocoder_url: args.geocoder_url,
            throttle: Duration::from_millis(args.throttle_ms),
            timeout: Duration::from_secs(args.timeout_secs),
            na_marker: args.na_marker,
            quiet: args.quiet,
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    if let Err(err) = run(RunConfig::from(args)) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: RunConfig) -> Result<(), RunError> {
    config.validate()?;

    let client = PostcodesIoClient::new(&config.geocoder_url, config.timeout)?;
    let mut lookup = Throttled::new(client, config.throttle);
    let mut observer: Box<dyn ProgressObserver> = if config.quiet {
        Box::new(SilentProgress)
    } else {
        Box::new(BarProgress::new("Running risk scoring..."))
    };

    run_pipeline(&config, &mut lookup, observer.as_mut())?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
