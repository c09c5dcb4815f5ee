use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ljarc_archive::FileTimestamps;
use ljarc_config::Config;
use ljarc_crawl::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Archives a LiveJournal account's posts into local Markdown files,
/// preserving original publish timestamps as filesystem metadata.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Account whose posts should be archived (e.g. "john-doe").
    account: String,
    /// Output directory, overriding the configured one.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Path to a configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    match archive_account(&opts) {
        Ok(report) => {
            info!(archived = report.archived, skipped = report.skipped, "run complete");
            ExitCode::SUCCESS
        },
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        },
    }
}

/// The whole fallible top-level flow; any error returned here is fatal to
/// the run and reported once in `main`.
fn archive_account(opts: &Opts) -> Result<ljarc::RunReport, String> {
    let mut config = Config::load(opts.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(output) = &opts.output {
        config.output_dir = output.clone();
    }
    let client = Client::connect(&config).map_err(|e| e.to_string())?;
    ljarc::run(&client, &FileTimestamps, &config, &opts.account).map_err(|e| e.to_string())
}
