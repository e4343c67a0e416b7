//! CLI entry point for trainer-harvest.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use harvest_core::{Collector, Extractor, HarvestError, HttpFetcher, ProgressSink, TracingSink};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

mod cli;
mod progress_ui;
mod terminal;

use cli::Args;
use progress_ui::SpinnerSink;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    terminal::init_tracing(
        terminal::default_log_level(args.quiet, args.verbose),
        terminal::no_color_env_requested(),
    );
    debug!(?args, "CLI arguments parsed");
    args.validate()?;

    let fetch_config = args.fetch_config();
    let config = args.harvest_config();
    let fetcher = HttpFetcher::new(&fetch_config).map_err(HarvestError::client)?;

    info!(
        season = config.query.season,
        rule = config.query.rule,
        party = config.query.party,
        output = %config.output_path.display(),
        "trainer-harvest starting"
    );

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing current trainer");
            interrupt.cancel();
        }
    });

    let spinner = terminal::should_use_spinner(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    )
    .then(SpinnerSink::start);
    let progress: &dyn ProgressSink = match &spinner {
        Some(spinner) => spinner,
        None => &TracingSink,
    };

    let result = Collector::new(&fetcher, Extractor::default(), &config, progress)
        .run(&cancel)
        .await;
    if let Some(spinner) = &spinner {
        spinner.finish();
    }
    let harvest = result?;

    let summary = &harvest.summary;
    if summary.cancelled {
        info!("run interrupted, partial results saved");
    }
    if !args.quiet {
        println!(
            "Saved {} trainers ({} processed this run, {} creatures) to {}",
            harvest.records.len(),
            summary.processed,
            summary.creatures,
            config.output_path.display()
        );
    }

    Ok(())
}
