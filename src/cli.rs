//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use harvest_core::config::{
    DEFAULT_BASE_URL, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_OUTPUT_PATH, HarvestConfig,
};
use harvest_core::fetch::{DEFAULT_MAX_ATTEMPTS, FetchConfig, RetryPolicy};
use harvest_core::listing::{ListingPolicy, ListingQuery};

/// Collect ranked trainer teams from their build articles.
///
/// Walks the ranking listing for trainers that link a build article, reads
/// each article and saves item, ability, nature, tera type, moves and effort
/// values per team member to a JSON file. Progress is saved every few
/// trainers; Ctrl-C stops after the current trainer and saves what was
/// collected.
#[derive(Parser, Debug)]
#[command(name = "trainer-harvest")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Ranked battle season
    #[arg(short = 's', long, default_value_t = 27)]
    pub season: u32,

    /// Battle rule (0 = singles, 1 = doubles)
    #[arg(long, default_value_t = 0)]
    pub rule: u32,

    /// Party filter
    #[arg(long, default_value_t = 1)]
    pub party: u32,

    /// Only process the first N trainers of the listing
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_trainers: Option<u64>,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Save a snapshot after every N trainers (1-1000)
    #[arg(long, default_value_t = DEFAULT_CHECKPOINT_INTERVAL as u16, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub checkpoint_every: u16,

    /// Minimum delay between requests in milliseconds (max 60000)
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub min_delay_ms: u64,

    /// Maximum delay between requests in milliseconds (0 disables pacing, max 60000)
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub max_delay_ms: u64,

    /// Maximum attempts per article for transient failures (0-10, 0 and 1 both mean a single try)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_ATTEMPTS as u8, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub max_retries: u8,

    /// Ranking site base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Continue from an existing output file, skipping trainers it already holds
    #[arg(long)]
    pub resume: bool,
}

impl Args {
    /// Checks constraints clap cannot express per flag.
    pub fn validate(&self) -> Result<()> {
        if self.min_delay_ms > self.max_delay_ms {
            bail!(
                "Invalid delay range: --min-delay-ms ({}) is greater than --max-delay-ms ({}).\n  \
                 Use --min-delay-ms <= --max-delay-ms.",
                self.min_delay_ms,
                self.max_delay_ms
            );
        }
        if url::Url::parse(&self.base_url).is_err() {
            bail!("Invalid --base-url '{}': expected an absolute URL such as {DEFAULT_BASE_URL}", self.base_url);
        }
        Ok(())
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            ..FetchConfig::default()
        }
    }

    pub fn harvest_config(&self) -> HarvestConfig {
        HarvestConfig {
            base_url: self.base_url.clone(),
            query: ListingQuery {
                season: self.season,
                rule: self.rule,
                party: self.party,
            },
            max_trainers: self
                .max_trainers
                .map(|max| usize::try_from(max).unwrap_or(usize::MAX)),
            output_path: self.output.clone(),
            checkpoint_interval: usize::from(self.checkpoint_every),
            listing: ListingPolicy::default(),
            retry: RetryPolicy::with_max_attempts(u32::from(self.max_retries)),
            resume: self.resume,
        }
    }
}
