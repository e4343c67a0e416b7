//! Run configuration for a harvest.
//!
//! There is no config file: the CLI maps its flags onto [`HarvestConfig`] and
//! [`crate::fetch::FetchConfig`], and library callers build them directly.

use std::path::PathBuf;

use crate::fetch::RetryPolicy;
use crate::listing::{ListingPolicy, ListingQuery};

/// Ranking site the listing is read from.
pub const DEFAULT_BASE_URL: &str = "https://sv.pokedb.tokyo";

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "trainer_data.json";

/// Trainers processed between two checkpoint writes.
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 5;

/// Settings for one [`crate::Collector`] run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Scheme and host of the ranking site, without a trailing path.
    pub base_url: String,
    /// Listing filters.
    pub query: ListingQuery,
    /// Stop after this many trainers (in listing order). `None` means all.
    pub max_trainers: Option<usize>,
    /// Where snapshots are written.
    pub output_path: PathBuf,
    /// Trainers between intermediate snapshots. Zero disables them; the
    /// final snapshot is always written.
    pub checkpoint_interval: usize,
    /// Pagination stop heuristics.
    pub listing: ListingPolicy,
    /// Retry behavior for article fetches.
    pub retry: RetryPolicy,
    /// Seed the run from an existing output file and skip trainers it holds.
    pub resume: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query: ListingQuery::default(),
            max_trainers: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            listing: ListingPolicy::default(),
            retry: RetryPolicy::default(),
            resume: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarvestConfig::default();
        assert_eq!(config.base_url, "https://sv.pokedb.tokyo");
        assert_eq!(config.query, ListingQuery { season: 27, rule: 0, party: 1 });
        assert_eq!(config.max_trainers, None);
        assert_eq!(config.output_path, PathBuf::from("trainer_data.json"));
        assert_eq!(config.checkpoint_interval, 5);
        assert_eq!(config.listing.quiet_page_limit, 10);
        assert_eq!(config.retry.max_attempts(), 1);
        assert!(!config.resume);
    }
}
