//! Harvest core library
//!
//! Crawls a competitive-battle ranking site for trainers that published a
//! team build article, reads each article, and turns the free-form text into
//! structured team records saved as a JSON snapshot.
//!
//! # Architecture
//!
//! - [`fetch`] - Rate-limited page fetching behind the [`PageFetcher`] seam
//! - [`listing`] - Paginated discovery of trainers with build articles
//! - [`extract`] - Label-pattern field extraction from article text
//! - [`collector`] - Sequential harvest with atomic periodic snapshots
//! - [`names`] - Dex number to display name table
//! - [`progress`] - Human-readable progress lines
//!
//! # Example
//!
//! ```no_run
//! use harvest_core::{
//!     Collector, Extractor, FetchConfig, HarvestConfig, HttpFetcher, TracingSink,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(&FetchConfig::default())?;
//! let config = HarvestConfig {
//!     max_trainers: Some(10),
//!     ..HarvestConfig::default()
//! };
//! let harvest = Collector::new(&fetcher, Extractor::default(), &config, &TracingSink)
//!     .run(&CancellationToken::new())
//!     .await?;
//! println!("{} trainers", harvest.records.len());
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod model;
pub mod names;
pub mod progress;
pub mod user_agent;
pub mod utils;

// Re-export commonly used types
pub use collector::{Collector, Harvest, HarvestError, HarvestSummary};
pub use config::HarvestConfig;
pub use extract::Extractor;
pub use fetch::{FetchConfig, FetchError, HttpFetcher, PageFetcher, RetryPolicy, Throttle};
pub use listing::{ListingPolicy, ListingQuery, Paginator};
pub use model::{CreatureRecord, EffortValues, TrainerRecord, TrainerStub};
pub use names::NameTable;
pub use progress::{MemorySink, ProgressEvent, ProgressSink, TracingSink};
