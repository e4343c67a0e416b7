//! Rate-limited page fetching.
//!
//! Every outbound request of a crawl goes through a [`PageFetcher`]. The
//! production implementation, [`HttpFetcher`], keeps one client identity for
//! the whole run and paces requests through a randomized [`Throttle`].
//!
//! # Example
//!
//! ```no_run
//! use harvest_core::fetch::{FetchConfig, HttpFetcher, PageFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = HttpFetcher::new(&FetchConfig::default())?;
//! let html = fetcher
//!     .fetch(
//!         "https://sv.pokedb.tokyo/trainer/list",
//!         &[("season", "27".to_string()), ("page", "1".to_string())],
//!     )
//!     .await?;
//! println!("{} bytes", html.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod retry;
pub mod throttle;

pub use client::{FetchConfig, HttpFetcher, PageFetcher, build_request_url};
pub use error::FetchError;
pub use retry::{
    DEFAULT_MAX_ATTEMPTS, FailureType, RetryDecision, RetryPolicy, classify_error,
    fetch_with_retry,
};
pub use throttle::Throttle;
