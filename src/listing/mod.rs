//! Paginated discovery of trainers that published a build article.
//!
//! The [`Paginator`] walks `/trainer/list` page by page and keeps rows that
//! link a build article and show at least one team member. It stops on the
//! first structural end-of-list signal:
//!
//! - the page has no rows at all;
//! - the page has no article link and more than
//!   [`ListingPolicy::quiet_page_limit`] pages have been scanned (a heuristic
//!   for listings that trail off instead of ending; it does not guarantee the
//!   whole listing was seen);
//! - the page has no "next page" link.
//!
//! A failed page fetch ends discovery early (fail-fast); stubs collected so
//! far are kept.

mod page;

pub use page::{ARTICLE_MARKER, ListingPage, NEXT_PAGE_MARKER, parse_listing_page};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::fetch::{PageFetcher, build_request_url};
use crate::model::TrainerStub;
use crate::progress::{ProgressEvent, ProgressSink, report};

/// Path of the trainer listing below the site base URL.
pub const LISTING_PATH: &str = "/trainer/list";

/// Default number of pages after which an article-less page ends the scan.
pub const DEFAULT_QUIET_PAGE_LIMIT: u32 = 10;

/// Listing filters sent as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingQuery {
    /// Ranked battle season.
    pub season: u32,
    /// Battle rule (0 = singles, 1 = doubles).
    pub rule: u32,
    /// Party filter.
    pub party: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            season: 27,
            rule: 0,
            party: 1,
        }
    }
}

impl ListingQuery {
    fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("season", self.season.to_string()),
            ("rule", self.rule.to_string()),
            ("party", self.party.to_string()),
            ("page", page.to_string()),
        ]
    }
}

/// Termination tuning for the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    /// Once the page number exceeds this, a page without any article link ends the scan.
    pub quiet_page_limit: u32,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            quiet_page_limit: DEFAULT_QUIET_PAGE_LIMIT,
        }
    }
}

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page had no rows.
    EmptyPage,
    /// Past the quiet-page limit, a page had no article links.
    QuietPage,
    /// No "next page" link.
    NoNextPage,
    /// A page could not be fetched.
    FetchFailed(String),
    /// Cancellation was requested.
    Cancelled,
}

/// Result of a listing walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Stubs in listing order.
    pub stubs: Vec<TrainerStub>,
    /// Number of pages fetched successfully.
    pub pages: u32,
    /// Why the walk ended.
    pub stop: StopReason,
}

/// Walks the trainer listing.
pub struct Paginator<'a> {
    fetcher: &'a dyn PageFetcher,
    base_url: &'a str,
    policy: ListingPolicy,
    progress: &'a dyn ProgressSink,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator for the site at `base_url` (e.g. `https://sv.pokedb.tokyo`).
    #[must_use]
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        base_url: &'a str,
        policy: ListingPolicy,
        progress: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            fetcher,
            base_url,
            policy,
            progress,
        }
    }

    /// Collects stubs for every trainer with a build article.
    ///
    /// Cancellation is checked before each page fetch.
    #[instrument(skip(self, cancel), fields(season = query.season, rule = query.rule, party = query.party))]
    pub async fn list_trainers_with_articles(
        &self,
        query: &ListingQuery,
        cancel: &CancellationToken,
    ) -> Discovery {
        let listing_url = format!("{}{LISTING_PATH}", self.base_url.trim_end_matches('/'));
        let mut stubs = Vec::new();
        let mut page = 1;

        let stop = loop {
            if cancel.is_cancelled() {
                info!(page, "listing cancelled");
                break StopReason::Cancelled;
            }

            report(self.progress, &ProgressEvent::PageFetching { page });
            let params = query.params(page);
            let html = match self.fetcher.fetch(&listing_url, &params).await {
                Ok(html) => html,
                Err(error) => {
                    warn!(page, error = %error, "listing page fetch failed, ending discovery");
                    break StopReason::FetchFailed(error.to_string());
                }
            };

            let page_url = match build_request_url(&listing_url, &params) {
                Ok(url) => url,
                Err(error) => break StopReason::FetchFailed(error.to_string()),
            };
            let parsed = parse_listing_page(&html, &page_url);
            debug!(
                page,
                rows = parsed.row_count,
                stubs = parsed.stubs.len(),
                has_next = parsed.has_next_page,
                "listing page parsed"
            );

            if parsed.row_count == 0 {
                info!(page, "no trainer rows on page, end of listing");
                break StopReason::EmptyPage;
            }

            report(
                self.progress,
                &ProgressEvent::PageParsed {
                    page,
                    found: parsed.stubs.len(),
                },
            );
            stubs.extend(parsed.stubs);

            if !parsed.has_article_link && page > self.policy.quiet_page_limit {
                info!(page, "no article links past quiet-page limit, end of listing");
                break StopReason::QuietPage;
            }

            if !parsed.has_next_page {
                info!(page, "no next page link, end of listing");
                break StopReason::NoNextPage;
            }

            page += 1;
        };

        let pages = match stop {
            StopReason::FetchFailed(_) | StopReason::Cancelled => page - 1,
            _ => page,
        };
        report(
            self.progress,
            &ProgressEvent::ListingDone {
                trainers: stubs.len(),
            },
        );
        info!(trainers = stubs.len(), pages, "listing discovery finished");

        Discovery { stubs, pages, stop }
    }
}
