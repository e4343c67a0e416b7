//! HTTP client wrapper for crawl traffic.
//!
//! [`HttpFetcher`] is the only component that talks to remote servers. It
//! owns one reqwest client (fixed User-Agent, cookie store, gzip, finite
//! timeouts) and one [`Throttle`], so every listing page and article goes out
//! under the same identity and pacing.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument, warn};
use url::Url;

use super::FetchError;
use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, READ_TIMEOUT_SECS,
};
use super::throttle::Throttle;
use crate::user_agent;

/// Source of raw page text.
///
/// Implemented by [`HttpFetcher`] for real crawls; tests substitute in-memory
/// fakes. Implementations must be called sequentially by the crawl so that
/// pacing stays meaningful.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` with `params` appended to its query string and returns the body text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on network failure, timeout, or non-2xx status.
    async fn fetch(&self, url: &str, params: &[(&str, String)]) -> Result<String, FetchError>;
}

/// Network settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub read_timeout: Duration,
    /// Lower bound of the inter-request delay.
    pub min_delay: Duration,
    /// Upper bound of the inter-request delay.
    pub max_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: user_agent::default_crawl_user_agent(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// Rate-limited HTTP fetcher with a persistent client identity.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    throttle: Throttle,
}

impl HttpFetcher {
    /// Builds a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] when the reqwest client cannot be built.
    #[instrument(level = "debug", skip_all, fields(user_agent = %config.user_agent))]
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = build_client(config)?;
        Ok(Self {
            client,
            throttle: Throttle::new(config.min_delay, config.max_delay),
        })
    }

    /// Returns the throttle shared by all requests from this fetcher.
    #[must_use]
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip(self, params), fields(url = %url))]
    async fn fetch(&self, url: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        let request_url = build_request_url(url, params)?;

        self.throttle.acquire().await;

        debug!(url = %request_url, "sending request");
        let response = self
            .client
            .get(request_url.clone())
            .send()
            .await
            .map_err(|error| FetchError::network(request_url.as_str(), error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(
                request_url.as_str(),
                status.as_u16(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|error| FetchError::network(request_url.as_str(), error))?;
        debug!(bytes = body.len(), "response received");
        Ok(body)
    }
}

/// Appends `params` to `url`'s query string.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] when `url` is not an absolute URL.
pub fn build_request_url(url: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
    let mut parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;
    if !params.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(parsed)
}

fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    match catch_unwind(AssertUnwindSafe(|| base_builder(config).build())) {
        Ok(result) => result.map_err(|source| FetchError::ClientBuild { source }),
        Err(_) => {
            // Some sandboxed macOS environments panic when reading system proxy
            // settings; skip the lookup and build without proxies.
            warn!("HTTP client hit system proxy panic; building without proxy lookup");
            base_builder(config)
                .no_proxy()
                .build()
                .map_err(|source| FetchError::ClientBuild { source })
        }
    }
}

fn base_builder(config: &FetchConfig) -> ClientBuilder {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.read_timeout)
        .user_agent(config.user_agent.clone())
        .cookie_store(true)
        .gzip(true)
}
