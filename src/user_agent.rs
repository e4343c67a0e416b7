//! User-Agent string for crawl traffic.
//!
//! The ranking site serves its listing only to browser-like clients, so the
//! crawler presents one fixed browser identity for the whole run.

/// Browser User-Agent sent with every listing and article request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Default User-Agent for crawl requests.
#[must_use]
pub fn default_crawl_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}
