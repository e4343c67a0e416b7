//! Retry logic with exponential backoff for article fetches.
//!
//! The crawl treats most fetch failures as "skip this unit of work", so the
//! default policy makes a single attempt. Raising `max_attempts` lets
//! transient failures (timeouts, 5xx, 429) be retried with backoff before the
//! collector gives up on an article.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, instrument, warn};

use super::{FetchError, PageFetcher};

/// Default maximum attempts (a single try, no retry).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Default base delay for exponential backoff (1 second).
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default maximum delay cap (32 seconds).
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(32);

/// Default backoff multiplier (doubles each attempt).
const DEFAULT_BACKOFF_MULTIPLIER: f32 = 2.0;

/// Maximum jitter added to delays (500ms).
const MAX_JITTER: Duration = Duration::from_millis(500);

/// Classification of fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Temporary failure that may succeed on retry (timeouts, 5xx, 408).
    Transient,

    /// Failure that won't succeed regardless of retries (404, invalid URL).
    Permanent,

    /// Server rate limiting (HTTP 429); retried with backoff.
    RateLimited,
}

/// Decision on whether to retry a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// Which attempt number this will be (1-indexed, so first retry is attempt 2).
        attempt: u32,
    },

    /// Give up.
    DoNotRetry {
        /// Human-readable reason.
        reason: String,
    },
}

/// Retry behavior with exponential backoff.
///
/// ```text
/// delay = min(base_delay * multiplier^(attempt-1), max_delay) + jitter
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy with custom settings.
    ///
    /// `max_attempts` includes the initial attempt and is clamped to at least 1.
    #[must_use]
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f32,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            backoff_multiplier,
        }
    }

    /// Creates a policy with a custom `max_attempts`, using defaults for other settings.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Determines whether to retry after `attempt` (1-indexed) failed.
    #[instrument(skip(self), fields(max_attempts = self.max_attempts))]
    pub fn should_retry(&self, failure_type: FailureType, attempt: u32) -> RetryDecision {
        if failure_type == FailureType::Permanent {
            return RetryDecision::DoNotRetry {
                reason: "permanent failure - retry would not help".to_string(),
            };
        }

        if attempt >= self.max_attempts {
            debug!(attempt, max = self.max_attempts, "max attempts reached");
            return RetryDecision::DoNotRetry {
                reason: format!("max attempts ({}) exhausted", self.max_attempts),
            };
        }

        let delay = self.calculate_delay(attempt);
        debug!(
            attempt,
            next_attempt = attempt + 1,
            delay_ms = delay.as_millis(),
            "will retry"
        );

        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as f64;
        let multiplier = f64::from(self.backoff_multiplier);
        let exponent = f64::from(attempt.saturating_sub(1));
        let delay_ms = base_ms * multiplier.powf(exponent);
        let capped_ms = delay_ms.min(self.max_delay.as_millis() as f64);

        Duration::from_millis(capped_ms as u64) + Self::calculate_jitter()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn calculate_jitter() -> Duration {
        let mut rng = rand::thread_rng();
        Duration::from_millis(rng.gen_range(0..=MAX_JITTER.as_millis() as u64))
    }
}

/// Classifies a fetch error for retry decisions.
///
/// | Error | Type |
/// |-------|------|
/// | Timeout | Transient |
/// | Network | Transient |
/// | HTTP 408, 5xx | Transient |
/// | HTTP 429 | RateLimited |
/// | Other HTTP 4xx | Permanent |
/// | InvalidUrl, ClientBuild | Permanent |
#[must_use]
pub fn classify_error(error: &FetchError) -> FailureType {
    match error {
        FetchError::HttpStatus { status, .. } => classify_http_status(*status),
        FetchError::Timeout { .. } | FetchError::Network { .. } => FailureType::Transient,
        FetchError::InvalidUrl { .. } | FetchError::ClientBuild { .. } => FailureType::Permanent,
    }
}

#[allow(clippy::match_same_arms)]
fn classify_http_status(status: u16) -> FailureType {
    match status {
        408 => FailureType::Transient,
        429 => FailureType::RateLimited,
        status if (400..500).contains(&status) => FailureType::Permanent,
        status if (500..600).contains(&status) => FailureType::Transient,
        _ => FailureType::Permanent,
    }
}

/// Fetches `url` through `fetcher`, retrying per `policy`.
///
/// # Errors
///
/// Returns the last [`FetchError`] once the policy gives up.
pub async fn fetch_with_retry(
    fetcher: &dyn PageFetcher,
    policy: &RetryPolicy,
    url: &str,
) -> Result<String, FetchError> {
    let mut attempt = 1;
    loop {
        match fetcher.fetch(url, &[]).await {
            Ok(body) => return Ok(body),
            Err(error) => match policy.should_retry(classify_error(&error), attempt) {
                RetryDecision::Retry {
                    delay,
                    attempt: next,
                } => {
                    warn!(
                        url,
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %error,
                        "fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = next;
                }
                RetryDecision::DoNotRetry { reason } => {
                    debug!(url, attempt, reason = %reason, "giving up on fetch");
                    return Err(error);
                }
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    #[test]
    fn test_retry_policy_default_is_single_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.max_delay, Duration::from_secs(32));
    }

    #[test]
    fn test_retry_policy_max_attempts_minimum_is_one() {
        assert_eq!(RetryPolicy::with_max_attempts(0).max_attempts(), 1);
    }

    #[test]
    fn test_delay_calculation_grows_and_caps() {
        let policy = RetryPolicy::new(10, Duration::from_secs(1), Duration::from_secs(4), 2.0);
        let first = policy.calculate_delay(1);
        assert!(first >= Duration::from_secs(1) && first <= Duration::from_millis(1500));
        let third = policy.calculate_delay(3);
        assert!(third >= Duration::from_secs(4) && third <= Duration::from_millis(4500));
        let capped = policy.calculate_delay(8);
        assert!(capped <= Duration::from_millis(4500));
    }

    #[test]
    fn test_should_retry_permanent_never_retries() {
        let policy = RetryPolicy::with_max_attempts(5);
        assert!(matches!(
            policy.should_retry(FailureType::Permanent, 1),
            RetryDecision::DoNotRetry { .. }
        ));
    }

    #[test]
    fn test_should_retry_transient_until_exhausted() {
        let policy = RetryPolicy::with_max_attempts(3);
        assert!(matches!(
            policy.should_retry(FailureType::Transient, 1),
            RetryDecision::Retry { attempt: 2, .. }
        ));
        assert!(matches!(
            policy.should_retry(FailureType::RateLimited, 2),
            RetryDecision::Retry { attempt: 3, .. }
        ));
        assert!(matches!(
            policy.should_retry(FailureType::Transient, 3),
            RetryDecision::DoNotRetry { .. }
        ));
    }

    #[test]
    fn test_classify_error_by_status() {
        let classify = |status| classify_error(&FetchError::http_status("https://x.test", status));
        assert_eq!(classify(404), FailureType::Permanent);
        assert_eq!(classify(403), FailureType::Permanent);
        assert_eq!(classify(408), FailureType::Transient);
        assert_eq!(classify(429), FailureType::RateLimited);
        assert_eq!(classify(500), FailureType::Transient);
        assert_eq!(classify(503), FailureType::Transient);
    }

    #[test]
    fn test_classify_error_non_http() {
        assert_eq!(
            classify_error(&FetchError::timeout("https://x.test")),
            FailureType::Transient
        );
        assert_eq!(
            classify_error(&FetchError::invalid_url("nope")),
            FailureType::Permanent
        );
    }

    struct FlakyFetcher {
        calls: AtomicUsize,
        fail_count: usize,
        status: u16,
    }

    #[async_trait]
    impl PageFetcher for FlakyFetcher {
        async fn fetch(&self, url: &str, _params: &[(&str, String)]) -> Result<String, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_count {
                Err(FetchError::http_status(url, self.status))
            } else {
                Ok("ok".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_with_retry_recovers_from_transient() {
        tokio::time::pause();
        let fetcher = FlakyFetcher {
            calls: AtomicUsize::new(0),
            fail_count: 2,
            status: 503,
        };
        let policy = RetryPolicy::with_max_attempts(3);

        let body = fetch_with_retry(&fetcher, &policy, "https://x.test/a")
            .await
            .unwrap();
        assert_eq!(body, "ok");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_with_retry_default_policy_tries_once() {
        let fetcher = FlakyFetcher {
            calls: AtomicUsize::new(0),
            fail_count: 1,
            status: 503,
        };

        let result = fetch_with_retry(&fetcher, &RetryPolicy::default(), "https://x.test/a").await;
        assert!(result.is_err());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_with_retry_stops_on_permanent() {
        let fetcher = FlakyFetcher {
            calls: AtomicUsize::new(0),
            fail_count: 5,
            status: 404,
        };
        let policy = RetryPolicy::with_max_attempts(5);

        let err = fetch_with_retry(&fetcher, &policy, "https://x.test/a")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }
}
