//! Randomized inter-request delay for crawl traffic.
//!
//! The crawl issues requests strictly one after another, so a single
//! [`Throttle`] shared by every call is enough to keep the request rate toward
//! the ranking site and article hosts down. Each wait is drawn uniformly from
//! a `[min, max]` window; time already spent since the previous request counts
//! toward it.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use harvest_core::fetch::Throttle;
//!
//! # async fn example() {
//! let throttle = Throttle::new(Duration::from_millis(500), Duration::from_secs(2));
//!
//! // First request proceeds immediately
//! throttle.acquire().await;
//!
//! // Every later request waits somewhere between 0.5s and 2s
//! throttle.acquire().await;
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use super::constants::CUMULATIVE_DELAY_WARNING_THRESHOLD;

/// Shared request throttle with a randomized delay window.
#[derive(Debug)]
pub struct Throttle {
    /// Lower bound of the delay window.
    min_delay: Duration,

    /// Upper bound of the delay window.
    max_delay: Duration,

    /// Whether throttling is disabled (delay window of zero).
    disabled: bool,

    /// Time of the last request. `None` until the first request goes out.
    last_request: Mutex<Option<Instant>>,

    /// Total time spent waiting, in milliseconds.
    cumulative_delay_ms: AtomicU64,
}

impl Throttle {
    /// Creates a throttle drawing delays from `[min_delay, max_delay]`.
    ///
    /// Bounds given in the wrong order are swapped.
    #[must_use]
    #[instrument(skip_all, fields(min_ms = min_delay.as_millis(), max_ms = max_delay.as_millis()))]
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        let (min_delay, max_delay) = if min_delay <= max_delay {
            (min_delay, max_delay)
        } else {
            (max_delay, min_delay)
        };
        debug!("creating request throttle");
        Self {
            min_delay,
            max_delay,
            disabled: max_delay.is_zero(),
            last_request: Mutex::new(None),
            cumulative_delay_ms: AtomicU64::new(0),
        }
    }

    /// Creates a throttle that never waits. Used by tests and `--max-delay-ms 0`.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Returns whether throttling is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the delay window as `(min, max)`.
    #[must_use]
    pub fn window(&self) -> (Duration, Duration) {
        (self.min_delay, self.max_delay)
    }

    /// Returns the total time spent waiting so far.
    #[must_use]
    pub fn cumulative_delay(&self) -> Duration {
        Duration::from_millis(self.cumulative_delay_ms.load(Ordering::SeqCst))
    }

    /// Waits until the next request may be issued, then records it.
    ///
    /// The first call never waits.
    pub async fn acquire(&self) {
        let mut last_request_guard = self.last_request.lock().await;

        if let Some(last_request) = *last_request_guard
            && !self.disabled
        {
            let target = self.draw_delay();
            let delay = target.saturating_sub(last_request.elapsed());
            if !delay.is_zero() {
                let cumulative = self.add_cumulative_delay(delay);
                debug!(
                    delay_ms = delay.as_millis(),
                    cumulative_ms = cumulative.as_millis(),
                    "throttling request"
                );
                if cumulative >= CUMULATIVE_DELAY_WARNING_THRESHOLD
                    && cumulative.saturating_sub(delay) < CUMULATIVE_DELAY_WARNING_THRESHOLD
                {
                    warn!(
                        cumulative_delay_secs = cumulative.as_secs(),
                        "crawl has spent a long time throttled - consider a smaller delay window"
                    );
                }
                tokio::time::sleep(delay).await;
            }
        }

        *last_request_guard = Some(Instant::now());
    }

    /// Draws a delay uniformly from the window.
    #[allow(clippy::cast_possible_truncation)]
    fn draw_delay(&self) -> Duration {
        let min_ms = self.min_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;
        if min_ms == max_ms {
            return self.min_delay;
        }
        let mut rng = rand::thread_rng();
        Duration::from_millis(rng.gen_range(min_ms..=max_ms))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_cumulative_delay(&self, delay: Duration) -> Duration {
        let delay_ms = delay.as_millis() as u64;
        let new_total = self
            .cumulative_delay_ms
            .fetch_add(delay_ms, Ordering::SeqCst)
            + delay_ms;
        Duration::from_millis(new_total)
    }
}
