//! Constants for the fetch module (timeouts, throttle window).

use std::time::Duration;

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout (30 seconds; listing pages and articles are small).
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Default lower bound of the inter-request delay window.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(500);

/// Default upper bound of the inter-request delay window.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(2000);

/// Warning threshold for the cumulative time spent throttled (5 minutes).
pub const CUMULATIVE_DELAY_WARNING_THRESHOLD: Duration = Duration::from_secs(300);
