//! Clock implementations
//!
//! Token issuance and expiry read time through the [`Clock`] port so tests can
//! move time forward without sleeping.

use keyward_domain::ports::Clock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock backed by [`SystemTime`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_secs(&self) -> u64 {
        // A system clock set before 1970 reads as the epoch
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// Manually driven clock for simulating the passage of time
///
/// # Example
///
/// ```ignore
/// let clock = Arc::new(ManualClock::new(1_700_000_000));
/// let pair = tokens.issue(&payload)?;
/// clock.advance(3601);
/// assert!(tokens.verify(&pair.access_token).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Clock frozen at the given unix timestamp
    pub fn new(now_unix_secs: u64) -> Self {
        Self {
            now: AtomicU64::new(now_unix_secs),
        }
    }

    /// Clock frozen at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now_unix_secs())
    }

    /// Move the clock forward
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, now_unix_secs: u64) {
        self.now.store(now_unix_secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
