//! Time Source Port
//!
//! Token issuance and expiry checks read the current time through this port
//! so hosts and tests can substitute a controlled clock.

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch
    fn now_unix_secs(&self) -> u64;
}
