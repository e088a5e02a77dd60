//! Timing instrumentation helpers
//!
//! Every public crypto operation is wrapped in a timer so its latency can be
//! recorded as a metrics sample.

use std::time::{Duration, Instant};

/// Timing instrumentation helper - tracks operation elapsed time
///
/// # Example
///
/// ```ignore
/// use keyward_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// let digest = hasher.sha256(data);
/// let latency = timer.elapsed_ms_f64();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in fractional milliseconds
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
