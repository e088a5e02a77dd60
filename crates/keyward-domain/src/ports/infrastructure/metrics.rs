//! Metrics Recording Port
//!
//! Defines the interface every component uses to report completed
//! operations. The host constructs one recorder and injects it into each
//! component; there is no process-wide instance.

use crate::value_objects::{MetricsSample, MetricsSnapshot};

/// Metrics recorder port
///
/// Implementations must accept concurrent `record` calls from many in-flight
/// operations without losing updates.
///
/// # Example
///
/// ```ignore
/// use keyward_domain::ports::MetricsRecorder;
/// use keyward_domain::value_objects::{MetricsSample, Operation};
///
/// fn report(recorder: &dyn MetricsRecorder, elapsed: std::time::Duration) {
///     recorder.record(MetricsSample::new(Operation::Hashing, elapsed, true));
/// }
/// ```
pub trait MetricsRecorder: Send + Sync {
    /// Append one completed operation to the aggregates
    fn record(&self, sample: MetricsSample);

    /// Aggregated view of everything recorded since the last reset
    fn snapshot(&self) -> MetricsSnapshot;

    /// Clear every counter and latency sample
    fn reset(&self);
}
