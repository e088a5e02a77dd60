//! Operation metrics
//!
//! [`MetricsRegistry`] is the in-memory [`MetricsRecorder`] injected into
//! every component. The helpers here wrap an operation so it records exactly
//! one sample whatever the outcome.

mod registry;

pub use registry::{MetricsRegistry, NullMetricsRecorder};

use crate::utils::TimedOperation;
use keyward_domain::error::Result;
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{MetricsSample, Operation};

/// Run a synchronous operation and record its outcome
pub(crate) fn track<T, F>(metrics: &dyn MetricsRecorder, operation: Operation, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let timer = TimedOperation::start();
    let result = f();
    finish(metrics, operation, &timer, result)
}

/// Record the outcome of an operation started at `timer`
pub(crate) fn finish<T>(
    metrics: &dyn MetricsRecorder,
    operation: Operation,
    timer: &TimedOperation,
    result: Result<T>,
) -> Result<T> {
    metrics.record(MetricsSample::new(operation, timer.elapsed(), result.is_ok()));
    result
}

/// Record an operation that cannot fail
pub(crate) fn record_success(
    metrics: &dyn MetricsRecorder,
    operation: Operation,
    timer: &TimedOperation,
) {
    metrics.record(MetricsSample::new(operation, timer.elapsed(), true));
}
