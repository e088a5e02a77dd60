//! In-memory metrics registry
//!
//! Per-operation counters and a bounded latency history, held in a
//! concurrent map that is swapped out wholesale on reset.

use crate::constants::METRICS_MAX_LATENCY_SAMPLES;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{MetricsSample, MetricsSnapshot, Operation, OperationMetrics};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::trace;

/// Aggregated state for a single operation
#[derive(Debug, Default)]
struct OperationStats {
    /// Total attempts
    count: u64,
    /// Failed attempts
    errors: u64,
    /// Most recent latencies in milliseconds, oldest first
    latencies_ms: VecDeque<f64>,
}

impl OperationStats {
    fn push(&mut self, sample: &MetricsSample, max_samples: usize) {
        self.count += 1;
        if !sample.success() {
            self.errors += 1;
        }
        if max_samples == 0 {
            return;
        }
        if self.latencies_ms.len() == max_samples {
            self.latencies_ms.pop_front();
        }
        self.latencies_ms.push_back(sample.duration().as_secs_f64() * 1000.0);
    }

    fn summarize(&self) -> OperationMetrics {
        let latencies: Vec<f64> = self.latencies_ms.iter().copied().collect();
        OperationMetrics::from_samples(self.count, self.errors, &latencies)
    }
}

/// In-memory metrics registry
///
/// Constructed once by the host and shared as `Arc<dyn MetricsRecorder>`.
/// Each map entry is updated under its shard lock, so concurrent recorders
/// never lose increments. `reset` replaces the whole table in one atomic
/// store; samples racing with a reset land in the discarded table.
///
/// # Example
///
/// ```ignore
/// let metrics: Arc<dyn MetricsRecorder> = Arc::new(MetricsRegistry::new());
/// let random = SecureRandom::new(Arc::clone(&metrics));
/// random.random_bytes(16)?;
/// assert_eq!(metrics.snapshot().get(Operation::RandomGeneration).unwrap().count, 1);
/// ```
pub struct MetricsRegistry {
    /// Live table, replaced on reset
    table: ArcSwap<DashMap<Operation, OperationStats>>,
    /// Latency samples retained per operation
    max_samples: usize,
}

impl MetricsRegistry {
    /// Create a registry with the default latency history size
    pub fn new() -> Self {
        Self::with_max_samples(METRICS_MAX_LATENCY_SAMPLES)
    }

    /// Create a registry retaining at most `max_samples` latencies per operation
    pub fn with_max_samples(max_samples: usize) -> Self {
        Self {
            table: ArcSwap::from_pointee(DashMap::new()),
            max_samples,
        }
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for MetricsRegistry {
    fn record(&self, sample: MetricsSample) {
        let table = self.table.load();
        table
            .entry(sample.operation())
            .or_default()
            .push(&sample, self.max_samples);
        trace!(
            operation = %sample.operation(),
            success = sample.success(),
            latency_us = u64::try_from(sample.duration().as_micros()).unwrap_or(u64::MAX),
            "Operation recorded"
        );
    }

    fn snapshot(&self) -> MetricsSnapshot {
        let table = self.table.load();
        let operations = table
            .iter()
            .map(|entry| (entry.key().as_str().to_string(), entry.value().summarize()))
            .collect();
        MetricsSnapshot { operations }
    }

    fn reset(&self) {
        self.table.store(Arc::new(DashMap::new()));
        trace!("Metrics reset");
    }
}

/// Null metrics recorder
///
/// Discards every sample. For hosts that opt out of metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetricsRecorder;

impl NullMetricsRecorder {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsRecorder for NullMetricsRecorder {
    fn record(&self, _sample: MetricsSample) {
        // No-op
    }

    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::default()
    }

    fn reset(&self) {
        // No-op
    }
}
