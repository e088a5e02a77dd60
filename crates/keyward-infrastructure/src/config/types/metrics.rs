//! Metrics configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Record samples; when disabled a null recorder is installed
    pub enabled: bool,

    /// Latency samples retained per operation
    pub max_latency_samples: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_latency_samples: METRICS_MAX_LATENCY_SAMPLES,
        }
    }
}
