//! Keyward Builder
//!
//! Builder pattern for constructing the facade with injected shared services.
//! Configuration is validated before any component is created.

use crate::service::Keyward;
use keyward_domain::error::Result;
use keyward_domain::ports::{Clock, MetricsRecorder};
use keyward_infrastructure::config::{AppConfig, MetricsConfig};
use keyward_infrastructure::config::loader::validate_app_config;
use keyward_infrastructure::{MetricsRegistry, NullMetricsRecorder, SystemClock};
use std::sync::Arc;
use tracing::debug;

/// Builder for [`Keyward`]
///
/// Anything left unset falls back to the default: [`AppConfig::default`],
/// the system clock and a recorder chosen by `metrics.enabled`.
#[derive(Default)]
pub struct KeywardBuilder {
    config: Option<AppConfig>,
    clock: Option<Arc<dyn Clock>>,
    metrics: Option<Arc<dyn MetricsRecorder>>,
}

impl KeywardBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application configuration
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the time source used for token issuance and expiry
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Share an existing metrics recorder instead of creating one
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate the configuration and wire every component
    ///
    /// # Errors
    /// Returns `Error::Configuration` for invalid settings and `Error::Key`
    /// when the configured signing keys cannot be parsed.
    pub fn build(self) -> Result<Keyward> {
        let config = self.config.unwrap_or_default();
        validate_app_config(&config)?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let metrics = self
            .metrics
            .unwrap_or_else(|| default_recorder(&config.metrics));

        debug!(
            algorithm = ?config.auth.jwt.algorithm,
            bcrypt_cost = config.auth.password.bcrypt_cost,
            metrics_enabled = config.metrics.enabled,
            "Building keyward"
        );
        Keyward::assemble(&config, clock, metrics)
    }
}

fn default_recorder(config: &MetricsConfig) -> Arc<dyn MetricsRecorder> {
    if config.enabled {
        Arc::new(MetricsRegistry::with_max_samples(config.max_latency_samples))
    } else {
        Arc::new(NullMetricsRecorder)
    }
}
