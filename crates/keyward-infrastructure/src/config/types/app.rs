//! Main application configuration

use super::{AuthConfig, CryptoConfig, LoggingConfig, MetricsConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token and password settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Cipher settings
    #[serde(default)]
    pub crypto: CryptoConfig,
    /// Metrics registry settings
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
