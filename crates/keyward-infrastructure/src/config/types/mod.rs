//! Configuration types module

pub mod app;
pub mod auth;
pub mod crypto;
pub mod logging;
pub mod metrics;

// Re-export main types
pub use app::AppConfig;
pub use auth::{AuthConfig, JwtAlgorithm, JwtConfig, PasswordConfig};
pub use crypto::CryptoConfig;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
