//! Infrastructure Ports
//!
//! Cross-cutting services every component consumes.

/// Time source port
pub mod clock;
/// Metrics recording port
pub mod metrics;

pub use clock::Clock;
pub use metrics::MetricsRecorder;
