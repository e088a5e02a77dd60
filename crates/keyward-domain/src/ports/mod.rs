//! Domain Port Interfaces
//!
//! Traits at the seams between the domain and its infrastructure. Components
//! depend on these abstractions; hosts inject the implementations.

/// Infrastructure ports (metrics, time)
pub mod infrastructure;

pub use infrastructure::{Clock, MetricsRecorder};
