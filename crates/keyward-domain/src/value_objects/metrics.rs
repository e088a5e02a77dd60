//! Metrics Value Objects
//!
//! Immutable samples recorded by every public operation and the aggregated
//! per-operation view built from them.

use crate::constants::METRICS_TAIL_PERCENTILE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Named operations tracked by the metrics recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// Secure random generation
    RandomGeneration,
    /// SHA-256 / SHA-512 digest
    Hashing,
    /// HMAC tag generation
    HmacGeneration,
    /// HMAC tag verification
    HmacVerification,
    /// Symmetric encryption
    Encrypt,
    /// Symmetric decryption
    Decrypt,
    /// RSA keypair generation
    RsaKeyGeneration,
    /// RSA-OAEP encryption
    RsaEncrypt,
    /// RSA-OAEP decryption
    RsaDecrypt,
    /// Password strength evaluation
    PasswordValidation,
    /// Adaptive password hashing
    PasswordHash,
    /// Password comparison against a stored hash
    PasswordCompare,
    /// Token pair issuance
    TokenGeneration,
    /// Token verification
    TokenVerification,
    /// Token pair rotation
    TokenRefresh,
}

impl Operation {
    /// Every tracked operation
    pub const ALL: [Operation; 15] = [
        Self::RandomGeneration,
        Self::Hashing,
        Self::HmacGeneration,
        Self::HmacVerification,
        Self::Encrypt,
        Self::Decrypt,
        Self::RsaKeyGeneration,
        Self::RsaEncrypt,
        Self::RsaDecrypt,
        Self::PasswordValidation,
        Self::PasswordHash,
        Self::PasswordCompare,
        Self::TokenGeneration,
        Self::TokenVerification,
        Self::TokenRefresh,
    ];

    /// Metric name of the operation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RandomGeneration => "randomGeneration",
            Self::Hashing => "hashing",
            Self::HmacGeneration => "hmacGeneration",
            Self::HmacVerification => "hmacVerification",
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::RsaKeyGeneration => "rsaKeyGeneration",
            Self::RsaEncrypt => "rsaEncrypt",
            Self::RsaDecrypt => "rsaDecrypt",
            Self::PasswordValidation => "passwordValidation",
            Self::PasswordHash => "passwordHash",
            Self::PasswordCompare => "passwordCompare",
            Self::TokenGeneration => "tokenGeneration",
            Self::TokenVerification => "tokenVerification",
            Self::TokenRefresh => "tokenRefresh",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value Object: Metrics Sample
///
/// One completed operation. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSample {
    operation: Operation,
    duration: Duration,
    success: bool,
}

impl MetricsSample {
    /// Build a sample for a finished operation
    pub fn new(operation: Operation, duration: Duration, success: bool) -> Self {
        Self {
            operation,
            duration,
            success,
        }
    }

    /// Operation the sample belongs to
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Wall-clock duration of the operation
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the operation returned successfully
    pub fn success(&self) -> bool {
        self.success
    }
}

/// Aggregated metrics for one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OperationMetrics {
    /// Total attempts, successful or not
    pub count: u64,
    /// Failed attempts
    pub errors: u64,
    /// Mean latency in milliseconds over the retained samples
    pub average_latency_ms: f64,
    /// 95th percentile latency in milliseconds over the retained samples
    ///
    /// Not bounded below by the average: one outlier among many fast
    /// samples can lift the mean above it.
    pub p95_latency_ms: f64,
    /// `errors / count` as a percentage with two decimals, e.g. `"25.00%"`
    pub error_rate: String,
}

impl OperationMetrics {
    /// Aggregate counters and retained latency samples (milliseconds)
    #[allow(clippy::cast_precision_loss)]
    pub fn from_samples(count: u64, errors: u64, latencies_ms: &[f64]) -> Self {
        let average_latency_ms = if latencies_ms.is_empty() {
            0.0
        } else {
            latencies_ms.iter().sum::<f64>() / latencies_ms.len() as f64
        };

        Self {
            count,
            errors,
            average_latency_ms,
            p95_latency_ms: percentile(latencies_ms, METRICS_TAIL_PERCENTILE),
            error_rate: format_error_rate(errors, count),
        }
    }
}

/// Percentile by sorted index `floor(n * p)`, clamped to the last sample
///
/// This is a true order statistic, so on skewed data it can fall below the
/// mean. 95 samples of 0 ms, 4 of 1 ms and one of 1000 ms give p95 = 1 ms
/// against an average of 10.04 ms.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentile(samples: &[f64], p: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let index = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Error rate as a two-decimal percentage string
#[allow(clippy::cast_precision_loss)]
pub fn format_error_rate(errors: u64, attempts: u64) -> String {
    if attempts == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", errors as f64 / attempts as f64 * 100.0)
}

/// Point-in-time view of every recorded operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricsSnapshot {
    /// Metrics keyed by operation name
    pub operations: BTreeMap<String, OperationMetrics>,
}

impl MetricsSnapshot {
    /// Metrics for one operation, if it has been recorded since the last reset
    pub fn get(&self, operation: Operation) -> Option<&OperationMetrics> {
        self.operations.get(operation.as_str())
    }

    /// Whether nothing has been recorded since the last reset
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
