//! One-way digests

use crate::metrics::record_success;
use crate::utils::TimedOperation;
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::Operation;
use sha2::{Digest, Sha256, Sha512};
use std::sync::Arc;

/// SHA-2 digest provider
#[derive(Clone)]
pub struct HashProvider {
    metrics: Arc<dyn MetricsRecorder>,
}

impl HashProvider {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    /// Compute SHA-256 hash of data
    pub fn sha256(&self, data: &[u8]) -> [u8; 32] {
        let timer = TimedOperation::start();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(data));
        record_success(self.metrics.as_ref(), Operation::Hashing, &timer);
        digest
    }

    /// Compute SHA-512 hash of data
    pub fn sha512(&self, data: &[u8]) -> [u8; 64] {
        let timer = TimedOperation::start();
        let mut digest = [0u8; 64];
        digest.copy_from_slice(&Sha512::digest(data));
        record_success(self.metrics.as_ref(), Operation::Hashing, &timer);
        digest
    }

    /// Compute SHA-256 hash of data as hex string
    pub fn sha256_hex(&self, data: &[u8]) -> String {
        hex::encode(self.sha256(data))
    }

    /// Compute SHA-512 hash of data as hex string
    pub fn sha512_hex(&self, data: &[u8]) -> String {
        hex::encode(self.sha512(data))
    }
}
