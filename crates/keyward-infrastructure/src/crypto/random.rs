//! Secure random generation

use crate::constants::{DEFAULT_SALT_LEN, MAX_RANDOM_BYTES};
use crate::metrics::track;
use aes_gcm::aead::{OsRng as AeadOsRng, rand_core::RngCore as AeadRngCore};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use keyward_domain::error::{Error, Result};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::Operation;
use std::sync::Arc;
use tracing::warn;

/// Secure random generation
///
/// Every value comes from the operating system CSPRNG.
#[derive(Clone)]
pub struct SecureRandom {
    metrics: Arc<dyn MetricsRecorder>,
}

impl SecureRandom {
    /// Create a generator reporting to the given recorder
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    /// `n` random bytes; `n = 0` yields an empty buffer
    pub fn random_bytes(&self, n: usize) -> Result<Vec<u8>> {
        track(self.metrics.as_ref(), Operation::RandomGeneration, || {
            fill(n)
        })
    }

    /// Exactly `n` characters from the URL-safe base64 alphabet
    pub fn random_string(&self, n: usize) -> Result<String> {
        track(self.metrics.as_ref(), Operation::RandomGeneration, || {
            // Every 3 bytes encode to 4 characters
            let bytes = fill(n.div_ceil(4) * 3)?;
            let mut encoded = URL_SAFE_NO_PAD.encode(bytes);
            encoded.truncate(n);
            Ok(encoded)
        })
    }

    /// `n` random bytes as lowercase hex (`2n` characters)
    pub fn random_hex(&self, n: usize) -> Result<String> {
        track(self.metrics.as_ref(), Operation::RandomGeneration, || {
            fill(n).map(hex::encode)
        })
    }

    /// Random salt of `n` bytes
    pub fn salt(&self, n: usize) -> Result<Vec<u8>> {
        self.random_bytes(n)
    }

    /// Random salt of the default length (32 bytes)
    pub fn default_salt(&self) -> Result<Vec<u8>> {
        self.salt(DEFAULT_SALT_LEN)
    }
}

fn fill(n: usize) -> Result<Vec<u8>> {
    if n > MAX_RANDOM_BYTES {
        warn!(requested = n, "Random buffer request rejected");
        return Err(Error::invalid_argument(format!(
            "Requested {n} random bytes, at most {MAX_RANDOM_BYTES} allowed"
        )));
    }
    let mut bytes = vec![0u8; n];
    AeadOsRng.fill_bytes(&mut bytes);
    Ok(bytes)
}
