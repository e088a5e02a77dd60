//! Message authentication

use crate::metrics::{record_success, track};
use crate::utils::TimedOperation;
use hmac::{Hmac, Mac};
use keyward_domain::error::{Error, Result};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::Operation;
use sha2::Sha256;
use std::sync::Arc;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 generation and verification
///
/// Verification compares tags in constant time and reports a mismatch as
/// `false` rather than an error.
#[derive(Clone)]
pub struct MessageAuthenticator {
    metrics: Arc<dyn MetricsRecorder>,
}

impl MessageAuthenticator {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    /// 32-byte HMAC-SHA256 tag of `data` under `key`
    ///
    /// Empty keys are accepted; HMAC pads them like any short key.
    pub fn hmac_sha256(&self, data: &[u8], key: &[u8]) -> Result<[u8; 32]> {
        track(self.metrics.as_ref(), Operation::HmacGeneration, || {
            let mut mac = keyed(key)?;
            mac.update(data);
            let mut tag = [0u8; 32];
            tag.copy_from_slice(&mac.finalize().into_bytes());
            Ok(tag)
        })
    }

    /// Whether `tag` authenticates `data` under `key`
    pub fn verify(&self, data: &[u8], key: &[u8], tag: &[u8]) -> bool {
        let timer = TimedOperation::start();
        let valid = match keyed(key) {
            Ok(mut mac) => {
                mac.update(data);
                mac.verify_slice(tag).is_ok()
            }
            Err(_) => false,
        };
        if !valid {
            debug!("HMAC verification failed");
        }
        record_success(self.metrics.as_ref(), Operation::HmacVerification, &timer);
        valid
    }
}

fn keyed(key: &[u8]) -> Result<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| Error::key(format!("HMAC initialization failed: {e}")))
}
