//! Cipher configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Cipher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// RSA modulus size for generated keypairs
    pub rsa_key_bits: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            rsa_key_bits: RSA_DEFAULT_KEY_BITS,
        }
    }
}
