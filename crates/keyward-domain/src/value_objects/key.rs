//! Key Material Value Objects
//!
//! Symmetric keys and RSA keypairs. Secret bytes live in zeroizing buffers
//! and are wiped when the value is dropped.

use super::cipher::SymmetricAlgorithm;
use crate::error::{Error, Result};
use std::fmt;
use zeroize::Zeroizing;

/// Value Object: Symmetric Key Material
///
/// Raw key bytes bound to the algorithm they were validated for.
///
/// ## Business Rules
///
/// - Length matches the declared algorithm
/// - Bytes are zeroed on drop
/// - `Debug` never prints the key
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: Zeroizing<Vec<u8>>,
    algorithm: SymmetricAlgorithm,
}

impl KeyMaterial {
    /// Wrap key bytes after checking their length against the algorithm
    pub fn new(bytes: Vec<u8>, algorithm: SymmetricAlgorithm) -> Result<Self> {
        let bytes = Zeroizing::new(bytes);
        if bytes.len() != algorithm.key_len() {
            return Err(Error::key(format!(
                "Invalid {} key length: expected {} bytes, got {}",
                algorithm,
                algorithm.key_len(),
                bytes.len()
            )));
        }
        Ok(Self { bytes, algorithm })
    }

    /// Algorithm the key was validated for
    pub fn algorithm(&self) -> SymmetricAlgorithm {
        self.algorithm
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for validated key material
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &self.algorithm)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Value Object: RSA Keypair
///
/// PKCS#8 private key and SPKI public key, both PEM encoded.
#[derive(Clone)]
pub struct RsaKeyPair {
    public_key: String,
    private_key: Zeroizing<String>,
    bits: usize,
}

impl RsaKeyPair {
    /// Assemble a keypair from PEM strings
    pub fn new(public_key: String, private_key: Zeroizing<String>, bits: usize) -> Self {
        Self {
            public_key,
            private_key,
            bits,
        }
    }

    /// SPKI public key PEM
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// PKCS#8 private key PEM
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.bits
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("public_key", &self.public_key)
            .field("bits", &self.bits)
            .finish_non_exhaustive()
    }
}
