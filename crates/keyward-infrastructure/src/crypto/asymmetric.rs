//! RSA-OAEP encryption with keypair generation

use crate::constants::{RSA_DEFAULT_KEY_BITS, RSA_MIN_KEY_BITS, RSA_OAEP_SHA256_OVERHEAD};
use crate::error_ext::ErrorContext;
use crate::metrics::track;
use aes_gcm::aead::OsRng as AeadOsRng;
use keyward_domain::error::{Error, Result};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{Operation, RsaKeyPair};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// RSA-OAEP (SHA-256) cipher
///
/// Keys travel as PEM: SPKI for public keys, PKCS#8 for private keys.
/// Plaintexts longer than one OAEP block are rejected, never truncated.
#[derive(Clone)]
pub struct AsymmetricCipher {
    key_bits: usize,
    metrics: Arc<dyn MetricsRecorder>,
}

impl AsymmetricCipher {
    /// Cipher generating 2048-bit keypairs
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            key_bits: RSA_DEFAULT_KEY_BITS,
            metrics,
        }
    }

    /// Cipher generating keypairs with the given modulus size
    pub fn with_key_bits(key_bits: usize, metrics: Arc<dyn MetricsRecorder>) -> Result<Self> {
        if key_bits < RSA_MIN_KEY_BITS {
            return Err(Error::invalid_argument(format!(
                "RSA modulus of {key_bits} bits is below the {RSA_MIN_KEY_BITS}-bit minimum"
            )));
        }
        Ok(Self { key_bits, metrics })
    }

    /// Modulus size of generated keypairs
    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    /// Generate a fresh keypair
    pub fn generate_key_pair(&self) -> Result<RsaKeyPair> {
        track(self.metrics.as_ref(), Operation::RsaKeyGeneration, || {
            let private = RsaPrivateKey::new(&mut AeadOsRng, self.key_bits)
                .context("RSA key generation failed")?;
            let public = RsaPublicKey::from(&private);

            let private_pem = private
                .to_pkcs8_pem(LineEnding::LF)
                .context("Failed to encode private key")?;
            let public_pem = public
                .to_public_key_pem(LineEnding::LF)
                .context("Failed to encode public key")?;

            info!(bits = self.key_bits, "Generated RSA keypair");
            Ok(RsaKeyPair::new(public_pem, private_pem, self.key_bits))
        })
    }

    /// Encrypt one OAEP block under `public_key_pem`
    pub fn encrypt(&self, plaintext: &[u8], public_key_pem: &str) -> Result<Vec<u8>> {
        track(self.metrics.as_ref(), Operation::RsaEncrypt, || {
            let public = parse_public_key(public_key_pem)?;
            let max = oaep_capacity(&public);
            if plaintext.len() > max {
                warn!(len = plaintext.len(), max, "RSA plaintext exceeds block size");
                return Err(Error::invalid_argument(format!(
                    "Plaintext of {} bytes exceeds the {max}-byte OAEP limit for this key",
                    plaintext.len()
                )));
            }

            let ciphertext = public
                .encrypt(&mut AeadOsRng, Oaep::new::<Sha256>(), plaintext)
                .context("RSA encryption failed")?;
            debug!(bytes = plaintext.len(), "RSA encrypted block");
            Ok(ciphertext)
        })
    }

    /// Decrypt one OAEP block with `private_key_pem`
    ///
    /// A non-matching key and a corrupted ciphertext both fail authentication.
    pub fn decrypt(&self, ciphertext: &[u8], private_key_pem: &str) -> Result<Vec<u8>> {
        track(self.metrics.as_ref(), Operation::RsaDecrypt, || {
            let private = RsaPrivateKey::from_pkcs8_pem(private_key_pem)
                .key_context("Invalid RSA private key")?;
            private
                .decrypt(Oaep::new::<Sha256>(), ciphertext)
                .inspect_err(|_| warn!("RSA ciphertext failed OAEP decoding"))
                .auth_context("RSA decryption failed")
        })
    }

    /// Largest plaintext in bytes that `public_key_pem` can encrypt
    pub fn max_plaintext_len(&self, public_key_pem: &str) -> Result<usize> {
        track(self.metrics.as_ref(), Operation::RsaEncrypt, || {
            parse_public_key(public_key_pem).map(|key| oaep_capacity(&key))
        })
    }
}

fn parse_public_key(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).key_context("Invalid RSA public key")
}

fn oaep_capacity(key: &RsaPublicKey) -> usize {
    key.size().saturating_sub(RSA_OAEP_SHA256_OVERHEAD)
}
