//! Authenticated symmetric encryption (AES-256-GCM, ChaCha20-Poly1305)

use crate::metrics::track;
use aes_gcm::aead::{
    AeadInPlace, KeyInit, Nonce, OsRng as AeadOsRng, Tag, rand_core::RngCore as AeadRngCore,
};
use keyward_domain::error::{Error, Result};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{CipherEnvelope, KeyMaterial, Operation, SymmetricAlgorithm};
use std::sync::Arc;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// AEAD cipher bound to one algorithm
///
/// A fresh 12-byte nonce is drawn from the OS CSPRNG on every call; callers
/// never supply one. Keys are taken per call and never retained.
///
/// # Example
///
/// ```ignore
/// let cipher = SymmetricCipher::aes_256_gcm(metrics);
/// let key = cipher.generate_key()?;
/// let envelope = cipher.encrypt(b"secret", key.as_bytes(), Some(b"record-42"))?;
/// let plaintext = cipher.decrypt(&envelope, key.as_bytes(), Some(b"record-42"))?;
/// ```
#[derive(Clone)]
pub struct SymmetricCipher {
    algorithm: SymmetricAlgorithm,
    metrics: Arc<dyn MetricsRecorder>,
}

impl SymmetricCipher {
    /// Create a cipher for the given algorithm
    pub fn new(algorithm: SymmetricAlgorithm, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { algorithm, metrics }
    }

    /// AES-256 in Galois/Counter Mode
    pub fn aes_256_gcm(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self::new(SymmetricAlgorithm::Aes256Gcm, metrics)
    }

    /// ChaCha20 with Poly1305
    pub fn chacha20_poly1305(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self::new(SymmetricAlgorithm::ChaCha20Poly1305, metrics)
    }

    /// Algorithm this cipher is bound to
    pub fn algorithm(&self) -> SymmetricAlgorithm {
        self.algorithm
    }

    /// Generate a random key of the right length for this algorithm
    pub fn generate_key(&self) -> Result<KeyMaterial> {
        track(self.metrics.as_ref(), Operation::RandomGeneration, || {
            let mut bytes = vec![0u8; self.algorithm.key_len()];
            AeadOsRng.fill_bytes(&mut bytes);
            KeyMaterial::new(bytes, self.algorithm)
        })
    }

    /// Encrypt `plaintext`, binding `aad` into the tag when supplied
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<CipherEnvelope> {
        track(self.metrics.as_ref(), Operation::Encrypt, || {
            let key = KeyMaterial::new(key.to_vec(), self.algorithm)?;
            let mut buffer = plaintext.to_vec();
            let associated = aad.unwrap_or_default();

            let (nonce, tag) = match self.algorithm {
                SymmetricAlgorithm::Aes256Gcm => {
                    seal::<aes_gcm::Aes256Gcm>(key.as_bytes(), associated, &mut buffer)?
                }
                SymmetricAlgorithm::ChaCha20Poly1305 => seal::<chacha20poly1305::ChaCha20Poly1305>(
                    key.as_bytes(),
                    associated,
                    &mut buffer,
                )?,
            };

            debug!(
                algorithm = %self.algorithm,
                bytes = buffer.len(),
                aad = aad.is_some(),
                "Encrypted payload"
            );
            Ok(CipherEnvelope {
                algorithm: self.algorithm,
                nonce,
                ciphertext: buffer,
                tag,
                aad_bound: aad.is_some(),
            })
        })
    }

    /// Decrypt an envelope produced by [`SymmetricCipher::encrypt`]
    ///
    /// The same `aad` given at encryption must be supplied again.
    pub fn decrypt(
        &self,
        envelope: &CipherEnvelope,
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        track(self.metrics.as_ref(), Operation::Decrypt, || {
            self.check_envelope(envelope)?;
            let key = KeyMaterial::new(key.to_vec(), self.algorithm)?;
            let mut buffer = Zeroizing::new(envelope.ciphertext.clone());
            let associated = aad.unwrap_or_default();

            let opened = match self.algorithm {
                SymmetricAlgorithm::Aes256Gcm => open::<aes_gcm::Aes256Gcm>(
                    key.as_bytes(),
                    envelope,
                    associated,
                    &mut buffer,
                ),
                SymmetricAlgorithm::ChaCha20Poly1305 => {
                    open::<chacha20poly1305::ChaCha20Poly1305>(
                        key.as_bytes(),
                        envelope,
                        associated,
                        &mut buffer,
                    )
                }
            };
            if let Err(e) = opened {
                warn!(algorithm = %self.algorithm, "Envelope failed authentication");
                return Err(e);
            }

            Ok(std::mem::take(&mut *buffer))
        })
    }

    /// Decrypt the base64url text form of an envelope
    pub fn decrypt_encoded(
        &self,
        encoded: &str,
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let envelope = match CipherEnvelope::decode(encoded) {
            Ok(envelope) => envelope,
            // Still one sample for the rejected call
            Err(e) => return track(self.metrics.as_ref(), Operation::Decrypt, || Err(e)),
        };
        self.decrypt(&envelope, key, aad)
    }

    fn check_envelope(&self, envelope: &CipherEnvelope) -> Result<()> {
        if envelope.algorithm != self.algorithm {
            return Err(Error::validation(format!(
                "Envelope was produced by {}, cipher is {}",
                envelope.algorithm, self.algorithm
            )));
        }
        if envelope.nonce.len() != self.algorithm.nonce_len() {
            return Err(Error::validation(format!(
                "Invalid nonce length: expected {} bytes, got {}",
                self.algorithm.nonce_len(),
                envelope.nonce.len()
            )));
        }
        if envelope.tag.len() != self.algorithm.tag_len() {
            return Err(Error::validation(format!(
                "Invalid tag length: expected {} bytes, got {}",
                self.algorithm.tag_len(),
                envelope.tag.len()
            )));
        }
        Ok(())
    }
}

/// Encrypt `buffer` in place; returns `(nonce, tag)`
fn seal<A>(key: &[u8], aad: &[u8], buffer: &mut [u8]) -> Result<(Vec<u8>, Vec<u8>)>
where
    A: KeyInit + AeadInPlace,
{
    let cipher = A::new_from_slice(key).map_err(|e| Error::key(format!("Invalid key: {e}")))?;
    let nonce = A::generate_nonce(&mut AeadOsRng);
    let tag = cipher
        .encrypt_in_place_detached(&nonce, aad, buffer)
        .map_err(|e| Error::internal(format!("Encryption failed: {e}")))?;
    Ok((nonce.to_vec(), tag.to_vec()))
}

/// Decrypt `buffer` in place after verifying the tag
///
/// Nonce and tag lengths must already be checked.
fn open<A>(key: &[u8], envelope: &CipherEnvelope, aad: &[u8], buffer: &mut [u8]) -> Result<()>
where
    A: KeyInit + AeadInPlace,
{
    let cipher = A::new_from_slice(key).map_err(|e| Error::key(format!("Invalid key: {e}")))?;
    let nonce = Nonce::<A>::from_slice(&envelope.nonce);
    let tag = Tag::<A>::from_slice(&envelope.tag);
    cipher
        .decrypt_in_place_detached(nonce, aad, buffer, tag)
        .map_err(|_| {
            Error::authentication("Decryption failed: ciphertext, tag or associated data mismatch")
        })
}
