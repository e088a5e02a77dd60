//! Symmetric Encryption Value Objects
//!
//! The envelope produced by authenticated encryption, together with its
//! compact binary and text encodings.

use crate::constants::{
    AEAD_NONCE_LEN, AEAD_TAG_LEN, ENVELOPE_FLAG_AAD, ENVELOPE_FORMAT_VERSION, ENVELOPE_HEADER_LEN,
    SYMMETRIC_KEY_LEN,
};
use crate::error::{Error, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported AEAD algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymmetricAlgorithm {
    /// AES-256 in Galois/Counter Mode
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// ChaCha20 stream cipher with Poly1305 authenticator
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl SymmetricAlgorithm {
    /// Identifier byte used in the binary envelope encoding
    pub fn id(&self) -> u8 {
        match self {
            Self::Aes256Gcm => 1,
            Self::ChaCha20Poly1305 => 2,
        }
    }

    /// Resolve an identifier byte back to an algorithm
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Aes256Gcm),
            2 => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    /// Canonical algorithm name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }

    /// Required key length in bytes
    pub fn key_len(&self) -> usize {
        SYMMETRIC_KEY_LEN
    }

    /// Nonce length in bytes
    pub fn nonce_len(&self) -> usize {
        AEAD_NONCE_LEN
    }

    /// Authentication tag length in bytes
    pub fn tag_len(&self) -> usize {
        AEAD_TAG_LEN
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value Object: Cipher Envelope
///
/// Everything needed to decrypt besides the key (and the associated data, if
/// any was bound). The tag covers the ciphertext and the associated data.
///
/// Binary layout:
///
/// ```text
/// +---------+-----------+-------+-----------+---------+----------------+
/// | version | algorithm | flags | nonce(12) | tag(16) | ciphertext ... |
/// +---------+-----------+-------+-----------+---------+----------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherEnvelope {
    /// Algorithm that produced the envelope
    pub algorithm: SymmetricAlgorithm,
    /// Per-message nonce
    pub nonce: Vec<u8>,
    /// Encrypted payload, same length as the plaintext
    pub ciphertext: Vec<u8>,
    /// Authentication tag
    pub tag: Vec<u8>,
    /// Whether associated data was bound into the tag
    pub aad_bound: bool,
}

impl CipherEnvelope {
    /// Encode into the compact binary layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let flags = if self.aad_bound { ENVELOPE_FLAG_AAD } else { 0 };
        let mut out = Vec::with_capacity(
            ENVELOPE_HEADER_LEN + self.nonce.len() + self.tag.len() + self.ciphertext.len(),
        );
        out.push(ENVELOPE_FORMAT_VERSION);
        out.push(self.algorithm.id());
        out.push(flags);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Decode the compact binary layout
    ///
    /// Truncated input, unknown versions, unknown algorithms and unknown
    /// flag bits fail with a validation error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let min_len = ENVELOPE_HEADER_LEN + AEAD_NONCE_LEN + AEAD_TAG_LEN;
        if bytes.len() < min_len {
            return Err(Error::validation(format!(
                "Cipher envelope truncated: {} bytes, at least {} required",
                bytes.len(),
                min_len
            )));
        }

        let (header, body) = bytes.split_at(ENVELOPE_HEADER_LEN);
        if header[0] != ENVELOPE_FORMAT_VERSION {
            return Err(Error::validation(format!(
                "Unsupported cipher envelope version {}",
                header[0]
            )));
        }
        let algorithm = SymmetricAlgorithm::from_id(header[1]).ok_or_else(|| {
            Error::validation(format!("Unknown cipher envelope algorithm {}", header[1]))
        })?;
        let flags = header[2];
        if flags & !ENVELOPE_FLAG_AAD != 0 {
            return Err(Error::validation(format!(
                "Unknown cipher envelope flags {flags:#010b}"
            )));
        }

        let (nonce, rest) = body.split_at(AEAD_NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(AEAD_TAG_LEN);

        Ok(Self {
            algorithm,
            nonce: nonce.to_vec(),
            ciphertext: ciphertext.to_vec(),
            tag: tag.to_vec(),
            aad_bound: flags & ENVELOPE_FLAG_AAD != 0,
        })
    }

    /// Encode as URL-safe base64 text
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_bytes())
    }

    /// Decode URL-safe base64 text produced by [`CipherEnvelope::encode`]
    pub fn decode(text: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(text.trim())
            .map_err(|e| Error::validation(format!("Cipher envelope is not base64url: {e}")))?;
        Self::from_bytes(&bytes)
    }
}
