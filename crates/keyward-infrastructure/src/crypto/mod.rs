//! Cryptographic services module
//!
//! This module provides cryptographic primitives for:
//! - CSPRNG byte, string and salt generation
//! - SHA-256 / SHA-512 digests
//! - HMAC-SHA256 tags with constant-time verification
//! - AES-256-GCM and ChaCha20-Poly1305 authenticated encryption
//! - RSA-OAEP encryption with keypair generation
//!
//! Every public operation records one metrics sample.

mod asymmetric;
mod hash;
mod mac;
mod random;
mod symmetric;

pub use asymmetric::AsymmetricCipher;
pub use hash::HashProvider;
pub use mac::MessageAuthenticator;
pub use random::SecureRandom;
pub use symmetric::SymmetricCipher;
