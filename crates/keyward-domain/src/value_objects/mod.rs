//! Domain Value Objects
//!
//! Immutable value objects that represent credential and cryptographic
//! concepts. Value objects are defined by their attributes and are never
//! mutated in place.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`PasswordHash`] | Self-describing adaptive password hash |
//! | [`PasswordStrength`] | Strength score and policy verdict |
//! | [`TokenClaims`] | Fixed-shape token assertion |
//! | [`TokenPair`] | Access and refresh tokens from issuance or rotation |
//! | [`CipherEnvelope`] | Nonce, ciphertext and tag from AEAD encryption |
//! | [`KeyMaterial`] | Length-validated symmetric key |
//! | [`RsaKeyPair`] | PEM encoded RSA keypair |
//! | [`MetricsSample`] | One completed operation |

/// Symmetric encryption value objects
pub mod cipher;
/// Key material value objects
pub mod key;
/// Operation metrics value objects
pub mod metrics;
/// Password value objects
pub mod password;
/// Token value objects
pub mod token;

// Re-export commonly used value objects
pub use cipher::{CipherEnvelope, SymmetricAlgorithm};
pub use key::{KeyMaterial, RsaKeyPair};
pub use metrics::{MetricsSample, MetricsSnapshot, Operation, OperationMetrics, format_error_rate};
pub use password::{PasswordHash, PasswordStrength};
pub use token::{TokenClaims, TokenPair, TokenPayload, TokenType};
