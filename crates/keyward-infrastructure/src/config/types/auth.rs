//! Authentication configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Token signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JwtAlgorithm {
    /// HMAC-SHA256 with a shared secret
    #[default]
    #[serde(rename = "HS256")]
    Hs256,
    /// RSA PKCS#1 v1.5 with SHA-256
    #[serde(rename = "RS256")]
    Rs256,
}

/// JWT configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Signature algorithm
    pub algorithm: JwtAlgorithm,

    /// HS256 shared secret
    ///
    /// **REQUIRED** for HS256. Configure via `KEYWARD__AUTH__JWT__SECRET`
    /// or `auth.jwt.secret` in the config file. At least 32 bytes.
    pub secret: String,

    /// RS256 private key (PEM file)
    pub private_key_path: Option<PathBuf>,

    /// RS256 public key (PEM file)
    pub public_key_path: Option<PathBuf>,

    /// Issuer stamped into and required from tokens
    pub issuer: String,

    /// Audience stamped into and required from tokens
    pub audience: String,

    /// Access token lifetime in seconds
    pub expiration_secs: u64,

    /// Refresh token lifetime in seconds
    pub refresh_expiration_secs: u64,

    /// Tolerated clock skew on expiry, in seconds
    pub leeway_secs: u64,
}

/// Returns default JWT configuration with:
/// - HS256 and an empty secret (MUST be configured)
/// - `service-api` issuer and `service-client` audience
/// - 1 hour access and 7 day refresh lifetimes
impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            algorithm: JwtAlgorithm::Hs256,
            secret: String::new(),
            private_key_path: None,
            public_key_path: None,
            issuer: JWT_DEFAULT_ISSUER.to_string(),
            audience: JWT_DEFAULT_AUDIENCE.to_string(),
            expiration_secs: JWT_DEFAULT_EXPIRATION_SECS,
            refresh_expiration_secs: JWT_REFRESH_EXPIRATION_SECS,
            leeway_secs: JWT_DEFAULT_LEEWAY_SECS,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_secs", &self.expiration_secs)
            .field("refresh_expiration_secs", &self.refresh_expiration_secs)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,

    /// Hashes allowed to run on the blocking pool at once
    pub max_concurrent_hashes: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: BCRYPT_DEFAULT_COST,
            max_concurrent_hashes: DEFAULT_MAX_CONCURRENT_HASHES,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    pub password: PasswordConfig,
}
