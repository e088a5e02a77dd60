//! Token Value Objects
//!
//! Fixed-shape claims carried by issued tokens, the issuance payload and the
//! access/refresh pair returned by issuance and rotation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Purpose of a token, fixed at issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token presented on every request
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

impl TokenType {
    /// Wire name of the token type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value Object: Token Claims
///
/// Authenticated session assertion. The struct is closed: unknown claims in a
/// presented token are ignored and never surfaced to callers.
///
/// ## Business Rules
///
/// - `jti` is unique per issuance
/// - `exp > iat`
/// - `token_type` is fixed at issuance and checked on every verify/refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Subject email, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Subject role, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: u64,
    /// Expiration (unix seconds)
    pub exp: u64,
    /// Unique token identifier
    pub jti: String,
    /// Claims schema version
    pub version: u32,
    /// Access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl TokenClaims {
    /// Subject the token was issued for
    pub fn subject_id(&self) -> &str {
        &self.sub
    }

    /// Whether the token is expired at the given instant
    pub fn is_expired_at(&self, now_unix_secs: u64) -> bool {
        now_unix_secs >= self.exp
    }

    /// Remaining validity in seconds at the given instant (0 if expired)
    pub fn remaining_secs_at(&self, now_unix_secs: u64) -> u64 {
        self.exp.saturating_sub(now_unix_secs)
    }

    /// Issuance payload that reproduces this token's identity
    pub fn to_payload(&self) -> TokenPayload {
        TokenPayload {
            subject_id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Identity a token pair is issued for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject identifier (required, non-blank)
    pub subject_id: String,
    /// Optional email claim
    #[serde(default)]
    pub email: Option<String>,
    /// Optional role claim
    #[serde(default)]
    pub role: Option<String>,
}

impl TokenPayload {
    /// Payload with only a subject
    pub fn new<S: Into<String>>(subject_id: S) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: None,
            role: None,
        }
    }

    /// Attach an email claim
    #[must_use]
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach a role claim
    #[must_use]
    pub fn with_role<S: Into<String>>(mut self, role: S) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Value Object: Token Pair
///
/// Result of issuance or refresh. Both tokens are compact-serialized and
/// carry distinct `jti` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Compact access token
    pub access_token: String,
    /// Compact refresh token
    pub refresh_token: String,
    /// Token scheme, always `Bearer`
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    /// Access token identifier
    pub jti: String,
    /// Refresh token identifier
    pub refresh_jti: String,
}
