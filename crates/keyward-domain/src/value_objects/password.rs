//! Password Value Objects
//!
//! The self-describing output of adaptive password hashing and the result of
//! evaluating a candidate password against the strength policy.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// bcrypt variants accepted when parsing a stored hash
const BCRYPT_VARIANTS: [&str; 4] = ["2a", "2b", "2x", "2y"];

/// Length of the radix-64 salt segment
const BCRYPT_SALT_LEN: usize = 22;

/// Length of the radix-64 digest segment
const BCRYPT_DIGEST_LEN: usize = 31;

/// Offset of the salt segment: `$2b$12$`
const BCRYPT_SALT_OFFSET: usize = 7;

/// Value Object: Adaptive Password Hash
///
/// A bcrypt hash in modular crypt format (`$2b$<cost>$<salt><digest>`).
/// The string embeds every parameter needed to verify it later.
///
/// ## Business Rules
///
/// - Only well-formed bcrypt strings can be constructed
/// - Never reversible; consumed only by password comparison
/// - Never mutated once produced
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash {
    encoded: String,
    variant: String,
    cost: u32,
}

impl PasswordHash {
    /// Parse and validate a stored hash string
    ///
    /// Malformed input fails with a validation error rather than being
    /// treated as a non-matching hash.
    pub fn parse(encoded: &str) -> Result<Self> {
        let malformed = |detail: &str| {
            Error::validation_with_reasons("Malformed password hash", vec![detail.to_string()])
        };

        let mut parts = encoded.splitn(4, '$');
        let (Some(""), Some(variant), Some(cost), Some(rest)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected $<variant>$<cost>$<salt+digest>"));
        };

        if !BCRYPT_VARIANTS.contains(&variant) {
            return Err(malformed("unsupported hash algorithm"));
        }
        if cost.len() != 2 || !cost.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("cost must be two decimal digits"));
        }
        let cost: u32 = cost
            .parse()
            .map_err(|_| malformed("cost must be two decimal digits"))?;
        if !(4..=31).contains(&cost) {
            return Err(malformed("cost out of range"));
        }
        if rest.len() != BCRYPT_SALT_LEN + BCRYPT_DIGEST_LEN || !rest.bytes().all(is_bcrypt_radix64)
        {
            return Err(malformed("salt and digest must be 53 radix-64 characters"));
        }

        Ok(Self {
            encoded: encoded.to_string(),
            variant: variant.to_string(),
            cost,
        })
    }

    /// Algorithm tag, e.g. `2b`
    pub fn algorithm(&self) -> &str {
        &self.variant
    }

    /// Work factor the hash was produced with
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Radix-64 encoded salt
    pub fn salt(&self) -> &str {
        &self.encoded[BCRYPT_SALT_OFFSET..BCRYPT_SALT_OFFSET + BCRYPT_SALT_LEN]
    }

    /// Radix-64 encoded digest
    pub fn digest(&self) -> &str {
        &self.encoded[BCRYPT_SALT_OFFSET + BCRYPT_SALT_LEN..]
    }

    /// Full modular crypt string, suitable for storage
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

fn is_bcrypt_radix64(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'/'
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl FromStr for PasswordHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PasswordHash {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.encoded
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

/// Value Object: Password Strength Assessment
///
/// Advisory score plus the acceptance verdict and the ordered list of unmet
/// rules. An accepted password has an empty `reasons` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// Advisory strength score in `0..=4`
    pub score: u8,
    /// Whether the password satisfies every acceptance rule
    pub is_valid: bool,
    /// Human-readable reasons, one per unmet rule, deduplicated
    pub reasons: Vec<String>,
}
