//! Domain layer constants
//!
//! Contains constants that are part of the credential domain rules.
//! Infrastructure defaults (lifetimes, costs, key sizes) live in
//! `keyward_infrastructure::constants`.

// ============================================================================
// PASSWORD POLICY CONSTANTS
// ============================================================================

/// Minimum accepted password length (Unicode scalar values)
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum accepted password length (Unicode scalar values)
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Length at which a password earns the bonus strength point
pub const PASSWORD_LONG_LENGTH: usize = 16;

/// Highest strength score a password can reach
pub const PASSWORD_MAX_SCORE: u8 = 4;

/// Lowest score an acceptable password must reach
pub const PASSWORD_MIN_ACCEPTED_SCORE: u8 = 3;

// ============================================================================
// TOKEN CONSTANTS
// ============================================================================

/// Schema version stamped into every issued token
pub const TOKEN_SCHEMA_VERSION: u32 = 1;

/// Token scheme reported in every token pair
pub const TOKEN_SCHEME: &str = "Bearer";

// ============================================================================
// SYMMETRIC ENVELOPE CONSTANTS
// ============================================================================

/// Key length shared by every supported AEAD algorithm (bytes)
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// Nonce length shared by every supported AEAD algorithm (bytes)
pub const AEAD_NONCE_LEN: usize = 12;

/// Authentication tag length shared by every supported AEAD algorithm (bytes)
pub const AEAD_TAG_LEN: usize = 16;

/// Version byte leading the binary envelope encoding
pub const ENVELOPE_FORMAT_VERSION: u8 = 1;

/// Envelope flag bit set when associated data was bound at encryption
pub const ENVELOPE_FLAG_AAD: u8 = 0b0000_0001;

/// Length of the fixed envelope header: version, algorithm, flags
pub const ENVELOPE_HEADER_LEN: usize = 3;

// ============================================================================
// METRICS CONSTANTS
// ============================================================================

/// Percentile reported as the tail latency
pub const METRICS_TAIL_PERCENTILE: f64 = 0.95;
