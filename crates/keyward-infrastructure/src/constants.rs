//! Infrastructure layer constants
//!
//! Defaults for every configurable knob. Domain-level rules (password length
//! bounds, envelope layout) live in `keyward_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "keyward.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "keyward";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "KEYWARD";

/// Separator for nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// AUTHENTICATION CONSTANTS
// ============================================================================

/// Access token lifetime in seconds (1 hour)
pub const JWT_DEFAULT_EXPIRATION_SECS: u64 = 3600;

/// Refresh token lifetime in seconds (7 days)
pub const JWT_REFRESH_EXPIRATION_SECS: u64 = 604_800;

/// Default issuer stamped into tokens
pub const JWT_DEFAULT_ISSUER: &str = "service-api";

/// Default audience stamped into tokens
pub const JWT_DEFAULT_AUDIENCE: &str = "service-client";

/// Minimum HS256 secret length in bytes
pub const JWT_MIN_SECRET_LEN: usize = 32;

/// Default clock skew tolerance on expiry checks
pub const JWT_DEFAULT_LEEWAY_SECS: u64 = 0;

/// Default bcrypt cost
pub const BCRYPT_DEFAULT_COST: u32 = 12;

/// Lowest bcrypt cost the algorithm accepts
pub const BCRYPT_MIN_COST: u32 = 4;

/// Highest bcrypt cost the algorithm accepts
pub const BCRYPT_MAX_COST: u32 = 31;

/// bcrypt ignores every byte of the password past this length
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// Default number of password hashes allowed to run at once
pub const DEFAULT_MAX_CONCURRENT_HASHES: usize = 4;

// ============================================================================
// CRYPTO CONSTANTS
// ============================================================================

/// Default RSA modulus size in bits
pub const RSA_DEFAULT_KEY_BITS: usize = 2048;

/// Smallest RSA modulus accepted
pub const RSA_MIN_KEY_BITS: usize = 2048;

/// OAEP-SHA256 padding overhead in bytes (`2 * hash_len + 2`)
pub const RSA_OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

/// Largest single random buffer handed out
pub const MAX_RANDOM_BYTES: usize = 1024 * 1024;

/// Default salt length in bytes
pub const DEFAULT_SALT_LEN: usize = 32;

// ============================================================================
// METRICS CONSTANTS
// ============================================================================

/// Latency samples retained per operation
pub const METRICS_MAX_LATENCY_SAMPLES: usize = 1000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "KEYWARD_LOG";

/// Default log file name prefix when writing to a directory
pub const DEFAULT_LOG_FILE_PREFIX: &str = "keyward";
