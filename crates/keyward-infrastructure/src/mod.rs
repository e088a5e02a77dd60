//! # Infrastructure Layer
//!
//! Implementations of every Keyward component plus the cross-cutting
//! technical concerns they share.
//!
//! ## Module Categories
//!
//! ### Security & Authentication
//! | Module | Description |
//! |--------|-------------|
//! | [`crypto`] | CSPRNG, SHA-2, HMAC, AES-256-GCM / ChaCha20-Poly1305, RSA-OAEP |
//! | [`auth`] | Password policy, bcrypt hashing, JWT issuance and rotation |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-backed TOML and environment configuration |
//! | [`constants`] | Centralized configuration defaults |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`metrics`] | Per-operation counters, latency percentiles and error rates |
//! | [`logging`] | Structured logging with tracing |

pub mod auth;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error_ext;
pub mod logging;
pub mod metrics;
pub mod utils;

// Re-export commonly used types
pub use auth::{PasswordHasher, PasswordPolicy, SigningKeys, TokenService};
pub use config::{AppConfig, ConfigLoader};
pub use crypto::{
    AsymmetricCipher, HashProvider, MessageAuthenticator, SecureRandom, SymmetricCipher,
};
pub use error_ext::ErrorContext;
pub use metrics::{MetricsRegistry, NullMetricsRecorder};
pub use utils::{ManualClock, SystemClock, TimedOperation};
