//! # Keyward
//!
//! Credential and cryptographic primitives for services that issue tokens,
//! store passwords and protect secrets at rest.
//!
//! This crate is the public facade. [`Keyward`] wires every component to one
//! shared metrics recorder and exposes the function-level surface hosts call.
//! The domain and infrastructure crates are re-exported for callers that need
//! a single component or a custom wiring.
//!
//! ## Example
//!
//! ```ignore
//! use keyward::{Keyward, TokenPayload};
//!
//! let keyward = Keyward::load()?;
//!
//! let hash = keyward.hash_password("StrongPassword123!").await?;
//! assert!(keyward.compare_password("StrongPassword123!", hash.as_str()).await?);
//!
//! let pair = keyward.generate_tokens(&TokenPayload::new("u1"))?;
//! let claims = keyward.verify_token(&pair.access_token)?;
//! assert_eq!(claims.sub, "u1");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, value objects and port traits
//! - `infrastructure` - Component implementations, config, logging and metrics

mod builder;
mod service;

/// Domain layer - errors, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use keyward_domain::*;
}

/// Infrastructure layer - components, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use keyward_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use builder::KeywardBuilder;
pub use service::Keyward;
