//! Configuration management
//!
//! Typed configuration sections with defaults, loaded through figment from
//! an optional TOML file and `KEYWARD__` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
