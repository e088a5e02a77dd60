//! # Domain Layer
//!
//! Core credential types, ports and the error taxonomy for Keyward.
//!
//! This crate holds no cryptographic implementations. It defines the values
//! components exchange with their callers and the seams where the host
//! injects shared services.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Typed error taxonomy and `Result` alias |
//! | [`value_objects`] | Hashes, claims, envelopes, keys, metrics samples |
//! | [`ports`] | `MetricsRecorder` and `Clock` traits |
//! | [`constants`] | Policy limits and wire-format constants |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorKind, Result};
pub use ports::{Clock, MetricsRecorder};
pub use value_objects::*;
