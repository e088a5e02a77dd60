//! Error handling types

use std::fmt;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Keyward
///
/// Every variant is raised synchronously to the immediate caller. Crypto
/// failures are not transient, so nothing in the library retries.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad, missing or weak input caught before any crypto executes
    #[error("Validation error: {message}")]
    Validation {
        /// Summary of the rejected input
        message: String,
        /// Individual rule violations, in evaluation order
        reasons: Vec<String>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Wrong key length, type or encoding
    #[error("Key error: {message}")]
    Key {
        /// Description of the key problem
        message: String,
    },

    /// Tag, signature or MAC mismatch, or decryption with the wrong key
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the authentication failure
        message: String,
    },

    /// Token is structurally broken or its signature does not verify
    #[error("Malformed token: {message}")]
    TokenMalformed {
        /// Description of the structural problem
        message: String,
    },

    /// Token expiry has passed
    #[error("Token expired at {expired_at}")]
    TokenExpired {
        /// Unix timestamp (seconds) the token expired at
        expired_at: u64,
    },

    /// Token issuer, audience or schema version is not the expected one
    #[error("Invalid token: {message}")]
    TokenInvalid {
        /// Description of the rejected claim
        message: String,
    },

    /// An access token was presented where a refresh token is required (or vice versa)
    #[error("Token type mismatch: expected {expected}, got {actual}")]
    TokenTypeMismatch {
        /// Token type the operation requires
        expected: String,
        /// Token type carried by the presented token
        actual: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Discriminant of [`Error`] without payload
///
/// Useful for matching in tests and for structured logging fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Validation`]
    Validation,
    /// See [`Error::InvalidArgument`]
    InvalidArgument,
    /// See [`Error::Key`]
    Key,
    /// See [`Error::Authentication`]
    Authentication,
    /// See [`Error::TokenMalformed`]
    TokenMalformed,
    /// See [`Error::TokenExpired`]
    TokenExpired,
    /// See [`Error::TokenInvalid`]
    TokenInvalid,
    /// See [`Error::TokenTypeMismatch`]
    TokenTypeMismatch,
    /// See [`Error::Configuration`]
    Configuration,
    /// See [`Error::Json`]
    Json,
    /// See [`Error::Internal`]
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "ValidationError",
            Self::InvalidArgument => "InvalidArgument",
            Self::Key => "KeyError",
            Self::Authentication => "AuthenticationError",
            Self::TokenMalformed => "TokenMalformed",
            Self::TokenExpired => "TokenExpired",
            Self::TokenInvalid => "TokenInvalid",
            Self::TokenTypeMismatch => "TokenTypeMismatch",
            Self::Configuration => "ConfigurationError",
            Self::Json => "JsonError",
            Self::Internal => "InternalError",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Payload-free discriminant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Key { .. } => ErrorKind::Key,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::TokenMalformed { .. } => ErrorKind::TokenMalformed,
            Self::TokenExpired { .. } => ErrorKind::TokenExpired,
            Self::TokenInvalid { .. } => ErrorKind::TokenInvalid,
            Self::TokenTypeMismatch { .. } => ErrorKind::TokenTypeMismatch,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Json { .. } => ErrorKind::Json,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

// Input error creation methods
impl Error {
    /// Create a validation error with no individual reasons
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            reasons: Vec::new(),
        }
    }

    /// Create a validation error carrying the rule violations that caused it
    pub fn validation_with_reasons<S: Into<String>>(message: S, reasons: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            reasons,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// Crypto error creation methods
impl Error {
    /// Create a key error
    pub fn key<S: Into<String>>(message: S) -> Self {
        Self::Key {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }
}

// Token error creation methods
impl Error {
    /// Create a malformed token error
    pub fn token_malformed<S: Into<String>>(message: S) -> Self {
        Self::TokenMalformed {
            message: message.into(),
        }
    }

    /// Create an expired token error
    pub fn token_expired(expired_at: u64) -> Self {
        Self::TokenExpired { expired_at }
    }

    /// Create an invalid token error
    pub fn token_invalid<S: Into<String>>(message: S) -> Self {
        Self::TokenInvalid {
            message: message.into(),
        }
    }

    /// Create a token type mismatch error
    pub fn token_type_mismatch<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        Self::TokenTypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
