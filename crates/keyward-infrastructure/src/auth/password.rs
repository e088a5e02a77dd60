//! Password hashing service using bcrypt
//!
//! Every hash and comparison runs on the blocking thread pool behind a
//! semaphore that bounds how many run at once.

use super::policy::PasswordPolicy;
use crate::config::PasswordConfig;
use crate::constants::{BCRYPT_MAX_COST, BCRYPT_MAX_PASSWORD_BYTES, BCRYPT_MIN_COST};
use crate::error_ext::ErrorContext;
use crate::metrics::{finish, record_success};
use crate::utils::TimedOperation;
use keyward_domain::error::{Error, Result};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{Operation, PasswordHash};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Password hashing service using bcrypt
///
/// # Example
///
/// ```ignore
/// let hasher = PasswordHasher::new(&PasswordConfig::default(), metrics)?;
/// let hash = hasher.hash("StrongPassword123!").await?;
/// assert!(hasher.compare("StrongPassword123!", hash.as_str()).await?);
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    /// bcrypt work factor
    cost: u32,
    /// Admission to the blocking pool
    permits: Arc<Semaphore>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl PasswordHasher {
    /// Create a hasher from configuration
    pub fn new(config: &PasswordConfig, metrics: Arc<dyn MetricsRecorder>) -> Result<Self> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&config.bcrypt_cost) {
            return Err(Error::configuration(format!(
                "bcrypt cost {} outside {BCRYPT_MIN_COST}..={BCRYPT_MAX_COST}",
                config.bcrypt_cost
            )));
        }
        if config.max_concurrent_hashes == 0 {
            return Err(Error::configuration(
                "Password hashing pool needs at least one slot",
            ));
        }

        Ok(Self {
            cost: config.bcrypt_cost,
            permits: Arc::new(Semaphore::new(config.max_concurrent_hashes)),
            metrics,
        })
    }

    /// Configured work factor
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password that satisfies the strength policy
    ///
    /// Empty, whitespace-only and policy-violating passwords are rejected
    /// before any hashing work starts, as are passwords longer than the
    /// 72 bytes bcrypt actually reads.
    pub async fn hash(&self, password: &str) -> Result<PasswordHash> {
        let timer = TimedOperation::start();
        let result = self.hash_inner(password).await;
        finish(self.metrics.as_ref(), Operation::PasswordHash, &timer, result)
    }

    async fn hash_inner(&self, password: &str) -> Result<PasswordHash> {
        if password.trim().is_empty() {
            warn!("Rejected empty password");
            return Err(Error::validation_with_reasons(
                "Password does not meet requirements",
                vec!["Password is required".to_string()],
            ));
        }
        let strength = PasswordPolicy::assess(Some(password));
        if !strength.is_valid {
            warn!(score = strength.score, "Rejected weak password");
            return Err(Error::validation_with_reasons(
                "Password does not meet requirements",
                strength.reasons,
            ));
        }
        check_byte_length(password)?;

        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = self
            .run_blocking(move || {
                bcrypt::hash(password.as_bytes(), cost).context("bcrypt hashing failed")
            })
            .await?;

        debug!(cost, "Password hashed");
        PasswordHash::parse(&encoded)
    }

    /// Compare a password against a stored hash
    ///
    /// A wrong password yields `Ok(false)`. A malformed hash string, an
    /// empty password or one past the bcrypt byte limit is a validation error.
    pub async fn compare(&self, password: &str, hash: &str) -> Result<bool> {
        let timer = TimedOperation::start();
        let result = self.compare_inner(password, hash).await;
        finish(self.metrics.as_ref(), Operation::PasswordCompare, &timer, result)
    }

    async fn compare_inner(&self, password: &str, hash: &str) -> Result<bool> {
        let hash = PasswordHash::parse(hash)
            .inspect_err(|_| warn!("Rejected malformed password hash"))?;
        if password.is_empty() {
            return Err(Error::validation_with_reasons(
                "Password is required",
                vec!["Password is required".to_string()],
            ));
        }
        check_byte_length(password)?;

        let password = Zeroizing::new(password.to_owned());
        let matches = self
            .run_blocking(move || {
                bcrypt::verify(password.as_bytes(), hash.as_str()).map_err(|e| {
                    Error::validation_with_reasons("Malformed password hash", vec![e.to_string()])
                })
            })
            .await?;

        debug!(matches, "Password compared");
        Ok(matches)
    }

    /// Whether a stored hash was produced with a different cost than configured
    pub fn needs_rehash(&self, hash: &PasswordHash) -> bool {
        let timer = TimedOperation::start();
        let stale = hash.cost() != self.cost;
        record_success(self.metrics.as_ref(), Operation::PasswordValidation, &timer);
        stale
    }

    /// Run CPU-heavy work on the blocking pool once a slot is free
    async fn run_blocking<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .context("Password hashing pool closed")?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            work()
        })
        .await
        .context("Password hashing task failed")?
    }
}

/// Reject passwords bcrypt would silently truncate
///
/// Two passwords sharing their first 72 bytes produce the same bcrypt hash.
fn check_byte_length(password: &str) -> Result<()> {
    if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
        warn!(bytes = password.len(), "Rejected password past bcrypt limit");
        return Err(Error::validation_with_reasons(
            "Password does not meet requirements",
            vec![format!("Password must be at most {BCRYPT_MAX_PASSWORD_BYTES} bytes long")],
        ));
    }
    Ok(())
}
