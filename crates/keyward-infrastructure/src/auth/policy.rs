//! Password strength policy

use crate::metrics::record_success;
use crate::utils::TimedOperation;
use keyward_domain::constants::{
    PASSWORD_LONG_LENGTH, PASSWORD_MAX_LENGTH, PASSWORD_MAX_SCORE, PASSWORD_MIN_ACCEPTED_SCORE,
    PASSWORD_MIN_LENGTH,
};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{Operation, PasswordStrength};
use std::sync::Arc;
use tracing::debug;

/// Password strength policy
///
/// A password is accepted when it is 8 to 128 characters long and contains
/// a lowercase letter, an uppercase letter, a digit and a special character.
/// Character classes are ASCII; any other character counts as special.
///
/// The advisory score is `max(0, c - 1) + (len >= 16)`, capped at 4, where
/// `c` is the number of character classes present.
#[derive(Clone)]
pub struct PasswordPolicy {
    metrics: Arc<dyn MetricsRecorder>,
}

impl PasswordPolicy {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    /// Evaluate a candidate password
    ///
    /// `None` and `""` are reported with a single "required" reason.
    pub fn validate(&self, password: Option<&str>) -> PasswordStrength {
        let timer = TimedOperation::start();
        let strength = Self::assess(password);
        debug!(
            score = strength.score,
            is_valid = strength.is_valid,
            "Password strength evaluated"
        );
        record_success(self.metrics.as_ref(), Operation::PasswordValidation, &timer);
        strength
    }

    /// Evaluate without recording a metrics sample
    pub(crate) fn assess(password: Option<&str>) -> PasswordStrength {
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            return PasswordStrength {
                score: 0,
                is_valid: false,
                reasons: vec!["Password is required".to_string()],
            };
        };

        let length = password.chars().count();
        let classes = CharacterClasses::of(password);
        let mut reasons = Vec::new();

        if length < PASSWORD_MIN_LENGTH {
            reasons.push(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters long"
            ));
        }
        if length > PASSWORD_MAX_LENGTH {
            reasons.push(format!(
                "Password must be at most {PASSWORD_MAX_LENGTH} characters long"
            ));
        }
        if !classes.lowercase {
            reasons.push("Password must contain a lowercase letter".to_string());
        }
        if !classes.uppercase {
            reasons.push("Password must contain an uppercase letter".to_string());
        }
        if !classes.digit {
            reasons.push("Password must contain a digit".to_string());
        }
        if !classes.special {
            reasons.push("Password must contain a special character".to_string());
        }

        let satisfied = classes.count();
        let long_bonus = u8::from(length >= PASSWORD_LONG_LENGTH);
        let score = (satisfied.saturating_sub(1) + long_bonus).min(PASSWORD_MAX_SCORE);

        PasswordStrength {
            score,
            is_valid: score >= PASSWORD_MIN_ACCEPTED_SCORE && reasons.is_empty(),
            reasons,
        }
    }
}

/// Character classes present in a password
#[derive(Debug, Default, Clone, Copy)]
struct CharacterClasses {
    lowercase: bool,
    uppercase: bool,
    digit: bool,
    special: bool,
}

impl CharacterClasses {
    fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut classes, c| {
            match c {
                'a'..='z' => classes.lowercase = true,
                'A'..='Z' => classes.uppercase = true,
                '0'..='9' => classes.digit = true,
                _ => classes.special = true,
            }
            classes
        })
    }

    fn count(self) -> u8 {
        [self.lowercase, self.uppercase, self.digit, self.special]
            .into_iter()
            .map(u8::from)
            .sum()
    }
}
