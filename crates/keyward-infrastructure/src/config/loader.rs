//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::{AppConfig, JwtAlgorithm};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use keyward_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `KEYWARD__AUTH__JWT__SECRET`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys (e.g., KEYWARD__AUTH__JWT__SECRET)
        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_jwt_config(config)?;
    validate_password_config(config)?;
    validate_crypto_config(config)?;
    validate_logging_config(config)?;
    Ok(())
}

fn validate_jwt_config(config: &AppConfig) -> Result<()> {
    let jwt = &config.auth.jwt;
    match jwt.algorithm {
        JwtAlgorithm::Hs256 => {
            if jwt.secret.is_empty() {
                return Err(Error::configuration(
                    "JWT secret cannot be empty when HS256 is selected",
                ));
            }
            if jwt.secret.len() < JWT_MIN_SECRET_LEN {
                return Err(Error::configuration(format!(
                    "JWT secret should be at least {JWT_MIN_SECRET_LEN} characters long"
                )));
            }
        }
        JwtAlgorithm::Rs256 => {
            for (name, path) in [
                ("private_key_path", &jwt.private_key_path),
                ("public_key_path", &jwt.public_key_path),
            ] {
                match path {
                    Some(path) if path.exists() => {}
                    Some(path) => {
                        return Err(Error::configuration(format!(
                            "RS256 {name} does not exist: {}",
                            path.display()
                        )));
                    }
                    None => {
                        return Err(Error::configuration(format!(
                            "RS256 requires {name} to be set"
                        )));
                    }
                }
            }
        }
    }
    if jwt.expiration_secs == 0 {
        return Err(Error::configuration("Access token lifetime cannot be 0"));
    }
    if jwt.refresh_expiration_secs < jwt.expiration_secs {
        return Err(Error::configuration(
            "Refresh token lifetime cannot be shorter than the access token lifetime",
        ));
    }
    if jwt.issuer.trim().is_empty() || jwt.audience.trim().is_empty() {
        return Err(Error::configuration("JWT issuer and audience cannot be empty"));
    }
    Ok(())
}

fn validate_password_config(config: &AppConfig) -> Result<()> {
    let password = &config.auth.password;
    if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&password.bcrypt_cost) {
        return Err(Error::configuration(format!(
            "bcrypt cost must be within {BCRYPT_MIN_COST}..={BCRYPT_MAX_COST}, got {}",
            password.bcrypt_cost
        )));
    }
    if password.max_concurrent_hashes == 0 {
        return Err(Error::configuration(
            "Concurrent password hashes cannot be 0",
        ));
    }
    Ok(())
}

fn validate_crypto_config(config: &AppConfig) -> Result<()> {
    if config.crypto.rsa_key_bits < RSA_MIN_KEY_BITS {
        return Err(Error::configuration(format!(
            "RSA key size must be at least {RSA_MIN_KEY_BITS} bits, got {}",
            config.crypto.rsa_key_bits
        )));
    }
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    crate::logging::parse_log_level(&config.logging.level).map(|_| ())
}
