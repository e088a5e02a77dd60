//! Keyward facade service
//!
//! One value owning every component, all sharing the same metrics recorder
//! and clock. Methods delegate without adding behaviour, so each call records
//! exactly the sample its component records.

use crate::builder::KeywardBuilder;
use keyward_domain::error::Result;
use keyward_domain::ports::{Clock, MetricsRecorder};
use keyward_domain::value_objects::{
    CipherEnvelope, KeyMaterial, MetricsSnapshot, PasswordHash, PasswordStrength, RsaKeyPair,
    SymmetricAlgorithm, TokenClaims, TokenPair, TokenPayload,
};
use keyward_infrastructure::config::{AppConfig, ConfigLoader};
use keyward_infrastructure::{
    AsymmetricCipher, HashProvider, MessageAuthenticator, PasswordHasher, PasswordPolicy,
    SecureRandom, SymmetricCipher, TokenService,
};
use std::sync::Arc;

/// Credential and crypto facade
///
/// # Example
///
/// ```ignore
/// let keyward = Keyward::builder()
///     .with_config(config)
///     .with_clock(Arc::new(ManualClock::starting_now()))
///     .build()?;
///
/// let key = keyward.generate_key(SymmetricAlgorithm::Aes256Gcm)?;
/// let envelope = keyward.encrypt_aes(b"secret", key.as_bytes(), None)?;
/// assert_eq!(keyward.decrypt_aes(&envelope, key.as_bytes(), None)?, b"secret");
/// ```
pub struct Keyward {
    random: SecureRandom,
    hashes: HashProvider,
    mac: MessageAuthenticator,
    aes: SymmetricCipher,
    chacha: SymmetricCipher,
    rsa: AsymmetricCipher,
    policy: PasswordPolicy,
    passwords: PasswordHasher,
    tokens: TokenService,
    metrics: Arc<dyn MetricsRecorder>,
}

impl Keyward {
    /// Start building a facade
    pub fn builder() -> KeywardBuilder {
        KeywardBuilder::new()
    }

    /// Build a facade from an already loaded configuration
    pub fn from_config(config: AppConfig) -> Result<Self> {
        KeywardBuilder::new().with_config(config).build()
    }

    /// Load configuration from the default sources and build a facade
    pub fn load() -> Result<Self> {
        Self::from_config(ConfigLoader::new().load()?)
    }

    pub(crate) fn assemble(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self> {
        Ok(Self {
            random: SecureRandom::new(Arc::clone(&metrics)),
            hashes: HashProvider::new(Arc::clone(&metrics)),
            mac: MessageAuthenticator::new(Arc::clone(&metrics)),
            aes: SymmetricCipher::aes_256_gcm(Arc::clone(&metrics)),
            chacha: SymmetricCipher::chacha20_poly1305(Arc::clone(&metrics)),
            rsa: AsymmetricCipher::with_key_bits(config.crypto.rsa_key_bits, Arc::clone(&metrics))?,
            policy: PasswordPolicy::new(Arc::clone(&metrics)),
            passwords: PasswordHasher::new(&config.auth.password, Arc::clone(&metrics))?,
            tokens: TokenService::from_config(&config.auth.jwt, clock, Arc::clone(&metrics))?,
            metrics,
        })
    }

    // Passwords

    /// Hash a password that satisfies the strength policy
    pub async fn hash_password(&self, password: &str) -> Result<PasswordHash> {
        self.passwords.hash(password).await
    }

    /// Compare a password against a stored hash
    pub async fn compare_password(&self, password: &str, hash: &str) -> Result<bool> {
        self.passwords.compare(password, hash).await
    }

    /// Score a candidate password and list unmet rules
    pub fn validate_password_strength(&self, password: Option<&str>) -> PasswordStrength {
        self.policy.validate(password)
    }

    // Tokens

    /// Issue an access/refresh pair
    pub fn generate_tokens(&self, payload: &TokenPayload) -> Result<TokenPair> {
        self.tokens.issue(payload)
    }

    /// Verify a token of either type
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        self.tokens.verify(token)
    }

    /// Exchange a refresh token for a new pair
    pub fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair> {
        self.tokens.refresh(refresh_token)
    }

    // Randomness and digests

    /// `n` bytes from the operating system CSPRNG
    pub fn generate_secure_random(&self, n: usize) -> Result<Vec<u8>> {
        self.random.random_bytes(n)
    }

    /// SHA-256 digest
    pub fn hash_sha256(&self, data: &[u8]) -> [u8; 32] {
        self.hashes.sha256(data)
    }

    /// SHA-512 digest
    pub fn hash_sha512(&self, data: &[u8]) -> [u8; 64] {
        self.hashes.sha512(data)
    }

    /// HMAC-SHA256 tag
    pub fn generate_hmac(&self, data: &[u8], key: &[u8]) -> Result<[u8; 32]> {
        self.mac.hmac_sha256(data, key)
    }

    /// Constant-time HMAC-SHA256 check
    pub fn verify_hmac(&self, data: &[u8], key: &[u8], tag: &[u8]) -> bool {
        self.mac.verify(data, key, tag)
    }

    // Symmetric encryption

    /// Fresh random key for `algorithm`
    pub fn generate_key(&self, algorithm: SymmetricAlgorithm) -> Result<KeyMaterial> {
        self.cipher(algorithm).generate_key()
    }

    /// AES-256-GCM encryption
    pub fn encrypt_aes(
        &self,
        plaintext: &[u8],
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<CipherEnvelope> {
        self.aes.encrypt(plaintext, key, aad)
    }

    /// AES-256-GCM decryption
    pub fn decrypt_aes(
        &self,
        envelope: &CipherEnvelope,
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        self.aes.decrypt(envelope, key, aad)
    }

    /// ChaCha20-Poly1305 encryption
    pub fn encrypt_chacha20(
        &self,
        plaintext: &[u8],
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<CipherEnvelope> {
        self.chacha.encrypt(plaintext, key, aad)
    }

    /// ChaCha20-Poly1305 decryption
    pub fn decrypt_chacha20(
        &self,
        envelope: &CipherEnvelope,
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        self.chacha.decrypt(envelope, key, aad)
    }

    /// Decrypt an envelope with whichever cipher produced it
    pub fn decrypt_envelope(
        &self,
        envelope: &CipherEnvelope,
        key: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        self.cipher(envelope.algorithm).decrypt(envelope, key, aad)
    }

    fn cipher(&self, algorithm: SymmetricAlgorithm) -> &SymmetricCipher {
        match algorithm {
            SymmetricAlgorithm::Aes256Gcm => &self.aes,
            SymmetricAlgorithm::ChaCha20Poly1305 => &self.chacha,
        }
    }

    // Asymmetric encryption

    /// New RSA keypair at the configured modulus size
    pub fn generate_rsa_key_pair(&self) -> Result<RsaKeyPair> {
        self.rsa.generate_key_pair()
    }

    /// RSA-OAEP (SHA-256) encryption
    pub fn encrypt_rsa(&self, plaintext: &[u8], public_key_pem: &str) -> Result<Vec<u8>> {
        self.rsa.encrypt(plaintext, public_key_pem)
    }

    /// RSA-OAEP (SHA-256) decryption
    pub fn decrypt_rsa(&self, ciphertext: &[u8], private_key_pem: &str) -> Result<Vec<u8>> {
        self.rsa.decrypt(ciphertext, private_key_pem)
    }

    // Metrics

    /// Point-in-time metrics for every recorded operation
    pub fn get_metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Clear all recorded metrics
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Shared metrics recorder
    pub fn metrics(&self) -> Arc<dyn MetricsRecorder> {
        Arc::clone(&self.metrics)
    }

    /// Token service, for callers needing `verify_access`
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Password hasher, for callers needing `needs_rehash`
    pub fn passwords(&self) -> &PasswordHasher {
        &self.passwords
    }
}
