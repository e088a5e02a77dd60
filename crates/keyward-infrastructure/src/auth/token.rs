//! JWT issuance, verification and rotation
//!
//! Tokens are compact JWS strings signed with HS256 or RS256. The library
//! handles signature and structure; expiry, issuer, audience and schema
//! version are checked here against the injected clock so the order of
//! failures is fixed: malformed, then expired, then invalid claims.

use crate::config::{JwtAlgorithm, JwtConfig};
use crate::constants::JWT_MIN_SECRET_LEN;
use crate::error_ext::ErrorContext;
use crate::metrics::track;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use keyward_domain::constants::{TOKEN_SCHEMA_VERSION, TOKEN_SCHEME};
use keyward_domain::error::{Error, Result};
use keyward_domain::ports::{Clock, MetricsRecorder};
use keyward_domain::value_objects::{Operation, TokenClaims, TokenPair, TokenPayload, TokenType};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Key material used to sign and verify tokens
#[derive(Clone)]
pub struct SigningKeys {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    /// HS256 with a shared secret of at least 32 bytes
    pub fn hmac(secret: &[u8]) -> Result<Self> {
        if secret.len() < JWT_MIN_SECRET_LEN {
            return Err(Error::key(format!(
                "HS256 secret must be at least {JWT_MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }
        Ok(Self {
            algorithm: Algorithm::HS256,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// RS256 with a PEM private key (PKCS#1 or PKCS#8) and SPKI public key
    pub fn rsa_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self> {
        let encoding = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| Error::key(format!("Invalid RS256 signing key: {e}")))?;
        let decoding = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| Error::key(format!("Invalid RS256 verification key: {e}")))?;
        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding,
            decoding,
        })
    }

    /// Build keys as described by configuration, reading PEM files for RS256
    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        match config.algorithm {
            JwtAlgorithm::Hs256 => Self::hmac(config.secret.as_bytes()),
            JwtAlgorithm::Rs256 => {
                let (Some(private_path), Some(public_path)) =
                    (&config.private_key_path, &config.public_key_path)
                else {
                    return Err(Error::configuration(
                        "RS256 requires both private_key_path and public_key_path",
                    ));
                };
                let private_pem = std::fs::read_to_string(private_path).config_context(format!(
                    "Failed to read signing key {}",
                    private_path.display()
                ))?;
                let public_pem = std::fs::read_to_string(public_path).config_context(format!(
                    "Failed to read verification key {}",
                    public_path.display()
                ))?;
                Self::rsa_pem(&private_pem, &public_pem)
            }
        }
    }

    /// Signature algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// JWT issuance, verification and rotation
///
/// Each token moves through Issued, Valid and then either Expired or
/// superseded by a refresh. Tokens are never mutated; revocation storage is
/// left to the host.
///
/// # Example
///
/// ```ignore
/// let tokens = TokenService::from_config(&config.auth.jwt, Arc::new(SystemClock), metrics)?;
/// let pair = tokens.issue(&TokenPayload::new("u1"))?;
/// let claims = tokens.verify(&pair.access_token)?;
/// let rotated = tokens.refresh(&pair.refresh_token)?;
/// ```
#[derive(Clone)]
pub struct TokenService {
    keys: SigningKeys,
    issuer: String,
    audience: String,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
    leeway_secs: u64,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl TokenService {
    /// Create a service with explicit keys; lifetimes and identifiers come from `config`
    pub fn new(
        config: &JwtConfig,
        keys: SigningKeys,
        clock: Arc<dyn Clock>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            keys,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_secs: config.expiration_secs,
            refresh_ttl_secs: config.refresh_expiration_secs,
            leeway_secs: config.leeway_secs,
            clock,
            metrics,
        }
    }

    /// Create a service whose keys are described by `config`
    pub fn from_config(
        config: &JwtConfig,
        clock: Arc<dyn Clock>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self> {
        let keys = SigningKeys::from_config(config)?;
        Ok(Self::new(config, keys, clock, metrics))
    }

    /// Issue a new access/refresh pair for `payload`
    pub fn issue(&self, payload: &TokenPayload) -> Result<TokenPair> {
        track(self.metrics.as_ref(), Operation::TokenGeneration, || {
            self.mint_pair(payload)
        })
    }

    /// Verify a token of either type and return its claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        track(self.metrics.as_ref(), Operation::TokenVerification, || {
            self.verified_claims(token)
        })
    }

    /// Verify a token and require it to be an access token
    pub fn verify_access(&self, token: &str) -> Result<TokenClaims> {
        track(self.metrics.as_ref(), Operation::TokenVerification, || {
            let claims = self.verified_claims(token)?;
            expect_type(&claims, TokenType::Access)?;
            Ok(claims)
        })
    }

    /// Exchange a refresh token for a wholly new pair
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        track(self.metrics.as_ref(), Operation::TokenRefresh, || {
            let claims = self.verified_claims(refresh_token)?;
            expect_type(&claims, TokenType::Refresh)?;
            let pair = self.mint_pair(&claims.to_payload())?;
            debug!(superseded = %claims.jti, jti = %pair.jti, "Token pair rotated");
            Ok(pair)
        })
    }

    fn mint_pair(&self, payload: &TokenPayload) -> Result<TokenPair> {
        if payload.subject_id.trim().is_empty() {
            warn!("Rejected token issuance without subject");
            return Err(Error::validation_with_reasons(
                "Token payload is invalid",
                vec!["subject_id is required".to_string()],
            ));
        }

        let now = self.clock.now_unix_secs();
        let (access_token, jti) = self.mint(payload, TokenType::Access, now, self.access_ttl_secs)?;
        let (refresh_token, refresh_jti) =
            self.mint(payload, TokenType::Refresh, now, self.refresh_ttl_secs)?;

        debug!(jti = %jti, refresh_jti = %refresh_jti, "Issued token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: TOKEN_SCHEME.to_string(),
            expires_in: self.access_ttl_secs,
            jti,
            refresh_jti,
        })
    }

    /// Sign one token; returns the compact token and its `jti`
    fn mint(
        &self,
        payload: &TokenPayload,
        token_type: TokenType,
        now: u64,
        ttl_secs: u64,
    ) -> Result<(String, String)> {
        let claims = TokenClaims {
            sub: payload.subject_id.clone(),
            email: payload.email.clone(),
            role: payload.role.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
            jti: Uuid::new_v4().to_string(),
            version: TOKEN_SCHEMA_VERSION,
            token_type,
        };

        let token = encode(&Header::new(self.keys.algorithm), &claims, &self.keys.encoding)
            .map_err(|e| Error::internal(format!("Token generation failed: {e}")))?;
        Ok((token, claims.jti))
    }

    fn verified_claims(&self, token: &str) -> Result<TokenClaims> {
        if token.trim().is_empty() {
            return Err(Error::validation_with_reasons(
                "Token is required",
                vec!["token is required".to_string()],
            ));
        }

        self.decode_claims(token).inspect_err(|e| {
            warn!(kind = %e.kind(), "Token rejected");
        })
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims> {
        // Claim checks are done below so they run against the injected clock
        let mut validation = Validation::new(self.keys.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.keys.decoding, &validation)
            .map_err(|e| Error::token_malformed(e.to_string()))?
            .claims;

        let now = self.clock.now_unix_secs();
        if now >= claims.exp.saturating_add(self.leeway_secs) {
            return Err(Error::token_expired(claims.exp));
        }
        if claims.iss != self.issuer {
            return Err(Error::token_invalid(format!(
                "Unexpected issuer '{}'",
                claims.iss
            )));
        }
        if claims.aud != self.audience {
            return Err(Error::token_invalid(format!(
                "Unexpected audience '{}'",
                claims.aud
            )));
        }
        if claims.version != TOKEN_SCHEMA_VERSION {
            return Err(Error::token_invalid(format!(
                "Unsupported claims version {}",
                claims.version
            )));
        }
        if claims.exp <= claims.iat {
            return Err(Error::token_invalid("Token expires before it was issued"));
        }

        Ok(claims)
    }
}

fn expect_type(claims: &TokenClaims, expected: TokenType) -> Result<()> {
    if claims.token_type == expected {
        Ok(())
    } else {
        warn!(expected = %expected, actual = %claims.token_type, "Token type mismatch");
        Err(Error::token_type_mismatch(
            expected.as_str(),
            claims.token_type.as_str(),
        ))
    }
}
