//! Token issuance, verification and rotation tests

use jsonwebtoken::{EncodingKey, Header, encode};
use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{Operation, TokenClaims, TokenPayload, TokenType};
use keyward_domain::Error;
use keyward_infrastructure::auth::{SigningKeys, TokenService};
use keyward_infrastructure::config::JwtConfig;
use keyward_infrastructure::crypto::AsymmetricCipher;
use keyward_infrastructure::metrics::{MetricsRegistry, NullMetricsRecorder};
use keyward_infrastructure::utils::ManualClock;
use std::sync::Arc;

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
const OTHER_SECRET: &[u8] = b"fedcba9876543210fedcba9876543210";
const START: u64 = 1_700_000_000;

struct Fixture {
    tokens: TokenService,
    clock: Arc<ManualClock>,
    registry: Arc<MetricsRegistry>,
}

fn fixture_with(config: &JwtConfig, secret: &[u8]) -> Fixture {
    let clock = Arc::new(ManualClock::new(START));
    let registry = Arc::new(MetricsRegistry::new());
    let metrics: Arc<dyn MetricsRecorder> = registry.clone();
    let tokens = TokenService::new(
        config,
        SigningKeys::hmac(secret).unwrap(),
        clock.clone(),
        metrics,
    );
    Fixture {
        tokens,
        clock,
        registry,
    }
}

fn fixture() -> Fixture {
    fixture_with(&JwtConfig::default(), SECRET)
}

#[test]
fn test_issue_and_verify_scenario() {
    let f = fixture();
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();

    let claims = f.tokens.verify(&pair.access_token).unwrap();
    assert_eq!(claims.subject_id(), "u1");
    assert_eq!(claims.iss, "service-api");
    assert_eq!(claims.aud, "service-client");
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.version, 1);
    assert_eq!(claims.iat, START);
    assert_eq!(claims.exp, START + 3600);
    assert_eq!(claims.jti, pair.jti);

    f.clock.advance(3600);
    match f.tokens.verify(&pair.access_token) {
        Err(Error::TokenExpired { expired_at }) => assert_eq!(expired_at, START + 3600),
        other => panic!("Expected TokenExpired error, got {other:?}"),
    }
}

#[test]
fn test_pair_shape() {
    let f = fixture();
    let payload = TokenPayload::new("u1")
        .with_email("u1@example.com")
        .with_role("admin");
    let pair = f.tokens.issue(&payload).unwrap();

    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.expires_in, 3600);
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_ne!(pair.jti, pair.refresh_jti);
    assert_eq!(pair.access_token.split('.').count(), 3);

    let refresh = f.tokens.verify(&pair.refresh_token).unwrap();
    assert_eq!(refresh.token_type, TokenType::Refresh);
    assert_eq!(refresh.exp, START + 604_800);
    assert_eq!(refresh.email.as_deref(), Some("u1@example.com"));
    assert_eq!(refresh.role.as_deref(), Some("admin"));
    assert_eq!(refresh.jti, pair.refresh_jti);
}

#[test]
fn test_identical_payloads_yield_distinct_tokens() {
    let f = fixture();
    let payload = TokenPayload::new("u1");
    let first = f.tokens.issue(&payload).unwrap();
    let second = f.tokens.issue(&payload).unwrap();
    assert_ne!(first.jti, second.jti);
    assert_ne!(first.access_token, second.access_token);
}

#[test]
fn test_blank_subject_rejected() {
    let f = fixture();
    for subject in ["", "   "] {
        match f.tokens.issue(&TokenPayload::new(subject)) {
            Err(Error::Validation { .. }) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
    let snapshot = f.registry.snapshot();
    assert_eq!(snapshot.get(Operation::TokenGeneration).unwrap().errors, 2);
}

#[test]
fn test_blank_token_rejected() {
    let f = fixture();
    for token in ["", " \n"] {
        match f.tokens.verify(token) {
            Err(Error::Validation { .. }) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
        match f.tokens.refresh(token) {
            Err(Error::Validation { .. }) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}

#[test]
fn test_malformed_tokens() {
    let f = fixture();
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();
    let segments: Vec<&str> = pair.access_token.split('.').collect();
    let forged = f.tokens.issue(&TokenPayload::new("u2")).unwrap();
    let forged_signature = forged.access_token.rsplit('.').next().unwrap();

    let missing_segment = format!("{}.{}", segments[0], segments[1]);
    let bad_encoding = format!("{}.{}!!.{}", segments[0], segments[1], segments[2]);
    let other_signature = format!("{}.{}.{}", segments[0], segments[1], forged_signature);

    for token in [
        "not-a-token".to_string(),
        missing_segment,
        bad_encoding,
        other_signature,
    ] {
        match f.tokens.verify(&token) {
            Err(Error::TokenMalformed { .. }) => {}
            other => panic!("Expected TokenMalformed error for {token}, got {other:?}"),
        }
    }
}

#[test]
fn test_signature_from_other_secret_is_malformed() {
    let f = fixture();
    let other = fixture_with(&JwtConfig::default(), OTHER_SECRET);
    let pair = other.tokens.issue(&TokenPayload::new("u1")).unwrap();
    match f.tokens.verify(&pair.access_token) {
        Err(Error::TokenMalformed { .. }) => {}
        other => panic!("Expected TokenMalformed error, got {other:?}"),
    }
}

#[test]
fn test_foreign_issuer_and_audience_invalid() {
    let f = fixture();
    let foreign_issuer = fixture_with(
        &JwtConfig {
            issuer: "someone-else".to_string(),
            ..JwtConfig::default()
        },
        SECRET,
    );
    let foreign_audience = fixture_with(
        &JwtConfig {
            audience: "another-client".to_string(),
            ..JwtConfig::default()
        },
        SECRET,
    );

    for issuer in [&foreign_issuer, &foreign_audience] {
        let pair = issuer.tokens.issue(&TokenPayload::new("u1")).unwrap();
        match f.tokens.verify(&pair.access_token) {
            Err(Error::TokenInvalid { .. }) => {}
            other => panic!("Expected TokenInvalid error, got {other:?}"),
        }
    }
}

#[test]
fn test_expiry_checked_before_issuer() {
    let f = fixture();
    let foreign = fixture_with(
        &JwtConfig {
            issuer: "someone-else".to_string(),
            ..JwtConfig::default()
        },
        SECRET,
    );
    let pair = foreign.tokens.issue(&TokenPayload::new("u1")).unwrap();
    f.clock.advance(7200);
    match f.tokens.verify(&pair.access_token) {
        Err(Error::TokenExpired { .. }) => {}
        other => panic!("Expected TokenExpired error, got {other:?}"),
    }
}

#[test]
fn test_unknown_schema_version_invalid() {
    let f = fixture();
    let claims = TokenClaims {
        sub: "u1".to_string(),
        email: None,
        role: None,
        iss: "service-api".to_string(),
        aud: "service-client".to_string(),
        iat: START,
        exp: START + 60,
        jti: "legacy".to_string(),
        version: 0,
        token_type: TokenType::Access,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
    match f.tokens.verify(&token) {
        Err(Error::TokenInvalid { .. }) => {}
        other => panic!("Expected TokenInvalid error, got {other:?}"),
    }
}

#[test]
fn test_leeway_extends_expiry() {
    let f = fixture_with(
        &JwtConfig {
            leeway_secs: 30,
            ..JwtConfig::default()
        },
        SECRET,
    );
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();
    f.clock.advance(3600 + 29);
    assert!(f.tokens.verify(&pair.access_token).is_ok());
    f.clock.advance(1);
    assert!(f.tokens.verify(&pair.access_token).is_err());
}

#[test]
fn test_refresh_with_access_token_is_type_mismatch() {
    let f = fixture();
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();
    match f.tokens.refresh(&pair.access_token) {
        Err(Error::TokenTypeMismatch { expected, actual }) => {
            assert_eq!(expected, "refresh");
            assert_eq!(actual, "access");
        }
        other => panic!("Expected TokenTypeMismatch error, got {other:?}"),
    }
}

#[test]
fn test_verify_access_rejects_refresh_token() {
    let f = fixture();
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();
    assert!(f.tokens.verify_access(&pair.access_token).is_ok());
    match f.tokens.verify_access(&pair.refresh_token) {
        Err(Error::TokenTypeMismatch { .. }) => {}
        other => panic!("Expected TokenTypeMismatch error, got {other:?}"),
    }
}

#[test]
fn test_refresh_issues_new_pair() {
    let f = fixture();
    let payload = TokenPayload::new("u1").with_role("reader");
    let original = f.tokens.issue(&payload).unwrap();

    f.clock.advance(4000);
    let rotated = f.tokens.refresh(&original.refresh_token).unwrap();
    assert_ne!(rotated.jti, original.jti);
    assert_ne!(rotated.refresh_jti, original.refresh_jti);
    assert_ne!(rotated.access_token, original.access_token);

    // Old access token has expired; the new one carries the same identity
    assert!(f.tokens.verify(&original.access_token).is_err());
    let claims = f.tokens.verify(&rotated.access_token).unwrap();
    assert_eq!(claims.to_payload(), payload);
    assert_eq!(claims.iat, START + 4000);
}

#[test]
fn test_expired_refresh_token_rejected() {
    let f = fixture();
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();
    f.clock.advance(604_800);
    match f.tokens.refresh(&pair.refresh_token) {
        Err(Error::TokenExpired { .. }) => {}
        other => panic!("Expected TokenExpired error, got {other:?}"),
    }
}

#[test]
fn test_token_operations_are_metered() {
    let f = fixture();
    let pair = f.tokens.issue(&TokenPayload::new("u1")).unwrap();
    f.tokens.verify(&pair.access_token).unwrap();
    f.tokens.verify("garbage").unwrap_err();
    f.tokens.refresh(&pair.refresh_token).unwrap();
    f.tokens.refresh(&pair.access_token).unwrap_err();

    let snapshot = f.registry.snapshot();
    assert_eq!(snapshot.get(Operation::TokenGeneration).unwrap().count, 1);
    let verification = snapshot.get(Operation::TokenVerification).unwrap();
    assert_eq!(verification.count, 2);
    assert_eq!(verification.error_rate, "50.00%");
    let refresh = snapshot.get(Operation::TokenRefresh).unwrap();
    assert_eq!(refresh.count, 2);
    assert_eq!(refresh.errors, 1);
}

#[test]
fn test_short_hmac_secret_rejected() {
    match SigningKeys::hmac(b"too-short") {
        Err(Error::Key { .. }) => {}
        Err(e) => panic!("Expected Key error, got {e:?}"),
        Ok(_) => panic!("Expected Key error"),
    }
}

#[test]
fn test_rs256_roundtrip() {
    let pair = AsymmetricCipher::new(Arc::new(NullMetricsRecorder))
        .generate_key_pair()
        .unwrap();
    let keys = SigningKeys::rsa_pem(pair.private_key(), pair.public_key()).unwrap();
    assert_eq!(keys.algorithm(), jsonwebtoken::Algorithm::RS256);

    let clock = Arc::new(ManualClock::new(START));
    let tokens = TokenService::new(
        &JwtConfig::default(),
        keys,
        clock,
        Arc::new(NullMetricsRecorder),
    );
    let issued = tokens.issue(&TokenPayload::new("svc")).unwrap();
    assert_eq!(tokens.verify(&issued.access_token).unwrap().sub, "svc");

    // An HS256 service sharing nothing with the RSA keys cannot verify it
    let f = fixture();
    match f.tokens.verify(&issued.access_token) {
        Err(Error::TokenMalformed { .. }) => {}
        other => panic!("Expected TokenMalformed error, got {other:?}"),
    }
}
