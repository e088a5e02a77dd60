//! Unit tests for key material value objects

use keyward_domain::{ErrorKind, KeyMaterial, RsaKeyPair, SymmetricAlgorithm};
use zeroize::Zeroizing;

#[test]
fn test_key_material_accepts_exact_length() {
    let key = KeyMaterial::new(vec![1u8; 32], SymmetricAlgorithm::Aes256Gcm).unwrap();
    assert_eq!(key.len(), 32);
    assert_eq!(key.algorithm(), SymmetricAlgorithm::Aes256Gcm);
    assert_eq!(key.as_ref(), &[1u8; 32][..]);
}

#[test]
fn test_key_material_rejects_wrong_length() {
    for len in [0, 16, 31, 33, 64] {
        let err = KeyMaterial::new(vec![0u8; len], SymmetricAlgorithm::ChaCha20Poly1305)
            .expect_err("wrong length must fail");
        assert_eq!(err.kind(), ErrorKind::Key);
    }
}

#[test]
fn test_debug_output_hides_secrets() {
    let key = KeyMaterial::new(vec![0xAB; 32], SymmetricAlgorithm::Aes256Gcm).unwrap();
    let rendered = format!("{key:?}");
    assert!(!rendered.contains("171"));
    assert!(rendered.contains("len"));

    let pair = RsaKeyPair::new(
        "PUBLIC".to_string(),
        Zeroizing::new("TOP-SECRET-PRIVATE".to_string()),
        2048,
    );
    let rendered = format!("{pair:?}");
    assert!(!rendered.contains("TOP-SECRET-PRIVATE"));
    assert_eq!(pair.private_key(), "TOP-SECRET-PRIVATE");
    assert_eq!(pair.bits(), 2048);
}
