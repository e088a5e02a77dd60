//! Authenticated symmetric encryption tests

use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::{CipherEnvelope, Operation, SymmetricAlgorithm};
use keyward_domain::Error;
use keyward_infrastructure::crypto::SymmetricCipher;
use keyward_infrastructure::metrics::MetricsRegistry;
use std::sync::Arc;

const ALGORITHMS: [SymmetricAlgorithm; 2] = [
    SymmetricAlgorithm::Aes256Gcm,
    SymmetricAlgorithm::ChaCha20Poly1305,
];

fn cipher(algorithm: SymmetricAlgorithm) -> (SymmetricCipher, Arc<MetricsRegistry>) {
    let registry = Arc::new(MetricsRegistry::new());
    let metrics: Arc<dyn MetricsRecorder> = registry.clone();
    (SymmetricCipher::new(algorithm, metrics), registry)
}

#[test]
fn test_roundtrip_various_plaintexts() {
    let unicode = "päßwörd 🔐 секрет".as_bytes().to_vec();
    let large: Vec<u8> = (0..5 * 1024 * 1024).map(|i| (i % 251) as u8).collect();

    for algorithm in ALGORITHMS {
        let (cipher, _) = cipher(algorithm);
        let key = cipher.generate_key().unwrap();
        for plaintext in [Vec::new(), b"hello".to_vec(), unicode.clone(), large.clone()] {
            let envelope = cipher.encrypt(&plaintext, key.as_bytes(), None).unwrap();
            assert_eq!(envelope.algorithm, algorithm);
            assert_eq!(envelope.ciphertext.len(), plaintext.len());
            let decrypted = cipher.decrypt(&envelope, key.as_bytes(), None).unwrap();
            assert_eq!(decrypted, plaintext, "{algorithm} roundtrip");
        }
    }
}

#[test]
fn test_nonce_is_fresh_per_call() {
    for algorithm in ALGORITHMS {
        let (cipher, _) = cipher(algorithm);
        let key = cipher.generate_key().unwrap();
        let first = cipher.encrypt(b"same", key.as_bytes(), None).unwrap();
        let second = cipher.encrypt(b"same", key.as_bytes(), None).unwrap();
        assert_eq!(first.nonce.len(), 12);
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }
}

#[test]
fn test_every_byte_flip_is_detected() {
    for algorithm in ALGORITHMS {
        let (cipher, _) = cipher(algorithm);
        let key = cipher.generate_key().unwrap();
        let envelope = cipher.encrypt(b"attack at dawn", key.as_bytes(), None).unwrap();

        for i in 0..envelope.ciphertext.len() {
            let mut tampered = envelope.clone();
            tampered.ciphertext[i] ^= 0x01;
            match cipher.decrypt(&tampered, key.as_bytes(), None) {
                Err(Error::Authentication { .. }) => {}
                other => panic!("Expected Authentication error, got {other:?}"),
            }
        }
        for i in 0..envelope.tag.len() {
            let mut tampered = envelope.clone();
            tampered.tag[i] ^= 0x80;
            assert!(cipher.decrypt(&tampered, key.as_bytes(), None).is_err());
        }
        let mut tampered = envelope.clone();
        tampered.nonce[0] ^= 0x01;
        assert!(cipher.decrypt(&tampered, key.as_bytes(), None).is_err());
    }
}

#[test]
fn test_wrong_key_fails() {
    for algorithm in ALGORITHMS {
        let (cipher, _) = cipher(algorithm);
        let key = cipher.generate_key().unwrap();
        let other = cipher.generate_key().unwrap();
        let envelope = cipher.encrypt(b"secret", key.as_bytes(), None).unwrap();
        match cipher.decrypt(&envelope, other.as_bytes(), None) {
            Err(Error::Authentication { .. }) => {}
            other => panic!("Expected Authentication error, got {other:?}"),
        }
    }
}

#[test]
fn test_key_length_checked_before_crypto() {
    for algorithm in ALGORITHMS {
        let (cipher, registry) = cipher(algorithm);
        for len in [0, 16, 31, 33, 64] {
            match cipher.encrypt(b"data", &vec![7u8; len], None) {
                Err(Error::Key { .. }) => {}
                other => panic!("Expected Key error for {len} bytes, got {other:?}"),
            }
        }
        let snapshot = registry.snapshot();
        let encrypt = snapshot.get(Operation::Encrypt).unwrap();
        assert_eq!(encrypt.count, 5);
        assert_eq!(encrypt.errors, 5);
    }
}

#[test]
fn test_aad_must_match() {
    for algorithm in ALGORITHMS {
        let (cipher, _) = cipher(algorithm);
        let key = cipher.generate_key().unwrap();
        let envelope = cipher
            .encrypt(b"payload", key.as_bytes(), Some(b"record-1"))
            .unwrap();
        assert!(envelope.aad_bound);

        let plaintext = cipher
            .decrypt(&envelope, key.as_bytes(), Some(b"record-1"))
            .unwrap();
        assert_eq!(plaintext, b"payload");

        for aad in [Some(&b"record-2"[..]), None, Some(&b""[..])] {
            match cipher.decrypt(&envelope, key.as_bytes(), aad) {
                Err(Error::Authentication { .. }) => {}
                other => panic!("Expected Authentication error for {aad:?}, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_aad_supplied_only_at_decrypt_fails() {
    let (cipher, _) = cipher(SymmetricAlgorithm::Aes256Gcm);
    let key = cipher.generate_key().unwrap();
    let envelope = cipher.encrypt(b"payload", key.as_bytes(), None).unwrap();
    assert!(!envelope.aad_bound);
    assert!(
        cipher
            .decrypt(&envelope, key.as_bytes(), Some(b"unexpected"))
            .is_err()
    );
}

#[test]
fn test_algorithm_mismatch_rejected() {
    let (aes, _) = cipher(SymmetricAlgorithm::Aes256Gcm);
    let (chacha, _) = cipher(SymmetricAlgorithm::ChaCha20Poly1305);
    let key = aes.generate_key().unwrap();
    let envelope = aes.encrypt(b"payload", key.as_bytes(), None).unwrap();

    match chacha.decrypt(&envelope, key.as_bytes(), None) {
        Err(Error::Validation { .. }) => {}
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[test]
fn test_malformed_envelope_fields_rejected() {
    let (cipher, _) = cipher(SymmetricAlgorithm::ChaCha20Poly1305);
    let key = cipher.generate_key().unwrap();
    let envelope = cipher.encrypt(b"payload", key.as_bytes(), None).unwrap();

    let mut short_nonce = envelope.clone();
    short_nonce.nonce.pop();
    let mut short_tag = envelope.clone();
    short_tag.tag.truncate(8);

    for broken in [short_nonce, short_tag] {
        match cipher.decrypt(&broken, key.as_bytes(), None) {
            Err(Error::Validation { .. }) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}

#[test]
fn test_encoded_envelope_roundtrip_and_truncation() {
    let (cipher, registry) = cipher(SymmetricAlgorithm::Aes256Gcm);
    let key = cipher.generate_key().unwrap();
    let encoded = cipher
        .encrypt(b"stored secret", key.as_bytes(), Some(b"ctx"))
        .unwrap()
        .encode();

    let plaintext = cipher
        .decrypt_encoded(&encoded, key.as_bytes(), Some(b"ctx"))
        .unwrap();
    assert_eq!(plaintext, b"stored secret");

    let truncated = &encoded[..10];
    match cipher.decrypt_encoded(truncated, key.as_bytes(), Some(b"ctx")) {
        Err(Error::Validation { .. }) => {}
        other => panic!("Expected Validation error, got {other:?}"),
    }
    assert!(cipher.decrypt_encoded("not base64 !!", key.as_bytes(), None).is_err());

    let bytes = CipherEnvelope::decode(&encoded).unwrap().to_bytes();
    let mut chopped = bytes.clone();
    chopped.truncate(bytes.len() - 1);
    let envelope = CipherEnvelope::from_bytes(&chopped).unwrap();
    assert!(cipher.decrypt(&envelope, key.as_bytes(), Some(b"ctx")).is_err());

    let snapshot = registry.snapshot();
    let decrypt = snapshot.get(Operation::Decrypt).unwrap();
    assert_eq!(decrypt.count, 4);
    assert_eq!(decrypt.errors, 3);
}

#[test]
fn test_key_generation_is_metered() {
    for algorithm in ALGORITHMS {
        let (cipher, registry) = cipher(algorithm);
        let key = cipher.generate_key().unwrap();
        assert_eq!(key.as_bytes().len(), algorithm.key_len());

        let snapshot = registry.snapshot();
        let generation = snapshot.get(Operation::RandomGeneration).unwrap();
        assert_eq!(generation.count, 1);
        assert_eq!(generation.errors, 0);
        assert!(snapshot.get(Operation::Encrypt).is_none());
    }
}
