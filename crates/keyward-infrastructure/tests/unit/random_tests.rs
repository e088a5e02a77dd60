//! Secure random generation tests

use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::Operation;
use keyward_domain::Error;
use keyward_infrastructure::constants::MAX_RANDOM_BYTES;
use keyward_infrastructure::crypto::SecureRandom;
use keyward_infrastructure::metrics::MetricsRegistry;
use std::collections::HashSet;
use std::sync::Arc;

fn random() -> (SecureRandom, Arc<MetricsRegistry>) {
    let registry = Arc::new(MetricsRegistry::new());
    let metrics: Arc<dyn MetricsRecorder> = registry.clone();
    (SecureRandom::new(metrics), registry)
}

#[test]
fn test_random_bytes_length() {
    let (random, _) = random();
    assert_eq!(random.random_bytes(0).unwrap().len(), 0);
    assert_eq!(random.random_bytes(1).unwrap().len(), 1);
    assert_eq!(random.random_bytes(64).unwrap().len(), 64);
}

#[test]
fn test_random_bytes_are_unique() {
    let (random, _) = random();
    let values: HashSet<Vec<u8>> = (0..100).map(|_| random.random_bytes(16).unwrap()).collect();
    assert_eq!(values.len(), 100);
}

#[test]
fn test_random_bytes_over_limit_rejected() {
    let (random, registry) = random();
    match random.random_bytes(MAX_RANDOM_BYTES + 1) {
        Err(Error::InvalidArgument { .. }) => {}
        other => panic!("Expected InvalidArgument error, got {other:?}"),
    }

    let snapshot = registry.snapshot();
    let generation = snapshot.get(Operation::RandomGeneration).unwrap();
    assert_eq!(generation.count, 1);
    assert_eq!(generation.errors, 1);
}

#[test]
fn test_random_string_exact_length_and_alphabet() {
    let (random, _) = random();
    for n in [0, 1, 2, 3, 4, 5, 31, 32, 33, 100] {
        let value = random.random_string(n).unwrap();
        assert_eq!(value.len(), n, "length for n = {n}");
        assert!(
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "URL-safe alphabet for {value}"
        );
    }
}

#[test]
fn test_random_hex() {
    let (random, _) = random();
    let value = random.random_hex(16).unwrap();
    assert_eq!(value.len(), 32);
    assert!(value.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_salt_defaults_to_32_bytes() {
    let (random, registry) = random();
    assert_eq!(random.default_salt().unwrap().len(), 32);
    assert_eq!(random.salt(12).unwrap().len(), 12);

    // Each wrapper call is one operation
    let snapshot = registry.snapshot();
    assert_eq!(snapshot.get(Operation::RandomGeneration).unwrap().count, 2);
}
