//! Digest tests

use keyward_domain::ports::MetricsRecorder;
use keyward_domain::value_objects::Operation;
use keyward_infrastructure::crypto::HashProvider;
use keyward_infrastructure::metrics::MetricsRegistry;
use std::sync::Arc;

fn hasher() -> (HashProvider, Arc<MetricsRegistry>) {
    let registry = Arc::new(MetricsRegistry::new());
    let metrics: Arc<dyn MetricsRecorder> = registry.clone();
    (HashProvider::new(metrics), registry)
}

#[test]
fn test_sha256_known_vectors() {
    let (hasher, _) = hasher();
    assert_eq!(
        hasher.sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        hasher.sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_sha512_known_vector() {
    let (hasher, _) = hasher();
    assert_eq!(
        hasher.sha512_hex(b"abc"),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn test_digest_lengths_and_determinism() {
    let (hasher, _) = hasher();
    let large = vec![0xA5u8; 3 * 1024 * 1024];
    assert_eq!(hasher.sha256(&large), hasher.sha256(&large));
    assert_eq!(hasher.sha512(&large).len(), 64);
    assert_ne!(hasher.sha256(b"a"), hasher.sha256(b"b"));
}

#[test]
fn test_hashing_is_metered() {
    let (hasher, registry) = hasher();
    hasher.sha256(b"x");
    hasher.sha512(b"x");
    hasher.sha256_hex(b"x");

    let snapshot = registry.snapshot();
    let hashing = snapshot.get(Operation::Hashing).unwrap();
    assert_eq!(hashing.count, 3);
    assert_eq!(hashing.errors, 0);
}
