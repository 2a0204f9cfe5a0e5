//! Тесты commit-reveal схемы run-it-twice.

use poker_core::infra::rng_security::{generate_rng_security, verify_rng_security};

fn secret(byte: u8) -> [u8; 32] {
    [byte; 32]
}

#[test]
fn generated_security_verifies_ok() {
    let security = generate_rng_security(secret(7), b"client-entropy", 1_700_000_000, 3);
    let report = verify_rng_security(&security);

    assert!(report.ok);
    assert_eq!(report.computed_chain, security.verification.hash_chain);
}

#[test]
fn chain_length_matches_run_count() {
    let security = generate_rng_security(secret(1), b"e", 42, 4);
    assert_eq!(security.verification.hash_chain.len(), 4);
    assert!(security.run_seed(3).is_some());
    assert!(security.run_seed(4).is_none());
}

#[test]
fn tampered_chain_fails_verification() {
    let mut security = generate_rng_security(secret(9), b"entropy", 123, 2);
    security.verification.hash_chain[1][0] ^= 0xFF;

    let report = verify_rng_security(&security);
    assert!(!report.ok);
}

#[test]
fn wrong_proof_fails_verification() {
    let mut security = generate_rng_security(secret(3), b"entropy", 123, 2);
    security.verification.proof = Some(secret(4));

    let report = verify_rng_security(&security);
    assert!(!report.ok);
}

#[test]
fn missing_proof_is_vacuously_ok() {
    let mut security = generate_rng_security(secret(5), b"entropy", 123, 2);
    security.verification.proof = None;

    let report = verify_rng_security(&security);
    assert!(report.ok);
    assert!(report.computed_chain.is_empty());
}

#[test]
fn different_entropy_changes_the_chain() {
    let a = generate_rng_security(secret(5), b"alpha", 123, 2);
    let b = generate_rng_security(secret(5), b"beta", 123, 2);
    assert_ne!(a.verification.hash_chain, b.verification.hash_chain);

    // Но commit одинаковый: он зависит только от секрета.
    assert_eq!(a.verification.public_seed, b.verification.public_seed);
}

#[test]
fn run_seeds_are_distinct_within_a_chain() {
    let security = generate_rng_security(secret(8), b"entropy", 55, 4);
    let chain = &security.verification.hash_chain;
    for i in 0..chain.len() {
        for j in (i + 1)..chain.len() {
            assert_ne!(chain[i], chain[j]);
        }
    }
}
