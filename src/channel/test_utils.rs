//! Shared test utilities for channel module tests
//!
//! This module provides common helper functions used across all channel module tests.

use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::channel::participant::Participant;

/// Deterministically derive a secret key from a single byte (tests only)
fn deterministic_secret(byte: u8) -> SecretKey {
    SecretKey::from_slice(&[byte; 32]).expect("32-byte array should always be a valid SecretKey")
}

/// Helper function to generate the standard pair of test secret keys
pub fn test_secret_keys() -> (SecretKey, SecretKey) {
    (deterministic_secret(1), deterministic_secret(2))
}

/// Helper function to generate test public keys
pub fn test_keys() -> (PublicKey, PublicKey) {
    let secp = Secp256k1::new();
    let (sk_a, sk_b) = test_secret_keys();
    (PublicKey::from_secret_key(&secp, &sk_a), PublicKey::from_secret_key(&secp, &sk_b))
}

/// Helper function to generate different test public keys
pub fn different_test_keys() -> (PublicKey, PublicKey) {
    let secp = Secp256k1::new();
    let sk_a = deterministic_secret(3);
    let sk_b = deterministic_secret(4);
    (PublicKey::from_secret_key(&secp, &sk_a), PublicKey::from_secret_key(&secp, &sk_b))
}

/// Helper function to generate the standard pair of test participants
pub fn test_participants() -> [Participant; 2] {
    let (pk_a, pk_b) = test_keys();
    [Participant::new(pk_a), Participant::new(pk_b)]
}

/// Helper function to generate a different pair of test participants
pub fn different_test_participants() -> [Participant; 2] {
    let (pk_a, pk_b) = different_test_keys();
    [Participant::new(pk_a), Participant::new(pk_b)]
}

/// Helper function to generate a secret key outside the channel (tests only)
pub fn outsider_secret_key() -> SecretKey {
    deterministic_secret(9)
}
