//! Cryptographic hash functions and identifier derivation
use rand::Rng;
use sha2::{Digest, Sha512_256};

use crate::types::{Bytes32, ChannelId, CHAIN_DOMAIN, CHANNEL_ID_DOMAIN_TAG};

/// Computes the SHA-512/256 digest of the input bytes
///
/// SHA-512/256 is the hash function used throughout the Stacks chain for
/// transaction and block identifiers; commitments use it as well so that
/// off-chain state hashes and on-chain identifiers share a single primitive.
pub fn sha512_256(data: &[u8]) -> Bytes32 {
    let mut hasher = Sha512_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the SHA-512/256 digest of a domain tag followed by input parts
pub fn hash_tagged(tag: &[u8], parts: &[&[u8]]) -> Bytes32 {
    let mut hasher = Sha512_256::new();
    hasher.update(tag);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Computes a new hash by chaining the old hash with new input data.
/// Uses domain separation with tag `CHAIN_DOMAIN` for future-proofing.
pub fn compute_hash_chain(old: Bytes32, input: &[u8]) -> Bytes32 {
    let mut hasher = Sha512_256::new();
    hasher.update(CHAIN_DOMAIN);
    hasher.update(old);
    hasher.update(input);
    hasher.finalize().into()
}

/// Derives a channel identifier from a human-readable label
///
/// Labels such as `"channel_001"` are hashed under a dedicated domain tag so
/// that a label can never collide with a commitment or a randomly drawn id.
pub fn channel_id_from_label(label: &str) -> ChannelId {
    hash_tagged(CHANNEL_ID_DOMAIN_TAG, &[label.as_bytes()])
}

/// Draws a fresh random channel identifier
pub fn random_channel_id() -> ChannelId {
    rand::thread_rng().gen()
}
