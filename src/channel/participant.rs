//! Channel participants and Stacks address derivation

use std::fmt;

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::{ADDRESS_VERSION_MAINNET, ADDRESS_VERSION_TESTNET};

/// A Stacks principal address: a version byte plus a 20-byte public key hash
///
/// The 20-byte hash is the first 20 bytes of the SHA-256 digest of the
/// compressed public key. The version byte distinguishes mainnet and testnet
/// single-signature addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StacksAddress {
    /// Address version byte
    pub version: u8,
    /// 20-byte public key hash
    pub hash: [u8; 20],
}

impl StacksAddress {
    /// Derives a mainnet address from a compressed public key
    pub fn mainnet_from_pubkey(pubkey: &PublicKey) -> Self {
        Self::from_pubkey(ADDRESS_VERSION_MAINNET, pubkey)
    }

    /// Derives a testnet address from a compressed public key
    pub fn testnet_from_pubkey(pubkey: &PublicKey) -> Self {
        Self::from_pubkey(ADDRESS_VERSION_TESTNET, pubkey)
    }

    /// Derives an address from a compressed public key under the given version byte
    pub fn from_pubkey(version: u8, pubkey: &PublicKey) -> Self {
        let digest = Sha256::digest(pubkey.serialize());
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&digest[..20]);
        Self { version, hash }
    }

    /// Serializes the address as version byte followed by the hash (21 bytes)
    pub fn to_bytes(self) -> [u8; 21] {
        let mut bytes = [0u8; 21];
        bytes[0] = self.version;
        bytes[1..].copy_from_slice(&self.hash);
        bytes
    }
}

impl fmt::Display for StacksAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{}", self.version, hex::encode(self.hash))
    }
}

/// A channel participant: a settlement address and the key that signs updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant's Stacks address, used at settlement
    pub address: StacksAddress,
    /// The participant's compressed secp256k1 public key, used to verify updates
    pub pubkey: PublicKey,
}

impl Participant {
    /// Creates a participant whose address is derived from the given key (mainnet)
    pub fn new(pubkey: PublicKey) -> Self {
        Self { address: StacksAddress::mainnet_from_pubkey(&pubkey), pubkey }
    }

    /// Creates a participant with an explicit address version byte
    pub fn with_version(version: u8, pubkey: PublicKey) -> Self {
        Self { address: StacksAddress::from_pubkey(version, &pubkey), pubkey }
    }
}
