//! Signed off-chain state updates
//!
//! A `StateUpdate` is the canonical description of a channel state at a
//! given nonce. Participants authorize updates with recoverable secp256k1
//! ECDSA signatures over a domain-tagged SHA-512/256 digest, the same
//! signature scheme Stacks uses on-chain. Verification recovers the signer
//! key from the signature and compares it against the registered
//! participant keys, so an update carries no key material of its own.

use std::fmt;

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ChannelError;
use crate::types::{Bytes32, ChannelId, Party, UPDATE_DOMAIN_TAG};
use crate::utils::hash_tagged;

/// Length of a recoverable signature in Stacks compact form
pub const SIGNATURE_LEN: usize = 65;

/// The canonical description of a channel state at a given nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Channel the update belongs to
    pub channel_id: ChannelId,
    /// Nonce after applying the update
    pub nonce: u64,
    /// Balances after applying the update, indexed by party
    pub balances: [u64; 2],
}

impl StateUpdate {
    /// Computes the digest that participants sign to authorize this update
    ///
    /// The digest is `sha512_256(UPDATE_DOMAIN_TAG || channel_id || nonce ||
    /// balance_a || balance_b)` with integers in little-endian byte order.
    pub fn signing_digest(&self) -> Bytes32 {
        hash_tagged(
            UPDATE_DOMAIN_TAG,
            &[
                &self.channel_id,
                &self.nonce.to_le_bytes(),
                &self.balances[0].to_le_bytes(),
                &self.balances[1].to_le_bytes(),
            ],
        )
    }
}

/// A recoverable signature in Stacks compact form: the recovery id byte
/// followed by the 64-byte compact signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSignature(pub [u8; SIGNATURE_LEN]);

impl UpdateSignature {
    /// Converts into the secp256k1 recoverable signature type
    pub fn to_recoverable(self) -> Result<RecoverableSignature, secp256k1::Error> {
        let recovery_id = RecoveryId::from_i32(i32::from(self.0[0]))?;
        RecoverableSignature::from_compact(&self.0[1..], recovery_id)
    }

    /// Builds from a secp256k1 recoverable signature
    pub fn from_recoverable(sig: &RecoverableSignature) -> Self {
        let (recovery_id, data) = sig.serialize_compact();
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[0] = recovery_id.to_i32() as u8;
        bytes[1..].copy_from_slice(&data);
        Self(bytes)
    }
}

impl fmt::Display for UpdateSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// Serialized as a hex string: serde has no built-in support for 65-byte
// arrays and the hex form matches how Stacks APIs carry signatures.
impl Serialize for UpdateSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for UpdateSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let decoded = hex::decode(&encoded).map_err(D::Error::custom)?;
        let bytes: [u8; SIGNATURE_LEN] = decoded
            .try_into()
            .map_err(|_| D::Error::custom("signature must be 65 bytes"))?;
        Ok(Self(bytes))
    }
}

/// An off-chain channel transaction: a signed state update together with
/// the transfer it represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTransaction {
    /// The state update this transaction applies
    pub update: StateUpdate,
    /// Party whose balance decreases
    pub sender: Party,
    /// Transfer amount in microSTX
    pub amount: u64,
    /// Sender's signature over the update digest
    pub signature: UpdateSignature,
}

/// Signs a state update with the given secret key
pub fn sign_update(update: &StateUpdate, secret_key: &SecretKey) -> UpdateSignature {
    sign_digest(update.signing_digest(), secret_key)
}

/// Signs an arbitrary 32-byte digest with the given secret key
pub fn sign_digest(digest: Bytes32, secret_key: &SecretKey) -> UpdateSignature {
    let secp = Secp256k1::new();
    let message = Message::from_digest(digest);
    let signature = secp.sign_ecdsa_recoverable(&message, secret_key);
    UpdateSignature::from_recoverable(&signature)
}

/// Recovers the public key that produced a signature over a digest
pub fn recover_signer(
    digest: Bytes32,
    signature: &UpdateSignature,
) -> Result<PublicKey, ChannelError> {
    let secp = Secp256k1::new();
    let message = Message::from_digest(digest);
    let recoverable = signature.to_recoverable()?;
    Ok(secp.recover_ecdsa(&message, &recoverable)?)
}

/// Verifies that a signature over a digest was produced by the expected key
///
/// # Returns
/// * `Ok(())` - The recovered key matches `expected`
/// * `Err(ChannelError::SignerMismatch)` - A different key produced the signature
/// * `Err(ChannelError::Signature)` - The signature is malformed
pub fn verify_signer(
    digest: Bytes32,
    signature: &UpdateSignature,
    expected: &PublicKey,
    expected_party: Party,
) -> Result<(), ChannelError> {
    let recovered = recover_signer(digest, signature)?;
    if recovered != *expected {
        return Err(ChannelError::SignerMismatch { expected_party });
    }
    Ok(())
}
