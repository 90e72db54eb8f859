//! Fixed-layout settlement payload
//!
//! Every settlement transaction carries a 45-byte payload buffer that
//! identifies the channel and the nonce being settled: magic bytes, a
//! format version, the channel id, and the nonce. Indexers can pick
//! settlements out of contract-call arguments without replaying the
//! contract.

use crate::errors::SettlementError;
use crate::types::{
    ChannelId, SETTLEMENT_MAGIC_BYTES, SETTLEMENT_OFFSET_CHANNEL_ID, SETTLEMENT_OFFSET_MAGIC,
    SETTLEMENT_OFFSET_NONCE, SETTLEMENT_OFFSET_VERSION, SETTLEMENT_PAYLOAD_LEN,
    SETTLEMENT_VERSION,
};

/// Encodes a channel id and nonce into the settlement payload format
pub fn encode_settlement_payload(channel_id: ChannelId, nonce: u64) -> Vec<u8> {
    let mut encoded_bytes = Vec::with_capacity(SETTLEMENT_PAYLOAD_LEN);
    encoded_bytes.extend_from_slice(SETTLEMENT_MAGIC_BYTES);
    encoded_bytes.push(SETTLEMENT_VERSION);
    encoded_bytes.extend_from_slice(&channel_id);
    encoded_bytes.extend_from_slice(&nonce.to_be_bytes());
    encoded_bytes
}

/// Decodes a settlement payload back to a channel id and nonce
///
/// # Returns
/// * `Ok((channel_id, nonce))` - Well-formed payload
/// * `Err(SettlementError::PayloadLength)` - Not exactly 45 bytes
/// * `Err(SettlementError::BadMagic)` - Magic bytes do not match
/// * `Err(SettlementError::UnsupportedVersion)` - Unknown format version
pub fn decode_settlement_payload(
    encoded_bytes: &[u8],
) -> Result<(ChannelId, u64), SettlementError> {
    if encoded_bytes.len() != SETTLEMENT_PAYLOAD_LEN {
        return Err(SettlementError::PayloadLength {
            size: encoded_bytes.len(),
            expected: SETTLEMENT_PAYLOAD_LEN,
        });
    }

    if &encoded_bytes[SETTLEMENT_OFFSET_MAGIC..SETTLEMENT_OFFSET_VERSION]
        != SETTLEMENT_MAGIC_BYTES
    {
        return Err(SettlementError::BadMagic);
    }

    let version = encoded_bytes[SETTLEMENT_OFFSET_VERSION];
    if version != SETTLEMENT_VERSION {
        return Err(SettlementError::UnsupportedVersion(version));
    }

    let mut channel_id = [0u8; 32];
    channel_id
        .copy_from_slice(&encoded_bytes[SETTLEMENT_OFFSET_CHANNEL_ID..SETTLEMENT_OFFSET_NONCE]);

    let mut nonce_bytes = [0u8; 8];
    nonce_bytes.copy_from_slice(&encoded_bytes[SETTLEMENT_OFFSET_NONCE..]);
    let nonce = u64::from_be_bytes(nonce_bytes);

    Ok((channel_id, nonce))
}
