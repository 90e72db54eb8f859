//! State commitment computation
//!
//! This module provides functions for computing commitments from channel states.
//! All commitments go through a shared two-stage SHA-512/256 pipeline with
//! domain separation, so a commitment binds the channel id, the state data,
//! and the nonce.

use sha2::{Digest, Sha512_256};

use crate::channel::participant::Participant;
use crate::channel::state::{Closed, Disputed, Open, Settling};
use crate::types::{Bytes32, ChannelCommitment, ChannelId, CHANNEL_DOMAIN_TAG};

// Lifecycle flags bound into the state hash, so states from different
// lifecycle families can never share a commitment.
const FLAG_OPEN: u64 = 0;
const FLAG_DISPUTED: u64 = 1;
const FLAG_SETTLING: u64 = 2;
const FLAG_CLOSED: u64 = 3;

/// Computes a commitment for an Open state
///
/// The commitment is computed using a two-stage hash:
/// 1. Stage 1: `sha512_256(CHANNEL_DOMAIN_TAG || channel_id || state_hash)` -> 32 bytes
/// 2. Stage 2: `sha512_256(stage1_result || nonce)` -> 32 bytes
///
/// where `state_hash = sha512_256(balance_a || balance_b || pubkey_a ||
/// pubkey_b || memo || lifecycle_flag)`
pub fn compute_open_commitment(channel_id: ChannelId, state: &Open) -> ChannelCommitment {
    let state_hash =
        compute_state_hash(state.balances, &state.participants, &state.memo, FLAG_OPEN);
    compute_channel_commitment(channel_id, state_hash, state.nonce)
}

/// Computes a commitment for a Disputed state
///
/// The standing claim's balances and nonce are committed; the expiry height
/// is tracked on-chain and excluded from the commitment.
pub fn compute_disputed_commitment(channel_id: ChannelId, state: &Disputed) -> ChannelCommitment {
    let state_hash =
        compute_state_hash(state.claimed_balances, &state.participants, &[], FLAG_DISPUTED);
    compute_channel_commitment(channel_id, state_hash, state.claimed_nonce)
}

/// Computes a commitment for a Settling state
pub fn compute_settling_commitment(channel_id: ChannelId, state: &Settling) -> ChannelCommitment {
    let state_hash =
        compute_state_hash(state.final_balances, &state.participants, &[], FLAG_SETTLING);
    compute_channel_commitment(channel_id, state_hash, state.nonce)
}

/// Computes a commitment for a Closed state
pub fn compute_closed_commitment(channel_id: ChannelId, state: &Closed) -> ChannelCommitment {
    let state_hash =
        compute_state_hash(state.final_balances, &state.participants, &[], FLAG_CLOSED);
    compute_channel_commitment(channel_id, state_hash, state.nonce)
}

/// Computes the hash of the state data
///
/// The state hash includes the balances, both participant public keys, the
/// memo, and the lifecycle flag. The channel id and the nonce are bound in
/// by `compute_channel_commitment`.
fn compute_state_hash(
    balances: [u64; 2],
    participants: &[Participant; 2],
    memo: &[u8],
    lifecycle_flag: u64,
) -> Bytes32 {
    let mut hasher = Sha512_256::new();
    hasher.update(balances[0].to_le_bytes());
    hasher.update(balances[1].to_le_bytes());
    hasher.update(participants[0].pubkey.serialize());
    hasher.update(participants[1].pubkey.serialize());
    hasher.update(memo);
    hasher.update(lifecycle_flag.to_le_bytes());
    hasher.finalize().into()
}

/// Computes the channel-specific commitment from `channel_id`, `state_hash`,
/// and `nonce`.
///
/// The `state_hash` represents the hash of the state data (balances, pubkeys,
/// memo, lifecycle flag) and excludes `channel_id` and `nonce`. The final
/// channel commitment is a hashed combination of all three components, first
/// prefixed with the domain separation tag `CHANNEL_DOMAIN_TAG`.
///
/// Uses a two-stage hash to preserve all data:
/// 1. Stage 1: `sha512_256(CHANNEL_DOMAIN_TAG || channel_id || state_hash)` -> 32 bytes
/// 2. Stage 2: `sha512_256(stage1_result || nonce)` -> 32 bytes
pub fn compute_channel_commitment(
    channel_id: ChannelId,
    state_hash: Bytes32,
    nonce: u64,
) -> ChannelCommitment {
    let mut stage1 = Sha512_256::new();
    stage1.update(CHANNEL_DOMAIN_TAG);
    stage1.update(channel_id);
    stage1.update(state_hash);
    let stage1_hash: Bytes32 = stage1.finalize().into();

    let mut stage2 = Sha512_256::new();
    stage2.update(stage1_hash);
    stage2.update(nonce.to_le_bytes());
    stage2.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::state::{CloseReason, DisputedParams};
    use crate::channel::test_utils::*;
    use crate::types::Party;

    #[test]
    fn test_compute_channel_commitment() {
        let channel_id = [0u8; 32];
        let state_hash = [0u8; 32];

        let commitment = compute_channel_commitment(channel_id, state_hash, 0);

        // Same inputs produce the same output
        assert_eq!(commitment, compute_channel_commitment(channel_id, state_hash, 0));

        // Each component changes the commitment
        assert_ne!(commitment, compute_channel_commitment(channel_id, state_hash, 1));
        assert_ne!(commitment, compute_channel_commitment([1u8; 32], state_hash, 0));
        assert_ne!(commitment, compute_channel_commitment(channel_id, [1u8; 32], 0));
    }

    #[test]
    fn test_compute_open_commitment() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);

        let commitment = compute_open_commitment(channel_id, &state);
        assert_eq!(commitment, compute_open_commitment(channel_id, &state));

        // Balances are bound
        let mut moved = state.clone();
        moved.balances = [900, 1100];
        assert_ne!(commitment, compute_open_commitment(channel_id, &moved));

        // Memo is bound
        let mut with_memo = state.clone();
        with_memo.memo = b"invoice 42".to_vec();
        assert_ne!(commitment, compute_open_commitment(channel_id, &with_memo));

        // Participants are bound
        let mut other_keys = state;
        other_keys.participants = different_test_participants();
        assert_ne!(commitment, compute_open_commitment(channel_id, &other_keys));
    }

    #[test]
    fn test_lifecycle_flags_separate_commitments() {
        let channel_id = [0u8; 32];
        let participants = test_participants();

        let open = Open::new(participants, [60, 40]);
        let disputed = Disputed::new(DisputedParams {
            participants,
            total_capacity: 100,
            claimed_balances: [60, 40],
            claimed_nonce: 0,
            initiated_by: Party::A,
            expiry_height: 144,
            dispute_window_blocks: 144,
        });
        let settling = Settling::new(participants, 100, [60, 40], 0);
        let closed = Closed::new(participants, 100, [60, 40], 0, CloseReason::Cooperative);

        let commitments = [
            compute_open_commitment(channel_id, &open),
            compute_disputed_commitment(channel_id, &disputed),
            compute_settling_commitment(channel_id, &settling),
            compute_closed_commitment(channel_id, &closed),
        ];

        // Identical balances and nonce, yet all four commitments differ
        for i in 0..commitments.len() {
            for j in (i + 1)..commitments.len() {
                assert_ne!(commitments[i], commitments[j]);
            }
        }
    }
}
