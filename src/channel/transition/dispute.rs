//! Dispute transitions
//!
//! These transitions adjudicate a channel when cooperation breaks down.
//!
//! The transitions specify:
//! - Valid source and target states: Open → Disputed → Disputed → Closed
//! - Preconditions that must hold before each transition can be applied
//! - Postconditions that are guaranteed after a successful transition
//! - Window rules measured in burn block heights
//!
//! A participant posts a [`DisputeClaim`] with [`apply_dispute`], which
//! starts a dispute window. A claim is only admissible when its signature
//! recovers to the counterparty of the poster: a party holds states the
//! other side signed, so requiring the counterparty key makes a claim
//! impossible to fabricate unilaterally. While the window runs, either
//! party may supersede the standing claim with a strictly higher-nonce
//! counterparty-signed claim via [`apply_dispute_update`]. Once the window
//! elapses, [`apply_dispute_timeout`] finalizes the channel at the standing
//! claim's balances.

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use crate::channel::commitment::{compute_closed_commitment, compute_disputed_commitment};
use crate::channel::state::{CloseReason, Closed, Disputed, DisputedParams, Open};
use crate::channel::update::{recover_signer, StateUpdate, UpdateSignature};
use crate::errors::ChannelError::{BalanceOverflow, ChannelIdMismatch, UnknownSigner};
use crate::errors::DisputeError::{
    ClaimCapacityMismatch, ExpiryOverflow, SelfSignedClaim, StaleClaim, WindowElapsed,
    WindowNotElapsed,
};
use crate::types::{ChannelId, Party};
use crate::Result;

/// A signed state claim posted to open or supersede a dispute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeClaim {
    /// The state update being claimed as latest
    pub update: StateUpdate,
    /// The counterparty's signature over the update digest
    pub signature: UpdateSignature,
}

/// Recovers the claim's signer and checks it against the participant keys
fn claim_signer(claim: &DisputeClaim, participant_keys: [PublicKey; 2]) -> Result<Party> {
    let recovered = recover_signer(claim.update.signing_digest(), &claim.signature)?;
    if recovered == participant_keys[Party::A.index()] {
        Ok(Party::A)
    } else if recovered == participant_keys[Party::B.index()] {
        Ok(Party::B)
    } else {
        Err(UnknownSigner.into())
    }
}

/// Checks that the claim was signed by the counterparty of the poster
///
/// A self-signed claim is a unilateral attestation and proves nothing; only
/// states the other side signed can be posted.
fn validate_claim_signer(
    claim: &DisputeClaim,
    participant_keys: [PublicKey; 2],
    posted_by: Party,
) -> Result<()> {
    let signed_by = claim_signer(claim, participant_keys)?;
    if signed_by != posted_by.opposite() {
        return Err(SelfSignedClaim { posted_by, signed_by }.into());
    }
    Ok(())
}

/// Checks that the claimed balances redistribute exactly the channel capacity
fn validate_claim_capacity(claim: &DisputeClaim, total_capacity: u64) -> Result<()> {
    let claimed_total = claim.update.balances[0]
        .checked_add(claim.update.balances[1])
        .ok_or(crate::errors::ChannelError::BalanceOverflow)?;
    if claimed_total != total_capacity {
        return Err(ClaimCapacityMismatch { claimed_total, total_capacity }.into());
    }
    Ok(())
}

/// Apply a dispute to an Open state
///
/// Posts a counterparty-signed state claim and starts the dispute window.
/// The claim must be signed by the counterparty of `initiated_by` and must
/// redistribute exactly the channel's total capacity. The window elapses at
/// `current_height + dispute_window_blocks`.
///
/// # Arguments
/// * `channel_id` - Channel identifier
/// * `state` - Current Open state
/// * `claim` - Signed state claim to post
/// * `initiated_by` - Party posting the claim
/// * `current_height` - Current burn block height
///
/// # Returns
/// * `Ok(Disputed)` - Channel with a running dispute window
/// * `Err(Error::Channel(ChannelError::ChannelIdMismatch))` - Claim built for another channel
/// * `Err(Error::Channel(ChannelError::UnknownSigner))` - Claim not signed by a participant
/// * `Err(Error::Dispute(DisputeError::SelfSignedClaim))` - Claim signed by the poster
/// * `Err(Error::Dispute(DisputeError::ClaimCapacityMismatch))` - Claim does not conserve capacity
/// * `Err(Error::Dispute(DisputeError::ExpiryOverflow))` - Expiry height would overflow
pub fn apply_dispute(
    channel_id: ChannelId,
    state: &Open,
    claim: &DisputeClaim,
    initiated_by: Party,
    current_height: u64,
) -> Result<Disputed> {
    if claim.update.channel_id != channel_id {
        return Err(ChannelIdMismatch.into());
    }

    let total_capacity = state.total_capacity().ok_or(BalanceOverflow)?;
    validate_claim_capacity(claim, total_capacity)?;

    let participant_keys = [state.participants[0].pubkey, state.participants[1].pubkey];
    validate_claim_signer(claim, participant_keys, initiated_by)?;

    let expiry_height = current_height
        .checked_add(u64::from(state.dispute_window_blocks))
        .ok_or(ExpiryOverflow)?;

    let mut disputed = Disputed::new(DisputedParams {
        participants: state.participants,
        total_capacity,
        claimed_balances: claim.update.balances,
        claimed_nonce: claim.update.nonce,
        initiated_by,
        expiry_height,
        dispute_window_blocks: state.dispute_window_blocks,
    });
    disputed.commitment = compute_disputed_commitment(channel_id, &disputed);

    Ok(disputed)
}

/// Apply a superseding claim to a Disputed state
///
/// While the dispute window is running, a strictly higher-nonce claim
/// signed by the counterparty of `posted_by` replaces the standing claim.
/// The window expiry does not reset.
///
/// # Returns
/// * `Ok(Disputed)` - Dispute with the superseding claim standing
/// * `Err(Error::Dispute(DisputeError::WindowElapsed))` - Window already elapsed
/// * `Err(Error::Dispute(DisputeError::StaleClaim))` - Claim nonce does not exceed the standing nonce
/// * `Err(Error::Dispute(DisputeError::SelfSignedClaim))` - Claim signed by the poster
/// * `Err(Error::Dispute(DisputeError::ClaimCapacityMismatch))` - Claim does not conserve capacity
/// * `Err(Error::Channel(ChannelError::UnknownSigner))` - Claim not signed by a participant
pub fn apply_dispute_update(
    channel_id: ChannelId,
    state: &Disputed,
    claim: &DisputeClaim,
    posted_by: Party,
    current_height: u64,
) -> Result<Disputed> {
    if claim.update.channel_id != channel_id {
        return Err(ChannelIdMismatch.into());
    }

    if current_height >= state.expiry_height {
        return Err(
            WindowElapsed { current_height, expiry_height: state.expiry_height }.into()
        );
    }

    if claim.update.nonce <= state.claimed_nonce {
        return Err(StaleClaim {
            provided_nonce: claim.update.nonce,
            standing_nonce: state.claimed_nonce,
        }
        .into());
    }

    validate_claim_capacity(claim, state.total_capacity)?;

    let participant_keys = [state.participants[0].pubkey, state.participants[1].pubkey];
    validate_claim_signer(claim, participant_keys, posted_by)?;

    let mut disputed = Disputed::new(DisputedParams {
        participants: state.participants,
        total_capacity: state.total_capacity,
        claimed_balances: claim.update.balances,
        claimed_nonce: claim.update.nonce,
        initiated_by: state.initiated_by,
        expiry_height: state.expiry_height,
        dispute_window_blocks: state.dispute_window_blocks,
    });
    disputed.commitment = compute_disputed_commitment(channel_id, &disputed);

    Ok(disputed)
}

/// Apply a dispute timeout to a Disputed state
///
/// Once the window has elapsed, the standing claim is final and the channel
/// closes at the claimed balances. The claimed nonce carries over to the
/// Closed state.
///
/// # Returns
/// * `Ok(Closed)` - Channel finalized at the standing claim
/// * `Err(Error::Dispute(DisputeError::WindowNotElapsed))` - Window still running
pub fn apply_dispute_timeout(
    channel_id: ChannelId,
    state: &Disputed,
    current_height: u64,
) -> Result<Closed> {
    if current_height < state.expiry_height {
        return Err(
            WindowNotElapsed { current_height, expiry_height: state.expiry_height }.into()
        );
    }

    let mut closed = Closed::new(
        state.participants,
        state.total_capacity,
        state.claimed_balances,
        state.claimed_nonce,
        CloseReason::DisputeTimeout,
    );
    closed.commitment = compute_closed_commitment(channel_id, &closed);

    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::test_utils::*;
    use crate::channel::update::sign_update;
    use crate::errors::{ChannelError, DisputeError};
    use crate::types::DEFAULT_DISPUTE_WINDOW_BLOCKS;
    use crate::Error;

    fn signed_claim(channel_id: ChannelId, nonce: u64, balances: [u64; 2], by_a: bool) -> DisputeClaim {
        let (sk_a, sk_b) = test_secret_keys();
        let update = StateUpdate { channel_id, nonce, balances };
        let signature = sign_update(&update, if by_a { &sk_a } else { &sk_b });
        DisputeClaim { update, signature }
    }

    #[test]
    fn test_apply_dispute() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);
        let claim = signed_claim(channel_id, 3, [700, 1300], false);

        let disputed = apply_dispute(channel_id, &state, &claim, Party::A, 500).expect("valid");

        assert_eq!(disputed.claimed_balances, [700, 1300]);
        assert_eq!(disputed.claimed_nonce, 3);
        assert_eq!(disputed.initiated_by, Party::A);
        assert_eq!(disputed.total_capacity, 2000);
        assert_eq!(disputed.expiry_height, 500 + u64::from(DEFAULT_DISPUTE_WINDOW_BLOCKS));
        assert!(disputed.validate_balances());
        assert_eq!(disputed.commitment, compute_disputed_commitment(channel_id, &disputed));
    }

    #[test]
    fn test_apply_dispute_rejects_bad_claims() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);

        // Claim for another channel
        let foreign = signed_claim([9u8; 32], 3, [700, 1300], false);
        assert!(matches!(
            apply_dispute(channel_id, &state, &foreign, Party::A, 500),
            Err(Error::Channel(ChannelError::ChannelIdMismatch))
        ));

        // Claim inflating the channel capacity
        let inflated = signed_claim(channel_id, 3, [1000, 1300], false);
        match apply_dispute(channel_id, &state, &inflated, Party::A, 500)
            .expect_err("capacity branch")
        {
            Error::Dispute(DisputeError::ClaimCapacityMismatch { claimed_total, total_capacity }) => {
                assert_eq!(claimed_total, 2300);
                assert_eq!(total_capacity, 2000);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Claim signed by neither participant
        let update = StateUpdate { channel_id, nonce: 3, balances: [700, 1300] };
        let outsider = DisputeClaim {
            update,
            signature: sign_update(&update, &outsider_secret_key()),
        };
        assert!(matches!(
            apply_dispute(channel_id, &state, &outsider, Party::A, 500),
            Err(Error::Channel(ChannelError::UnknownSigner))
        ));

        // Expiry height overflowing
        let claim = signed_claim(channel_id, 3, [700, 1300], false);
        assert!(matches!(
            apply_dispute(channel_id, &state, &claim, Party::A, u64::MAX),
            Err(Error::Dispute(DisputeError::ExpiryOverflow))
        ));
    }

    #[test]
    fn test_apply_dispute_rejects_self_signed_claim() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);

        // A fabricates the most favorable state possible under her own key:
        // the whole capacity to herself at the highest representable nonce,
        // which no genuine claim could ever supersede
        let forged = signed_claim(channel_id, u64::MAX, [2000, 0], true);

        match apply_dispute(channel_id, &state, &forged, Party::A, 500)
            .expect_err("self-signed branch")
        {
            Error::Dispute(DisputeError::SelfSignedClaim { posted_by, signed_by }) => {
                assert_eq!(posted_by, Party::A);
                assert_eq!(signed_by, Party::A);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The same signed state is admissible when the counterparty posts it
        apply_dispute(channel_id, &state, &forged, Party::B, 500).expect("counterparty-signed");
    }

    #[test]
    fn test_apply_dispute_update_supersedes() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);
        let stale = signed_claim(channel_id, 3, [700, 1300], false);
        let disputed = apply_dispute(channel_id, &state, &stale, Party::A, 500).expect("valid");

        // Counterparty supersedes with a newer state the other side signed
        let newer = signed_claim(channel_id, 5, [400, 1600], true);
        let superseded =
            apply_dispute_update(channel_id, &disputed, &newer, Party::B, 550).expect("valid");

        assert_eq!(superseded.claimed_balances, [400, 1600]);
        assert_eq!(superseded.claimed_nonce, 5);
        // The window and initiator do not reset
        assert_eq!(superseded.expiry_height, disputed.expiry_height);
        assert_eq!(superseded.initiated_by, Party::A);
        assert_ne!(superseded.commitment, disputed.commitment);
    }

    #[test]
    fn test_apply_dispute_update_rejects_self_signed_claim() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);
        let standing = signed_claim(channel_id, 3, [700, 1300], false);
        let disputed = apply_dispute(channel_id, &state, &standing, Party::A, 500).expect("valid");

        // B answers with a state only B signed
        let forged = signed_claim(channel_id, 9, [0, 2000], false);
        assert!(matches!(
            apply_dispute_update(channel_id, &disputed, &forged, Party::B, 550),
            Err(Error::Dispute(DisputeError::SelfSignedClaim {
                posted_by: Party::B,
                signed_by: Party::B,
            }))
        ));
    }

    #[test]
    fn test_apply_dispute_update_rejects_stale_and_late() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);
        let standing = signed_claim(channel_id, 5, [700, 1300], false);
        let disputed = apply_dispute(channel_id, &state, &standing, Party::A, 500).expect("valid");

        // Equal nonce does not supersede
        let equal = signed_claim(channel_id, 5, [400, 1600], true);
        assert!(matches!(
            apply_dispute_update(channel_id, &disputed, &equal, Party::B, 550),
            Err(Error::Dispute(DisputeError::StaleClaim { provided_nonce: 5, standing_nonce: 5 }))
        ));

        // Lower nonce does not supersede
        let older = signed_claim(channel_id, 4, [400, 1600], true);
        assert!(matches!(
            apply_dispute_update(channel_id, &disputed, &older, Party::B, 550),
            Err(Error::Dispute(DisputeError::StaleClaim { provided_nonce: 4, standing_nonce: 5 }))
        ));

        // After the window elapses, no claim supersedes
        let newer = signed_claim(channel_id, 6, [400, 1600], true);
        let late_height = disputed.expiry_height;
        assert!(matches!(
            apply_dispute_update(channel_id, &disputed, &newer, Party::B, late_height),
            Err(Error::Dispute(DisputeError::WindowElapsed { .. }))
        ));
    }

    #[test]
    fn test_apply_dispute_timeout() {
        let channel_id = [0u8; 32];
        let state = Open::new(test_participants(), [1000, 1000]);
        let claim = signed_claim(channel_id, 3, [700, 1300], false);
        let disputed = apply_dispute(channel_id, &state, &claim, Party::A, 500).expect("valid");

        // Window still running, one block short of expiry
        let early = disputed.expiry_height - 1;
        match apply_dispute_timeout(channel_id, &disputed, early).expect_err("window branch") {
            Error::Dispute(DisputeError::WindowNotElapsed { current_height, expiry_height }) => {
                assert_eq!(current_height, early);
                assert_eq!(expiry_height, disputed.expiry_height);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // At expiry the standing claim finalizes
        let closed =
            apply_dispute_timeout(channel_id, &disputed, disputed.expiry_height).expect("valid");

        assert_eq!(closed.final_balances, [700, 1300]);
        assert_eq!(closed.nonce, 3);
        assert_eq!(closed.close_reason, CloseReason::DisputeTimeout);
        assert_eq!(closed.settlement_txid, None);
        assert_eq!(closed.commitment, compute_closed_commitment(channel_id, &closed));
    }
}
