//! Cooperative close transition
//!
//! This transition closes an Open channel by mutual agreement.
//!
//! This transition specifies:
//! - Valid source and target states: Open → Settling → Closed
//! - Preconditions that must hold before the transition can be applied
//! - Postconditions that are guaranteed after a successful transition
//! - Input requirements and validation rules
//!
//! Closing is a two-phase protocol. First both participants sign a
//! [`CloseProposal`] fixing the final balances, which moves the channel to
//! Settling via [`apply_cooperative_close`]. Once the settlement transaction
//! confirms on-chain, [`apply_settlement_confirmation`] moves the channel to
//! its terminal Closed state.

use crate::channel::commitment::{compute_closed_commitment, compute_settling_commitment};
use crate::channel::state::{CloseReason, Closed, Open, Settling};
use crate::channel::update::{verify_signer, UpdateSignature};
use crate::errors::ChannelError::{BalanceOverflow, ChannelIdMismatch, CloseBalancesMismatch, NonceOverflow};
use crate::types::{Bytes32, ChannelId, Party, TxId, CLOSE_DOMAIN_TAG};
use crate::utils::hash_tagged;
use crate::Result;

/// A proposal to close the channel at its current balances
///
/// Both participants sign the proposal digest. The digest is domain-tagged
/// differently from transfer updates, so a close signature can never be
/// replayed as a transfer and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseProposal {
    /// Channel the proposal belongs to
    pub channel_id: ChannelId,
    /// Nonce the close settles at (one past the last transfer)
    pub nonce: u64,
    /// Final balances, indexed by party
    pub final_balances: [u64; 2],
}

impl CloseProposal {
    /// Computes the digest that participants sign to authorize this close
    pub fn signing_digest(&self) -> Bytes32 {
        hash_tagged(
            CLOSE_DOMAIN_TAG,
            &[
                &self.channel_id,
                &self.nonce.to_le_bytes(),
                &self.final_balances[0].to_le_bytes(),
                &self.final_balances[1].to_le_bytes(),
            ],
        )
    }
}

/// Builds a close proposal settling the channel at its current balances
///
/// The proposal consumes the next nonce so it supersedes every transfer
/// signed before it.
///
/// # Returns
/// * `Ok(CloseProposal)` - Proposal ready for both parties to sign
/// * `Err(Error::Channel(ChannelError::NonceOverflow))` - Nonce would overflow
pub fn propose_close(channel_id: ChannelId, state: &Open) -> Result<CloseProposal> {
    let nonce = state.nonce.checked_add(1).ok_or(NonceOverflow)?;
    Ok(CloseProposal { channel_id, nonce, final_balances: state.balances })
}

/// Apply a cooperative close to an Open state
///
/// Validates that the proposal settles the channel at its current balances
/// and that both participants signed the proposal digest, then returns the
/// Settling state with its commitment computed.
///
/// # Arguments
/// * `channel_id` - Channel identifier
/// * `state` - Current Open state
/// * `proposal` - Close proposal both parties agreed on
/// * `signature_a` - Party A's signature over the proposal digest
/// * `signature_b` - Party B's signature over the proposal digest
///
/// # Returns
/// * `Ok(Settling)` - Channel awaiting settlement confirmation
/// * `Err(Error::Channel(ChannelError::ChannelIdMismatch))` - Proposal built for another channel
/// * `Err(Error::Channel(ChannelError::StaleUpdate))` - Proposal nonce does not continue the state
/// * `Err(Error::Channel(ChannelError::CloseBalancesMismatch))` - Proposal disagrees with state balances
/// * `Err(Error::Channel(ChannelError::SignerMismatch))` - A signature was not produced by its party
pub fn apply_cooperative_close(
    channel_id: ChannelId,
    state: &Open,
    proposal: &CloseProposal,
    signature_a: &UpdateSignature,
    signature_b: &UpdateSignature,
) -> Result<Settling> {
    if proposal.channel_id != channel_id {
        return Err(ChannelIdMismatch.into());
    }

    let expected_nonce = state.nonce.checked_add(1).ok_or(NonceOverflow)?;
    if proposal.nonce != expected_nonce {
        return Err(crate::errors::ChannelError::StaleUpdate {
            provided_nonce: proposal.nonce,
            expected_nonce,
        }
        .into());
    }

    if proposal.final_balances != state.balances {
        return Err(CloseBalancesMismatch {
            proposed_a: proposal.final_balances[0],
            proposed_b: proposal.final_balances[1],
            state_a: state.balances[0],
            state_b: state.balances[1],
        }
        .into());
    }

    let digest = proposal.signing_digest();
    verify_signer(digest, signature_a, &state.participant(Party::A).pubkey, Party::A)?;
    verify_signer(digest, signature_b, &state.participant(Party::B).pubkey, Party::B)?;

    let total_capacity = state.total_capacity().ok_or(BalanceOverflow)?;
    let mut settling =
        Settling::new(state.participants, total_capacity, proposal.final_balances, proposal.nonce);
    settling.commitment = compute_settling_commitment(channel_id, &settling);

    Ok(settling)
}

/// Apply a settlement confirmation to a Settling state
///
/// Records the confirmed settlement transaction id and moves the channel to
/// its terminal Closed state.
pub fn apply_settlement_confirmation(
    channel_id: ChannelId,
    state: &Settling,
    settlement_txid: TxId,
) -> Closed {
    let mut closed = Closed::new(
        state.participants,
        state.total_capacity,
        state.final_balances,
        state.nonce,
        CloseReason::Cooperative,
    );
    closed.settlement_txid = Some(settlement_txid);
    closed.commitment = compute_closed_commitment(channel_id, &closed);
    closed
}
