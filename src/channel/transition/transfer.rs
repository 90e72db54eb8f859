//! Transfer transition
//!
//! This transition processes a transfer within an Open channel.
//!
//! This transition specifies:
//! - Valid source and target states: Open → Open
//! - Preconditions that must hold before the transition can be applied
//! - Postconditions that are guaranteed after a successful transition
//! - Input requirements and validation rules
//! - Nonce progression rules (strict +1 increment)
//!
//! A transfer is produced by the sender with [`create_transfer`] and applied
//! by any participant with [`apply_transfer`]. Creation and application are
//! separate so that the receiving side validates a transaction exactly the
//! way it would validate one received over the wire.

use std::ops::Deref;

use secp256k1::SecretKey;

use crate::channel::commitment::compute_open_commitment;
use crate::channel::state::Open;
use crate::channel::update::{sign_update, verify_signer, ChannelTransaction, StateUpdate};
use crate::errors::ChannelError::{
    AmountMismatch, BalanceConservation, BalanceOverflow, ChannelIdMismatch, InsufficientBalance,
    MemoTooLarge, NonceOverflow, StaleUpdate,
};
use crate::types::{ChannelId, Party, MAX_MEMO_SIZE};
use crate::Result;

/// Transfer amount structure
///
/// A validated transfer amount for channel state transitions. Represents a
/// non-zero amount in microSTX to move from the sender to the counterparty.
///
/// # Usage
///
/// `TransferAmount` implements `Deref<Target = u64>`, so it can be used
/// directly as a `u64` in most contexts:
///
/// ```rust
/// use stx_scaling::channel::TransferAmount;
///
/// fn main() -> Result<(), stx_scaling::errors::ChannelError> {
///     let amount = TransferAmount::new(100)?;
///     let doubled = *amount * 2;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferAmount(u64);

impl TransferAmount {
    /// Create a new transfer amount
    ///
    /// # Arguments
    /// * `amount` - The amount to transfer (must be > 0)
    ///
    /// # Returns
    /// * `Ok(TransferAmount)` - If the amount is valid
    /// * `Err(ChannelError::InvalidZeroTransfer)` - If amount is 0
    pub fn new(amount: u64) -> std::result::Result<Self, crate::errors::ChannelError> {
        if amount == 0 {
            return Err(crate::errors::ChannelError::InvalidZeroTransfer);
        }
        Ok(Self(amount))
    }
}

impl Deref for TransferAmount {
    type Target = u64;

    #[inline]
    fn deref(&self) -> &Self::Target { &self.0 }
}

fn validate_memo_size(memo: &[u8]) -> Result<()> {
    if memo.len() > MAX_MEMO_SIZE {
        return Err(MemoTooLarge { size: memo.len(), max_size: MAX_MEMO_SIZE }.into());
    }
    Ok(())
}

/// Computes the balances after moving `amount` from `sender` to the counterparty
fn next_balances(state: &Open, sender: Party, amount: &TransferAmount) -> Result<[u64; 2]> {
    let sender_index = sender.index();
    let receiver_index = sender.opposite().index();

    let new_sender_balance = state.balances[sender_index].checked_sub(**amount).ok_or(
        InsufficientBalance { balance: state.balances[sender_index], amount: **amount },
    )?;
    let new_receiver_balance =
        state.balances[receiver_index].checked_add(**amount).ok_or(BalanceOverflow)?;

    let mut balances = [0u64; 2];
    balances[sender_index] = new_sender_balance;
    balances[receiver_index] = new_receiver_balance;
    Ok(balances)
}

/// Create a signed channel transaction transferring an amount to the counterparty
///
/// The sender builds the successor state update (nonce +1, balances moved by
/// `amount`) and signs its digest.
///
/// # Arguments
/// * `channel_id` - Channel identifier
/// * `state` - Current Open state
/// * `sender` - Party whose balance decreases
/// * `amount` - Transfer amount to apply
/// * `sender_sk` - Sender's private key for signing the update digest
///
/// # Returns
/// * `Ok(ChannelTransaction)` - Signed transaction ready for [`apply_transfer`]
/// * `Err(Error::Channel(ChannelError::InsufficientBalance))` - Sender balance too low
/// * `Err(Error::Channel(ChannelError::BalanceOverflow))` - Balance math would overflow
/// * `Err(Error::Channel(ChannelError::NonceOverflow))` - Nonce would overflow
pub fn create_transfer(
    channel_id: ChannelId,
    state: &Open,
    sender: Party,
    amount: &TransferAmount,
    sender_sk: &SecretKey,
) -> Result<ChannelTransaction> {
    validate_memo_size(&state.memo)?;

    let balances = next_balances(state, sender, amount)?;
    let nonce = state.nonce.checked_add(1).ok_or(NonceOverflow)?;

    let update = StateUpdate { channel_id, nonce, balances };
    let signature = sign_update(&update, sender_sk);

    Ok(ChannelTransaction { update, sender, amount: **amount, signature })
}

/// Apply a channel transaction to an Open state
///
/// Validates the transaction against the current state and returns the new
/// Open state with its commitment recomputed. Validation checks, in order:
/// the channel id, the nonce progression (strict +1), balance conservation,
/// consistency of the declared amount with the balance delta, and the
/// sender's signature over the update digest.
///
/// # Arguments
/// * `channel_id` - Channel identifier
/// * `state` - Current Open state
/// * `tx` - Signed channel transaction to apply
///
/// # Returns
/// * `Ok(Open)` - New Open state after the transfer
/// * `Err(Error::Channel(ChannelError::ChannelIdMismatch))` - Transaction built for another channel
/// * `Err(Error::Channel(ChannelError::StaleUpdate))` - Nonce does not continue the state
/// * `Err(Error::Channel(ChannelError::BalanceConservation))` - Capacity not conserved
/// * `Err(Error::Channel(ChannelError::AmountMismatch))` - Declared amount disagrees with balances
/// * `Err(Error::Channel(ChannelError::SignerMismatch))` - Not signed by the declared sender
pub fn apply_transfer(channel_id: ChannelId, state: &Open, tx: &ChannelTransaction) -> Result<Open> {
    validate_memo_size(&state.memo)?;

    if tx.update.channel_id != channel_id {
        return Err(ChannelIdMismatch.into());
    }

    let expected_nonce = state.nonce.checked_add(1).ok_or(NonceOverflow)?;
    if tx.update.nonce != expected_nonce {
        return Err(
            StaleUpdate { provided_nonce: tx.update.nonce, expected_nonce }.into()
        );
    }

    let previous_total =
        state.balances[0].checked_add(state.balances[1]).ok_or(BalanceOverflow)?;
    let new_total = tx.update.balances[0]
        .checked_add(tx.update.balances[1])
        .ok_or(BalanceOverflow)?;
    if new_total != previous_total {
        return Err(BalanceConservation { previous_total, new_total }.into());
    }

    let sender_index = tx.sender.index();
    let actual = state.balances[sender_index]
        .checked_sub(tx.update.balances[sender_index])
        .ok_or(AmountMismatch { declared: tx.amount, actual: 0 })?;
    if actual != tx.amount {
        return Err(AmountMismatch { declared: tx.amount, actual }.into());
    }

    let sender_pubkey = state.participant(tx.sender).pubkey;
    verify_signer(tx.update.signing_digest(), &tx.signature, &sender_pubkey, tx.sender)?;

    let mut new_state = Open {
        participants: state.participants,
        balances: tx.update.balances,
        nonce: tx.update.nonce,
        commitment: state.commitment,
        memo: state.memo.clone(),
        dispute_window_blocks: state.dispute_window_blocks,
    };
    new_state.commitment = compute_open_commitment(channel_id, &new_state);

    Ok(new_state)
}
