//! Closed state
//!
//! This state represents a permanently closed channel. No further
//! transitions are allowed from this state and all values are final.
//!
//! # Invariants
//!
//! - State is immutable and final
//! - No new transitions allowed
//! - Channel has been fully settled

use serde::{Deserialize, Serialize};

use crate::channel::participant::Participant;
use crate::types::{ChannelCommitment, TxId};

/// How a channel reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    /// Both parties signed a close proposal and settlement confirmed
    Cooperative,
    /// A dispute window elapsed and the standing claim was finalized
    DisputeTimeout,
}

/// Permanently closed channel state representing the terminal state with
/// final balances and commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closed {
    /// The two channel participants, in fixed order
    pub participants: [Participant; 2],
    /// Total channel capacity
    pub total_capacity: u64,
    /// Final balances, indexed by party
    pub final_balances: [u64; 2],
    /// Final nonce value
    pub nonce: u64,
    /// How the channel was closed
    pub close_reason: CloseReason,
    /// Settlement transaction id, when one was broadcast
    pub settlement_txid: Option<TxId>,
    /// Final commitment
    pub commitment: ChannelCommitment,
}

impl Closed {
    /// Creates a new Closed state
    ///
    /// # Arguments
    /// * `participants` - The two channel participants
    /// * `total_capacity` - Total channel capacity
    /// * `final_balances` - Final balances, indexed by party
    /// * `nonce` - Final nonce value
    /// * `close_reason` - How the channel was closed
    pub fn new(
        participants: [Participant; 2],
        total_capacity: u64,
        final_balances: [u64; 2],
        nonce: u64,
        close_reason: CloseReason,
    ) -> Self {
        Self {
            participants,
            total_capacity,
            final_balances,
            nonce,
            close_reason,
            settlement_txid: None,
            commitment: ChannelCommitment::default(),
        }
    }
}
