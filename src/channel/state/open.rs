//! Open state
//!
//! This state represents an active channel that can process transfers
//! between two fixed participants. The channel tracks static identity
//! (addresses and pubkeys) and dynamic state (balances, nonce,
//! commitment, memo).
//!
//! # Invariants
//!
//! - Party balances sum to the channel's total capacity
//! - Nonce increments on each transition
//! - Channel is not closed

use serde::{Deserialize, Serialize};

use crate::channel::participant::Participant;
use crate::types::{ChannelCommitment, Party, DEFAULT_DISPUTE_WINDOW_BLOCKS};

/// Active channel state with fixed participants, balances, and commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Open {
    /// The two channel participants, in fixed order
    pub participants: [Participant; 2],
    /// Current balances, indexed by party
    pub balances: [u64; 2],
    /// Current nonce value
    pub nonce: u64,
    /// Commitment over the channel state
    pub commitment: ChannelCommitment,
    /// Memo carried through to settlement
    pub memo: Vec<u8>,
    /// Dispute window duration in burn blocks (configurable per channel)
    pub dispute_window_blocks: u32,
}

impl Open {
    /// Creates a new Open state with the default dispute window
    ///
    /// # Arguments
    /// * `participants` - The two channel participants
    /// * `initial_balances` - Initial balances in microSTX, indexed by party
    pub fn new(participants: [Participant; 2], initial_balances: [u64; 2]) -> Self {
        Self::with_dispute_window(participants, initial_balances, DEFAULT_DISPUTE_WINDOW_BLOCKS)
    }

    /// Creates a new Open state with a custom dispute window
    ///
    /// This allows per-channel configuration of the dispute window. The
    /// window determines how many burn blocks must pass before a dispute
    /// can be finalized at the claimed balances.
    pub fn with_dispute_window(
        participants: [Participant; 2],
        initial_balances: [u64; 2],
        dispute_window_blocks: u32,
    ) -> Self {
        Self {
            participants,
            balances: initial_balances,
            nonce: 0,
            commitment: ChannelCommitment::default(),
            memo: vec![],
            dispute_window_blocks,
        }
    }

    /// Gets the balance of the given party
    pub fn balance_of(&self, party: Party) -> u64 {
        self.balances[party.index()]
    }

    /// Gets the participant for the given party
    pub fn participant(&self, party: Party) -> &Participant {
        &self.participants[party.index()]
    }

    /// Computes the total channel capacity as the sum of both balances
    ///
    /// Returns `None` if the sum overflows; transitions treat that as an error.
    pub fn total_capacity(&self) -> Option<u64> {
        self.balances[0].checked_add(self.balances[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::test_utils::*;

    #[test]
    fn test_new() {
        let participants = test_participants();
        let state = Open::new(participants, [1000, 1000]);

        assert_eq!(state.participants, participants);
        assert_eq!(state.balances, [1000, 1000]);
        assert_eq!(state.nonce, 0);
        assert_eq!(state.commitment, ChannelCommitment::default());
        assert_eq!(state.memo, Vec::<u8>::new());
        assert_eq!(state.dispute_window_blocks, DEFAULT_DISPUTE_WINDOW_BLOCKS);
    }

    #[test]
    fn test_with_dispute_window() {
        let participants = test_participants();
        let state = Open::with_dispute_window(participants, [120, 30], 200);

        assert_eq!(state.balances, [120, 30]);
        assert_eq!(state.dispute_window_blocks, 200);
    }

    #[test]
    fn test_balance_of() {
        let state = Open::new(test_participants(), [70, 30]);

        assert_eq!(state.balance_of(Party::A), 70);
        assert_eq!(state.balance_of(Party::B), 30);
    }

    #[test]
    fn test_total_capacity() {
        let state = Open::new(test_participants(), [70, 30]);
        assert_eq!(state.total_capacity(), Some(100));

        let overflowing = Open::new(test_participants(), [u64::MAX, 1]);
        assert_eq!(overflowing.total_capacity(), None);
    }
}
