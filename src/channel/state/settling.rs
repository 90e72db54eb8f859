//! Settling state
//!
//! This state represents a channel that has been cooperatively closed
//! off-chain and is waiting for the settlement transaction to confirm on
//! the Stacks chain. The final balances are fixed; only confirmation of
//! the settlement transaction remains.
//!
//! # Invariants
//!
//! - Final balances sum to the channel's total capacity
//! - Both participants have signed the close proposal
//! - Channel cannot process new transfers

use serde::{Deserialize, Serialize};

use crate::channel::participant::Participant;
use crate::types::ChannelCommitment;

/// Cooperatively closed channel state awaiting settlement confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settling {
    /// The two channel participants, in fixed order
    pub participants: [Participant; 2],
    /// Total channel capacity
    pub total_capacity: u64,
    /// Final balances, indexed by party
    pub final_balances: [u64; 2],
    /// Final nonce value
    pub nonce: u64,
    /// Commitment over the settling state
    pub commitment: ChannelCommitment,
}

impl Settling {
    /// Creates a new Settling state
    ///
    /// # Arguments
    /// * `participants` - The two channel participants
    /// * `total_capacity` - Total channel capacity
    /// * `final_balances` - Final balances, indexed by party
    /// * `nonce` - Final nonce value
    pub fn new(
        participants: [Participant; 2],
        total_capacity: u64,
        final_balances: [u64; 2],
        nonce: u64,
    ) -> Self {
        Self {
            participants,
            total_capacity,
            final_balances,
            nonce,
            commitment: ChannelCommitment::default(),
        }
    }

    /// Validates that the final balances sum to the total capacity
    pub fn validate_balances(&self) -> bool {
        self.final_balances[0]
            .checked_add(self.final_balances[1])
            .map(|total| total == self.total_capacity)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::test_utils::test_participants;

    #[test]
    fn test_new() {
        let participants = test_participants();
        let state = Settling::new(participants, 100, [60, 40], 5);

        assert_eq!(state.participants, participants);
        assert_eq!(state.total_capacity, 100);
        assert_eq!(state.final_balances, [60, 40]);
        assert_eq!(state.nonce, 5);
        assert_eq!(state.commitment, ChannelCommitment::default());
    }

    #[test]
    fn test_validate_balances() {
        let participants = test_participants();

        assert!(Settling::new(participants, 100, [60, 40], 1).validate_balances());
        assert!(!Settling::new(participants, 90, [60, 40], 1).validate_balances());
        assert!(!Settling::new(participants, 0, [u64::MAX, 1], 1).validate_balances());
    }
}
