//! Disputed state
//!
//! This state represents a channel under dispute. A participant has posted
//! a signed state claim and the dispute window is running. Until the window
//! elapses, either party may supersede the standing claim with a
//! higher-nonce signed state.
//!
//! # Invariants
//!
//! - Claimed balances sum to the channel's total capacity
//! - The standing claim's nonce only ever increases
//! - Channel cannot process new transfers
//! - Finalization is possible only once the window has elapsed

use serde::{Deserialize, Serialize};

use crate::channel::participant::Participant;
use crate::types::{ChannelCommitment, Party};

/// Channel state while a dispute window is running, holding the standing
/// claim and the burn block height at which the window elapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disputed {
    /// The two channel participants, in fixed order
    pub participants: [Participant; 2],
    /// Total channel capacity
    pub total_capacity: u64,
    /// Balances of the standing claim, indexed by party
    pub claimed_balances: [u64; 2],
    /// Nonce of the standing claim
    pub claimed_nonce: u64,
    /// Party that opened the dispute
    pub initiated_by: Party,
    /// Burn block height at which the dispute window elapses
    pub expiry_height: u64,
    /// Dispute window duration in burn blocks
    pub dispute_window_blocks: u32,
    /// Commitment over the disputed state
    pub commitment: ChannelCommitment,
}

/// Parameters required to construct a `Disputed` state.
///
/// Using a struct instead of a long positional argument list makes it much
/// harder to mix up balances, nonces and heights, which are all integers.
#[derive(Debug, Clone, Copy)]
pub struct DisputedParams {
    /// The two channel participants, in fixed order
    pub participants: [Participant; 2],
    /// Total channel capacity
    pub total_capacity: u64,
    /// Balances of the standing claim, indexed by party
    pub claimed_balances: [u64; 2],
    /// Nonce of the standing claim
    pub claimed_nonce: u64,
    /// Party that opened the dispute
    pub initiated_by: Party,
    /// Burn block height at which the dispute window elapses
    pub expiry_height: u64,
    /// Dispute window duration in burn blocks
    pub dispute_window_blocks: u32,
}

impl Disputed {
    /// Creates a new Disputed state
    ///
    /// # Arguments
    /// * `params` - All fields required to describe the disputed state
    pub fn new(params: DisputedParams) -> Self {
        Self {
            participants: params.participants,
            total_capacity: params.total_capacity,
            claimed_balances: params.claimed_balances,
            claimed_nonce: params.claimed_nonce,
            initiated_by: params.initiated_by,
            expiry_height: params.expiry_height,
            dispute_window_blocks: params.dispute_window_blocks,
            commitment: ChannelCommitment::default(),
        }
    }

    /// Validates that the claimed balances sum to the total capacity
    pub fn validate_balances(&self) -> bool {
        self.claimed_balances[0]
            .checked_add(self.claimed_balances[1])
            .map(|total| total == self.total_capacity)
            .unwrap_or(false)
    }
}
