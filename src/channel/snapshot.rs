//! Lifecycle-tagged channel snapshots
//!
//! A snapshot is a read-only view of a channel at a point in its lifecycle.
//! It carries the lifecycle tag, the balances, the nonce and the commitment,
//! and is what channel queries and the registry layer operate on.

use serde::{Deserialize, Serialize};

use crate::channel::commitment::{
    compute_closed_commitment, compute_disputed_commitment, compute_open_commitment,
    compute_settling_commitment,
};
use crate::channel::state::{ChannelLifecycle, Closed, Disputed, Open, Settling};
use crate::types::{ChannelCommitment, ChannelId};

/// A read-only view of a channel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    /// Position in the channel lifecycle
    pub lifecycle: ChannelLifecycle,
    /// Balances, indexed by party
    pub balances: [u64; 2],
    /// Nonce of the snapshotted state
    pub nonce: u64,
    /// Commitment over the snapshotted state
    pub commitment: ChannelCommitment,
}

impl ChannelSnapshot {
    /// Snapshots an Open state
    pub fn of_open(channel_id: ChannelId, state: &Open) -> Self {
        Self {
            lifecycle: ChannelLifecycle::Open,
            balances: state.balances,
            nonce: state.nonce,
            commitment: compute_open_commitment(channel_id, state),
        }
    }

    /// Snapshots a Disputed state at its standing claim
    pub fn of_disputed(channel_id: ChannelId, state: &Disputed) -> Self {
        Self {
            lifecycle: ChannelLifecycle::Disputed,
            balances: state.claimed_balances,
            nonce: state.claimed_nonce,
            commitment: compute_disputed_commitment(channel_id, state),
        }
    }

    /// Snapshots a Settling state
    pub fn of_settling(channel_id: ChannelId, state: &Settling) -> Self {
        Self {
            lifecycle: ChannelLifecycle::Settling,
            balances: state.final_balances,
            nonce: state.nonce,
            commitment: compute_settling_commitment(channel_id, state),
        }
    }

    /// Snapshots a Closed state
    pub fn of_closed(channel_id: ChannelId, state: &Closed) -> Self {
        Self {
            lifecycle: ChannelLifecycle::Closed,
            balances: state.final_balances,
            nonce: state.nonce,
            commitment: compute_closed_commitment(channel_id, state),
        }
    }
}
