//! Channel module for two-party payment channels
//!
//! This module provides a deterministic state machine for two-party payment
//! channels. Each channel maintains balances for two parties and supports
//! pure state transitions. Transfers flow in either direction and every
//! state update is authorized by the sender's recoverable signature.
//!
//! # Structure
//!
//! The module is organized into functional domains:
//! - `state/`: Lifecycle states (Open, Disputed, Settling, Closed)
//! - `transition/`: State transitions (transfer, cooperative_close, dispute)
//! - `commitment`: Commitment computation
//! - `update`: Signed off-chain state updates
//! - `snapshot`: Lifecycle-tagged read-only views

pub mod commitment;
pub mod snapshot;
pub mod state;
pub mod transition;
pub mod update;

/// Participant identity (Stacks address derived from a secp256k1 key)
pub mod participant;

#[cfg(test)]
pub mod test_utils;

pub use commitment::{
    compute_channel_commitment, compute_closed_commitment, compute_disputed_commitment,
    compute_open_commitment, compute_settling_commitment,
};
pub use participant::{Participant, StacksAddress};
pub use snapshot::ChannelSnapshot;
pub use state::{ChannelLifecycle, CloseReason, Closed, Disputed, DisputedParams, Open, Settling};
pub use transition::transfer::TransferAmount;
pub use transition::{
    apply_cooperative_close, apply_dispute, apply_dispute_timeout, apply_dispute_update,
    apply_settlement_confirmation, apply_transfer, create_transfer, propose_close, CloseProposal,
    DisputeClaim,
};
pub use update::{
    recover_signer, sign_digest, sign_update, verify_signer, ChannelTransaction, StateUpdate,
    UpdateSignature, SIGNATURE_LEN,
};
