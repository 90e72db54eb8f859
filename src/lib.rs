#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # stx-scaling
//!
//! A Rust library for two-party payment channels settled on the Stacks
//! chain: off-chain signed updates, dispute adjudication over burn-block
//! windows, and contract-call settlement.

// Channel state management and transitions
pub mod channel;

// Error types
pub mod errors;

// Channel registry and registry-level hash accumulator
pub mod registry;

// On-chain settlement: Clarity encoding, transaction builders, node seam
pub mod settlement;

// Core type definitions
pub mod types;

// Cryptographic hash functions and identifier derivation
pub mod utils;

// Re-export commonly used types and functions
pub use channel::{
    apply_cooperative_close, apply_dispute, apply_dispute_timeout, apply_dispute_update,
    apply_settlement_confirmation, apply_transfer, compute_channel_commitment, create_transfer,
    propose_close, ChannelSnapshot, ChannelTransaction, Closed, Disputed, Open, Participant,
    Settling, StateUpdate, TransferAmount,
};
pub use errors::{Error, Result};
pub use registry::{insert_channel, ChannelRegistry};
pub use settlement::{MockStacksNode, NodeClient, SettlementClient, StacksEndpoint};
pub use types::{Bytes32, ChannelCommitment, ChannelId, Party, TxId};
pub use utils::{channel_id_from_label, random_channel_id};
