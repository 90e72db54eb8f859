//! Channel state transitions
//!
//! This module implements transitions for two-party payment channels.
//! Transition functions are pure, side-effect-free operations that
//! transform channel states according to well-defined rules and invariants.
//!
//! Each transition is a self-contained unit that specifies:
//! - Valid source and target states in the channel lifecycle
//! - Preconditions that must hold before the transition can be applied
//! - Postconditions that are guaranteed after a successful transition
//! - Input requirements and validation rules
//! - Nonce progression rules (strict +1 increment for off-chain updates)

pub mod cooperative_close;
pub mod dispute;
pub mod transfer;

pub use cooperative_close::{
    apply_cooperative_close, apply_settlement_confirmation, propose_close, CloseProposal,
};
pub use dispute::{apply_dispute, apply_dispute_timeout, apply_dispute_update, DisputeClaim};
pub use transfer::{apply_transfer, create_transfer, TransferAmount};
