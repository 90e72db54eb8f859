//! Error types for the stx-scaling library
//!
//! This module defines all error types used throughout the library,
//! providing detailed error information for debugging and handling.

use thiserror::Error;

use crate::types::{ChannelId, Party};

/// The main error type for the stx-scaling library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Channel-related errors
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Dispute-related errors
    #[error(transparent)]
    Dispute(#[from] DisputeError),

    /// Settlement-related errors
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Registry-related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors that can occur during channel operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChannelError {
    /// Cannot transfer zero amount
    #[error("Transfer amount cannot be zero")]
    InvalidZeroTransfer,

    /// Insufficient balance for transfer
    #[error("Insufficient balance: sender holds {balance} but transfer requires {amount}")]
    InsufficientBalance {
        /// The sender's current balance
        balance: u64,
        /// The requested transfer amount
        amount: u64,
    },

    /// Balance overflow during transfer
    #[error("Balance overflow: would exceed maximum value")]
    BalanceOverflow,

    /// Nonce overflow: cannot increment further
    #[error("Nonce overflow: cannot increment further")]
    NonceOverflow,

    /// Update does not continue from the current channel state
    #[error("Stale update: provided nonce {provided_nonce}, expected {expected_nonce}")]
    StaleUpdate {
        /// Nonce carried by the update
        provided_nonce: u64,
        /// Nonce the channel expects next
        expected_nonce: u64,
    },

    /// Update was built for a different channel
    #[error("Channel id mismatch")]
    ChannelIdMismatch,

    /// Update does not conserve the channel capacity
    #[error("Balance conservation violated: previous total {previous_total}, new total {new_total}")]
    BalanceConservation {
        /// Sum of balances before the update
        previous_total: u64,
        /// Sum of balances carried by the update
        new_total: u64,
    },

    /// Declared transfer amount does not match the balance delta
    #[error("Amount mismatch: declared {declared}, balances moved by {actual}")]
    AmountMismatch {
        /// Amount declared by the transaction
        declared: u64,
        /// Amount implied by the balance delta
        actual: u64,
    },

    /// Recovered signer does not match any channel participant
    #[error("Unknown signer: recovered key matches neither participant")]
    UnknownSigner,

    /// Recovered signer is not the declared sender
    #[error("Signer mismatch: update is not signed by party {expected_party}")]
    SignerMismatch {
        /// The party that should have signed the update
        expected_party: Party,
    },

    /// Cooperative close proposal balances differ from the channel state
    #[error("Close balances mismatch: proposal [{proposed_a}, {proposed_b}], state [{state_a}, {state_b}]")]
    CloseBalancesMismatch {
        /// Party A balance in the proposal
        proposed_a: u64,
        /// Party B balance in the proposal
        proposed_b: u64,
        /// Party A balance in the channel state
        state_a: u64,
        /// Party B balance in the channel state
        state_b: u64,
    },

    /// Channel memo exceeds maximum size
    #[error("Channel memo too large: {size} bytes (maximum: {max_size} bytes)")]
    MemoTooLarge {
        /// The size of the provided memo in bytes
        size: usize,
        /// The maximum allowed memo size in bytes
        max_size: usize,
    },

    /// Signature creation or recovery failed
    #[error("Signature error: {0}")]
    Signature(#[from] secp256k1::Error),
}

/// Errors that can occur during dispute operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DisputeError {
    /// Dispute window has not elapsed yet (cannot finalize)
    #[error("Dispute window not elapsed: current height {current_height}, expiry height {expiry_height}")]
    WindowNotElapsed {
        /// Current burn block height
        current_height: u64,
        /// Burn block height at which the window elapses
        expiry_height: u64,
    },

    /// Dispute window has already elapsed (cannot supersede the claim)
    #[error("Dispute window elapsed: current height {current_height}, expiry height {expiry_height}")]
    WindowElapsed {
        /// Current burn block height
        current_height: u64,
        /// Burn block height at which the window elapsed
        expiry_height: u64,
    },

    /// Claim does not supersede the standing claim
    #[error("Stale claim: provided nonce {provided_nonce} <= standing nonce {standing_nonce}")]
    StaleClaim {
        /// Nonce carried by the submitted claim
        provided_nonce: u64,
        /// Nonce of the standing claim
        standing_nonce: u64,
    },

    /// Claimed balances do not sum to the channel capacity
    #[error("Claimed balances do not match capacity: claimed total {claimed_total}, capacity {total_capacity}")]
    ClaimCapacityMismatch {
        /// Sum of the claimed balances
        claimed_total: u64,
        /// The channel's total capacity
        total_capacity: u64,
    },

    /// Claim was signed by the posting party instead of the counterparty
    #[error("Self-signed claim: posted by party {posted_by}, signed by party {signed_by}")]
    SelfSignedClaim {
        /// The party posting the claim
        posted_by: Party,
        /// The party whose key produced the claim signature
        signed_by: Party,
    },

    /// Expiry height computation overflowed
    #[error("Dispute expiry overflow: cannot compute expiry height")]
    ExpiryOverflow,
}

/// Errors that can occur during settlement encoding and broadcast
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettlementError {
    /// Clarity name failed validation
    #[error("Invalid Clarity name: {0}")]
    InvalidClarityName(String),

    /// Clarity buffer exceeds the maximum encodable length
    #[error("Clarity buffer too large: {size} bytes (maximum: {max_size} bytes)")]
    BufferTooLarge {
        /// The size of the provided buffer in bytes
        size: usize,
        /// The maximum encodable buffer size in bytes
        max_size: usize,
    },

    /// Settlement payload has the wrong length
    #[error("Settlement payload length {size} bytes, expected {expected} bytes")]
    PayloadLength {
        /// The size of the provided payload in bytes
        size: usize,
        /// The expected payload size in bytes
        expected: usize,
    },

    /// Clarity tuple has two entries under the same key
    #[error("Duplicate Clarity tuple key: {0}")]
    DuplicateTupleKey(String),

    /// Settlement payload magic bytes do not match
    #[error("Settlement payload magic bytes do not match")]
    BadMagic,

    /// Settlement payload version is not supported
    #[error("Unsupported settlement payload version: {0}")]
    UnsupportedVersion(u8),

    /// Node rejected or failed to accept a broadcast
    #[error("Broadcast failed: {0}")]
    Broadcast(String),
}

/// Errors that can occur during registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// Channel not found in registry
    #[error("Channel not found in registry: {0:?}")]
    ChannelNotFound(ChannelId),

    /// Registry has too many channels
    #[error("Registry has {channel_count} channels, but maximum supported is {max_channels}")]
    TooManyChannels {
        /// The number of channels in the registry
        channel_count: usize,
        /// The maximum number of channels supported
        max_channels: usize,
    },

    /// Registry nonce overflow
    #[error("Registry nonce overflow: cannot increment further")]
    RegistryNonceOverflow,
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
