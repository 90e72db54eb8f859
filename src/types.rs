//! Core type definitions for the stx-scaling library
//!
//! This module defines fundamental types used across multiple modules,
//! providing a common location for shared type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Fundamental Types
// ============================================================================

/// Type alias for 32-byte arrays used across cryptographic operations
pub type Bytes32 = [u8; 32];

// ============================================================================
// Channel Domain
// ============================================================================

/// Type alias for channel identifiers
pub type ChannelId = Bytes32;

/// Type alias for channel commitments
pub type ChannelCommitment = Bytes32;

/// Domain separation tag for channel commitments
///
/// This tag is used to prefix channel commitment hashes to ensure domain separation
/// and prevent collisions with other hash contexts.
pub const CHANNEL_DOMAIN_TAG: &[u8] = b"STXCH_CH_v1";

/// Domain separation tag for channel identifier derivation
pub const CHANNEL_ID_DOMAIN_TAG: &[u8] = b"STXCH_ID_v1";

/// Domain separation tag for signed state update digests
pub const UPDATE_DOMAIN_TAG: &[u8] = b"STXCH_UPD_v1";

/// Domain separation tag for cooperative close proposal digests
pub const CLOSE_DOMAIN_TAG: &[u8] = b"STXCH_CLS_v1";

/// Maximum size of a channel memo in bytes
///
/// Matches the Stacks token-transfer memo length so a channel memo can be
/// carried through to settlement unchanged.
pub const MAX_MEMO_SIZE: usize = 34;

/// Default dispute window duration in burn blocks (roughly one day)
pub const DEFAULT_DISPUTE_WINDOW_BLOCKS: u32 = 144;

/// A party in a two-party channel
///
/// Party A is the participant listed first at channel creation, party B the
/// second. The ordering is fixed for the lifetime of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    /// First participant
    A,
    /// Second participant
    B,
}

impl Party {
    /// Returns the counterparty
    pub fn opposite(&self) -> Party {
        match self {
            Party::A => Party::B,
            Party::B => Party::A,
        }
    }

    /// Returns the balance-array index for this party
    pub fn index(&self) -> usize {
        match self {
            Party::A => 0,
            Party::B => 1,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::A => write!(f, "A"),
            Party::B => write!(f, "B"),
        }
    }
}

// ============================================================================
// Registry Domain
// ============================================================================

/// Domain separation tag for registry leaf hashes
pub const REGISTRY_LEAF_DOMAIN: &[u8] = b"STXCH_REG_LEAF_v1";

/// Domain separation tag for hash-chain accumulation
pub const CHAIN_DOMAIN: &[u8] = b"STXCH_CHAIN_v1";

/// Maximum number of channels tracked in a single registry
pub const MAX_CHANNELS: usize = 16;

// ============================================================================
// Settlement Domain
// ============================================================================

/// Type alias for Stacks transaction identifiers
pub type TxId = Bytes32;

/// Address version byte for mainnet single-signature addresses
pub const ADDRESS_VERSION_MAINNET: u8 = 22;

/// Address version byte for testnet single-signature addresses
pub const ADDRESS_VERSION_TESTNET: u8 = 26;

/// Transaction version byte for mainnet transactions
pub const TRANSACTION_VERSION_MAINNET: u8 = 0x00;

/// Transaction version byte for testnet transactions
pub const TRANSACTION_VERSION_TESTNET: u8 = 0x80;

/// Chain identifier for the Stacks mainnet
pub const CHAIN_ID_MAINNET: u32 = 0x0000_0001;

/// Chain identifier for the Stacks testnet
pub const CHAIN_ID_TESTNET: u32 = 0x8000_0000;

// ============================================================================
// Settlement Payload Format
// ============================================================================

/// Magic bytes for the settlement payload format: "STXC"
pub const SETTLEMENT_MAGIC_BYTES: &[u8; 4] = b"STXC";

// Length constants
/// Length of magic bytes in the settlement payload
pub const SETTLEMENT_MAGIC_LEN: usize = 4;
/// Current version of the settlement payload format
pub const SETTLEMENT_VERSION: u8 = 1;
/// Length of the version field in the settlement payload
pub const SETTLEMENT_VERSION_LEN: usize = 1;
/// Length of the channel id field in the settlement payload
pub const SETTLEMENT_CHANNEL_ID_LEN: usize = 32;
/// Length of the nonce field in the settlement payload
pub const SETTLEMENT_NONCE_LEN: usize = 8;

/// Total length of the settlement payload (45 bytes)
pub const SETTLEMENT_PAYLOAD_LEN: usize = SETTLEMENT_MAGIC_LEN
    + SETTLEMENT_VERSION_LEN
    + SETTLEMENT_CHANNEL_ID_LEN
    + SETTLEMENT_NONCE_LEN;

// Offset constants
/// Offset of the magic bytes in the settlement payload
pub const SETTLEMENT_OFFSET_MAGIC: usize = 0;
/// Offset of the version field in the settlement payload
pub const SETTLEMENT_OFFSET_VERSION: usize = SETTLEMENT_OFFSET_MAGIC + SETTLEMENT_MAGIC_LEN;
/// Offset of the channel id field in the settlement payload
pub const SETTLEMENT_OFFSET_CHANNEL_ID: usize =
    SETTLEMENT_OFFSET_VERSION + SETTLEMENT_VERSION_LEN;
/// Offset of the nonce field in the settlement payload
pub const SETTLEMENT_OFFSET_NONCE: usize =
    SETTLEMENT_OFFSET_CHANNEL_ID + SETTLEMENT_CHANNEL_ID_LEN;
