//! Settlement module for on-chain channel resolution
//!
//! This module provides the Stacks-facing half of the library: Clarity
//! value encoding, contract-call transaction builders, the fixed-layout
//! settlement payload, and the node client seam with an in-memory mock.
//!
//! # Structure
//!
//! - `clarity`: SIP-005 consensus serialization for contract arguments
//! - `payload`: Fixed-layout settlement payload (magic, version, id, nonce)
//! - `tx`: Transaction builders for closes and disputes
//! - `node`: `NodeClient` trait and `MockStacksNode`
//! - `client`: `SettlementClient` binding an endpoint to a node

pub mod clarity;
pub mod client;
pub mod node;
pub mod payload;
pub mod tx;

pub use clarity::{ClarityName, ClarityValue, CLARITY_MAX_BUFFER_LEN, CLARITY_MAX_NAME_LEN};
pub use client::{SettlementClient, StacksEndpoint};
pub use node::{AcceptedTransaction, MockStacksNode, NodeClient};
pub use payload::{decode_settlement_payload, encode_settlement_payload};
pub use tx::{
    build_close_transaction, build_dispute_transaction, CloseTxParams, ContractCall, ContractId,
    SettlementTxParams, StacksTransaction, CLOSE_FUNCTION, DISPUTE_FUNCTION,
};
