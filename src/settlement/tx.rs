//! Stacks transaction builders for settlement
//!
//! This module provides Stacks contract-call construction functions that
//! translate channel outcomes into broadcastable transactions.
//!
//! Transaction builders are mechanical - they construct contract calls but
//! do not contain business logic or commitment rules. Business logic lives
//! in the `channel::transition` module.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::participant::StacksAddress;
use crate::channel::state::Disputed;
use crate::errors::SettlementError;
use crate::settlement::clarity::{ClarityName, ClarityValue};
use crate::settlement::payload::encode_settlement_payload;
use crate::types::{ChannelId, TxId};
use crate::utils::sha512_256;

/// Contract function invoked for channel closes
pub const CLOSE_FUNCTION: &str = "close-channel";

/// Contract function invoked for dispute claims
pub const DISPUTE_FUNCTION: &str = "submit-dispute";

/// A settlement contract identifier: deployer address plus contract name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractId {
    /// Address of the contract deployer
    pub address: StacksAddress,
    /// Contract name
    pub name: ClarityName,
}

impl ContractId {
    /// Builds a contract id, validating the contract name
    pub fn new(address: StacksAddress, name: &str) -> Result<Self, SettlementError> {
        Ok(Self { address, name: ClarityName::new(name)? })
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

/// A contract-call payload: target contract, function, and arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    /// The contract being called
    pub contract: ContractId,
    /// The function being invoked
    pub function: ClarityName,
    /// Function arguments in declaration order
    pub args: Vec<ClarityValue>,
}

/// A Stacks transaction carrying a settlement contract call
///
/// The transaction id is the SHA-512/256 digest of the serialized
/// transaction, the same digest Stacks nodes report after broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StacksTransaction {
    /// Transaction version byte (mainnet or testnet)
    pub version: u8,
    /// Chain identifier
    pub chain_id: u32,
    /// Address paying the fee and originating the call
    pub sender: StacksAddress,
    /// Fee in microSTX
    pub fee_microstx: u64,
    /// Sender's account nonce
    pub tx_nonce: u64,
    /// The contract call being made
    pub payload: ContractCall,
}

impl StacksTransaction {
    /// Serializes the transaction to its wire form
    ///
    /// Layout: version, chain id, sender principal, fee, account nonce,
    /// contract principal, contract and function names (1-byte length
    /// prefixed), argument count, then each argument in SIP-005 form.
    /// Integers are big-endian.
    pub fn serialize(&self) -> Result<Vec<u8>, SettlementError> {
        let mut out = Vec::new();
        out.push(self.version);
        out.extend_from_slice(&self.chain_id.to_be_bytes());
        out.extend_from_slice(&self.sender.to_bytes());
        out.extend_from_slice(&self.fee_microstx.to_be_bytes());
        out.extend_from_slice(&self.tx_nonce.to_be_bytes());

        out.extend_from_slice(&self.payload.contract.address.to_bytes());
        out.push(self.payload.contract.name.as_str().len() as u8);
        out.extend_from_slice(self.payload.contract.name.as_str().as_bytes());
        out.push(self.payload.function.as_str().len() as u8);
        out.extend_from_slice(self.payload.function.as_str().as_bytes());

        out.extend_from_slice(&(self.payload.args.len() as u32).to_be_bytes());
        for arg in &self.payload.args {
            arg.serialize_into(&mut out)?;
        }
        Ok(out)
    }

    /// Computes the transaction id
    pub fn txid(&self) -> Result<TxId, SettlementError> {
        Ok(sha512_256(&self.serialize()?))
    }

    /// Renders the JSON body a node broadcast endpoint accepts
    pub fn to_request_body(&self) -> Result<String, SettlementError> {
        let raw = hex::encode(self.serialize()?);
        Ok(serde_json::json!({ "tx": raw }).to_string())
    }
}

/// Sender-side parameters shared by all settlement transactions.
///
/// Using a struct instead of positional arguments keeps the fee and the
/// account nonce from being swapped, both being plain integers.
#[derive(Debug, Clone, Copy)]
pub struct SettlementTxParams {
    /// Address paying the fee and originating the call
    pub sender: StacksAddress,
    /// Fee in microSTX
    pub fee_microstx: u64,
    /// Sender's account nonce
    pub tx_nonce: u64,
}

/// Parameters describing the close being settled
#[derive(Debug, Clone, Copy)]
pub struct CloseTxParams {
    /// Channel being closed
    pub channel_id: ChannelId,
    /// Participant addresses, indexed by party
    pub participants: [StacksAddress; 2],
    /// Final balances, indexed by party
    pub final_balances: [u64; 2],
    /// Nonce the channel settles at
    pub nonce: u64,
    /// Whether both parties signed the close
    pub cooperative: bool,
}

/// Builds the contract call settling a channel close
///
/// Arguments passed to the contract, in order: the channel id buffer, the
/// settling nonce, each participant principal with its final balance, the
/// cooperative flag, and the settlement payload buffer.
pub fn build_close_transaction(
    version: u8,
    chain_id: u32,
    contract: &ContractId,
    params: &SettlementTxParams,
    close: &CloseTxParams,
) -> Result<StacksTransaction, SettlementError> {
    let args = vec![
        ClarityValue::Buffer(close.channel_id.to_vec()),
        ClarityValue::UInt(u128::from(close.nonce)),
        ClarityValue::PrincipalStandard(close.participants[0]),
        ClarityValue::UInt(u128::from(close.final_balances[0])),
        ClarityValue::PrincipalStandard(close.participants[1]),
        ClarityValue::UInt(u128::from(close.final_balances[1])),
        ClarityValue::Bool(close.cooperative),
        ClarityValue::Buffer(encode_settlement_payload(close.channel_id, close.nonce)),
    ];

    Ok(StacksTransaction {
        version,
        chain_id,
        sender: params.sender,
        fee_microstx: params.fee_microstx,
        tx_nonce: params.tx_nonce,
        payload: ContractCall {
            contract: contract.clone(),
            function: ClarityName::new(CLOSE_FUNCTION)?,
            args,
        },
    })
}

/// Builds the contract call posting a dispute claim
///
/// The standing claim is passed as a tuple so the contract sees the claimed
/// balances, the claimed nonce, and the window expiry as one value.
pub fn build_dispute_transaction(
    version: u8,
    chain_id: u32,
    contract: &ContractId,
    params: &SettlementTxParams,
    channel_id: ChannelId,
    state: &Disputed,
) -> Result<StacksTransaction, SettlementError> {
    let claim = ClarityValue::Tuple(vec![
        (ClarityName::new("balance-a")?, ClarityValue::UInt(u128::from(state.claimed_balances[0]))),
        (ClarityName::new("balance-b")?, ClarityValue::UInt(u128::from(state.claimed_balances[1]))),
        (ClarityName::new("nonce")?, ClarityValue::UInt(u128::from(state.claimed_nonce))),
        (ClarityName::new("expiry-height")?, ClarityValue::UInt(u128::from(state.expiry_height))),
    ]);

    let args = vec![
        ClarityValue::Buffer(channel_id.to_vec()),
        claim,
        ClarityValue::Buffer(encode_settlement_payload(channel_id, state.claimed_nonce)),
    ];

    Ok(StacksTransaction {
        version,
        chain_id,
        sender: params.sender,
        fee_microstx: params.fee_microstx,
        tx_nonce: params.tx_nonce,
        payload: ContractCall {
            contract: contract.clone(),
            function: ClarityName::new(DISPUTE_FUNCTION)?,
            args,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::state::DisputedParams;
    use crate::channel::test_utils::*;
    use crate::types::{Party, CHAIN_ID_TESTNET, TRANSACTION_VERSION_TESTNET};

    fn test_contract() -> ContractId {
        let (pk_a, _) = test_keys();
        ContractId::new(StacksAddress::testnet_from_pubkey(&pk_a), "payment-channels")
            .expect("valid contract name")
    }

    fn test_params() -> SettlementTxParams {
        let (_, pk_b) = test_keys();
        SettlementTxParams {
            sender: StacksAddress::testnet_from_pubkey(&pk_b),
            fee_microstx: 180,
            tx_nonce: 7,
        }
    }

    fn test_close() -> CloseTxParams {
        let [a, b] = test_participants();
        CloseTxParams {
            channel_id: [5u8; 32],
            participants: [a.address, b.address],
            final_balances: [900, 1100],
            nonce: 4,
            cooperative: true,
        }
    }

    #[test]
    fn test_build_close_transaction() {
        let tx = build_close_transaction(
            TRANSACTION_VERSION_TESTNET,
            CHAIN_ID_TESTNET,
            &test_contract(),
            &test_params(),
            &test_close(),
        )
        .expect("valid");

        assert_eq!(tx.version, TRANSACTION_VERSION_TESTNET);
        assert_eq!(tx.chain_id, CHAIN_ID_TESTNET);
        assert_eq!(tx.payload.function.as_str(), CLOSE_FUNCTION);
        assert_eq!(tx.payload.args.len(), 8);
        assert_eq!(tx.payload.args[1], ClarityValue::UInt(4));
        assert_eq!(tx.payload.args[6], ClarityValue::Bool(true));
    }

    #[test]
    fn test_serialize_and_txid() {
        let tx = build_close_transaction(
            TRANSACTION_VERSION_TESTNET,
            CHAIN_ID_TESTNET,
            &test_contract(),
            &test_params(),
            &test_close(),
        )
        .expect("valid");

        let serialized = tx.serialize().expect("serializable");
        assert_eq!(serialized[0], TRANSACTION_VERSION_TESTNET);
        assert_eq!(&serialized[1..5], &CHAIN_ID_TESTNET.to_be_bytes());

        // The txid is the digest of the serialization
        assert_eq!(tx.txid().expect("txid"), crate::utils::sha512_256(&serialized));

        // Any field change produces a different txid
        let mut bumped = tx.clone();
        bumped.tx_nonce += 1;
        assert_ne!(tx.txid().expect("txid"), bumped.txid().expect("txid"));
    }

    #[test]
    fn test_to_request_body() {
        let tx = build_close_transaction(
            TRANSACTION_VERSION_TESTNET,
            CHAIN_ID_TESTNET,
            &test_contract(),
            &test_params(),
            &test_close(),
        )
        .expect("valid");

        let body = tx.to_request_body().expect("body");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json");

        let raw = parsed["tx"].as_str().expect("tx field");
        assert_eq!(hex::decode(raw).expect("hex"), tx.serialize().expect("serializable"));
    }

    #[test]
    fn test_build_dispute_transaction() {
        let disputed = Disputed::new(DisputedParams {
            participants: test_participants(),
            total_capacity: 2000,
            claimed_balances: [700, 1300],
            claimed_nonce: 3,
            initiated_by: Party::A,
            expiry_height: 1144,
            dispute_window_blocks: 144,
        });

        let tx = build_dispute_transaction(
            TRANSACTION_VERSION_TESTNET,
            CHAIN_ID_TESTNET,
            &test_contract(),
            &test_params(),
            [5u8; 32],
            &disputed,
        )
        .expect("valid");

        assert_eq!(tx.payload.function.as_str(), DISPUTE_FUNCTION);
        assert_eq!(tx.payload.args.len(), 3);
        match &tx.payload.args[1] {
            ClarityValue::Tuple(entries) => {
                assert_eq!(entries.len(), 4);
            }
            other => panic!("expected tuple, got {other:?}"),
        }
    }
}
