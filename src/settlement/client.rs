//! Settlement client
//!
//! Binds a settlement contract endpoint to a node client and drives the
//! on-chain side of closes and disputes: building the contract call,
//! broadcasting it, and reporting burn block heights for window timing.

use tracing::{debug, info};

use crate::channel::state::Disputed;
use crate::errors::SettlementError;
use crate::settlement::node::NodeClient;
use crate::settlement::tx::{
    build_close_transaction, build_dispute_transaction, CloseTxParams, ContractId,
    SettlementTxParams,
};
use crate::types::{
    ChannelId, TxId, CHAIN_ID_MAINNET, CHAIN_ID_TESTNET, TRANSACTION_VERSION_MAINNET,
    TRANSACTION_VERSION_TESTNET,
};

/// A settlement target: node URL, contract, and network parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StacksEndpoint {
    /// Base URL of the Stacks node API
    pub node_url: String,
    /// The settlement contract
    pub contract: ContractId,
    /// Chain identifier transactions are bound to
    pub chain_id: u32,
    /// Transaction version byte
    pub tx_version: u8,
}

impl StacksEndpoint {
    /// Builds a mainnet endpoint
    pub fn mainnet(node_url: &str, contract: ContractId) -> Self {
        Self {
            node_url: node_url.to_string(),
            contract,
            chain_id: CHAIN_ID_MAINNET,
            tx_version: TRANSACTION_VERSION_MAINNET,
        }
    }

    /// Builds a testnet endpoint
    pub fn testnet(node_url: &str, contract: ContractId) -> Self {
        Self {
            node_url: node_url.to_string(),
            contract,
            chain_id: CHAIN_ID_TESTNET,
            tx_version: TRANSACTION_VERSION_TESTNET,
        }
    }
}

/// Settlement client driving closes and disputes through a node
#[derive(Debug)]
pub struct SettlementClient<N: NodeClient> {
    endpoint: StacksEndpoint,
    node: N,
}

impl<N: NodeClient> SettlementClient<N> {
    /// Creates a client for the given endpoint and node
    pub fn new(endpoint: StacksEndpoint, node: N) -> Self {
        Self { endpoint, node }
    }

    /// The endpoint this client settles against
    pub fn endpoint(&self) -> &StacksEndpoint {
        &self.endpoint
    }

    /// Read access to the underlying node client
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Mutable access to the underlying node client
    pub fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }

    /// Current burn block height as the node sees it
    pub fn burn_block_height(&self) -> u64 {
        self.node.burn_block_height()
    }

    /// Builds and broadcasts the transaction settling a channel close
    pub fn settle_close(
        &mut self,
        params: &SettlementTxParams,
        close: &CloseTxParams,
    ) -> Result<TxId, SettlementError> {
        debug!(
            channel_id = %hex::encode(close.channel_id),
            nonce = close.nonce,
            cooperative = close.cooperative,
            contract = %self.endpoint.contract,
            "building close transaction"
        );
        let tx = build_close_transaction(
            self.endpoint.tx_version,
            self.endpoint.chain_id,
            &self.endpoint.contract,
            params,
            close,
        )?;
        let txid = self.node.broadcast(&tx)?;
        info!(
            channel_id = %hex::encode(close.channel_id),
            txid = %hex::encode(txid),
            node_url = %self.endpoint.node_url,
            "broadcast close transaction"
        );
        Ok(txid)
    }

    /// Builds and broadcasts the transaction posting a dispute claim
    pub fn settle_dispute(
        &mut self,
        params: &SettlementTxParams,
        channel_id: ChannelId,
        state: &Disputed,
    ) -> Result<TxId, SettlementError> {
        debug!(
            channel_id = %hex::encode(channel_id),
            claimed_nonce = state.claimed_nonce,
            expiry_height = state.expiry_height,
            contract = %self.endpoint.contract,
            "building dispute transaction"
        );
        let tx = build_dispute_transaction(
            self.endpoint.tx_version,
            self.endpoint.chain_id,
            &self.endpoint.contract,
            params,
            channel_id,
            state,
        )?;
        let txid = self.node.broadcast(&tx)?;
        info!(
            channel_id = %hex::encode(channel_id),
            txid = %hex::encode(txid),
            node_url = %self.endpoint.node_url,
            "broadcast dispute transaction"
        );
        Ok(txid)
    }
}
