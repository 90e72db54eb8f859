//! Node client seam
//!
//! Settlement needs two things from a Stacks node: accepting transaction
//! broadcasts and reporting the current burn block height. The `NodeClient`
//! trait is that seam, so dispute timing and settlement can be driven by an
//! in-memory mock in tests and by an RPC client in production.

use crate::errors::SettlementError;
use crate::settlement::tx::StacksTransaction;
use crate::types::TxId;

/// Trait for node-side settlement operations
///
/// Implementations handle the actual transaction broadcast and chain
/// queries. Implementations can wrap an RPC client against a node's
/// `/v2/transactions` endpoint without touching channel logic.
pub trait NodeClient {
    /// Broadcast a settlement transaction
    ///
    /// # Returns
    /// * `Ok(TxId)` - The node accepted the transaction
    /// * `Err(SettlementError::Broadcast)` - The node rejected it or was unreachable
    fn broadcast(&mut self, tx: &StacksTransaction) -> Result<TxId, SettlementError>;

    /// Current burn block height as the node sees it
    fn burn_block_height(&self) -> u64;
}

/// A transaction accepted by the mock node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedTransaction {
    /// Transaction id the node reported
    pub txid: TxId,
    /// Request body the broadcast carried
    pub body: String,
    /// Burn block height at acceptance
    pub accepted_at_height: u64,
}

/// An in-memory Stacks node for tests and local development
///
/// Accepts every well-formed broadcast, records it, and lets callers
/// advance the burn block height to drive dispute windows.
#[derive(Debug, Default)]
pub struct MockStacksNode {
    accepted: Vec<AcceptedTransaction>,
    burn_height: u64,
}

impl MockStacksNode {
    /// Creates a mock node at burn height zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock node at the given burn height
    pub fn at_height(burn_height: u64) -> Self {
        Self { accepted: Vec::new(), burn_height }
    }

    /// Advances the burn block height by `blocks`
    pub fn advance_blocks(&mut self, blocks: u64) {
        self.burn_height = self.burn_height.saturating_add(blocks);
    }

    /// Transactions accepted so far, in broadcast order
    pub fn accepted(&self) -> &[AcceptedTransaction] {
        &self.accepted
    }
}

impl NodeClient for MockStacksNode {
    fn broadcast(&mut self, tx: &StacksTransaction) -> Result<TxId, SettlementError> {
        let txid = tx.txid()?;
        let body = tx.to_request_body()?;
        self.accepted.push(AcceptedTransaction {
            txid,
            body,
            accepted_at_height: self.burn_height,
        });
        Ok(txid)
    }

    fn burn_block_height(&self) -> u64 {
        self.burn_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::participant::StacksAddress;
    use crate::channel::test_utils::test_keys;
    use crate::settlement::tx::{
        build_close_transaction, CloseTxParams, ContractId, SettlementTxParams,
    };
    use crate::types::{CHAIN_ID_TESTNET, TRANSACTION_VERSION_TESTNET};

    fn sample_transaction() -> StacksTransaction {
        let (pk_a, pk_b) = test_keys();
        let contract =
            ContractId::new(StacksAddress::testnet_from_pubkey(&pk_a), "payment-channels")
                .expect("valid contract name");
        let params = SettlementTxParams {
            sender: StacksAddress::testnet_from_pubkey(&pk_b),
            fee_microstx: 180,
            tx_nonce: 0,
        };
        let close = CloseTxParams {
            channel_id: [5u8; 32],
            participants: [
                StacksAddress::testnet_from_pubkey(&pk_a),
                StacksAddress::testnet_from_pubkey(&pk_b),
            ],
            final_balances: [900, 1100],
            nonce: 4,
            cooperative: true,
        };
        build_close_transaction(
            TRANSACTION_VERSION_TESTNET,
            CHAIN_ID_TESTNET,
            &contract,
            &params,
            &close,
        )
        .expect("valid")
    }

    #[test]
    fn test_broadcast_records_transaction() {
        let mut node = MockStacksNode::at_height(100);
        let tx = sample_transaction();

        let txid = node.broadcast(&tx).expect("accepted");

        assert_eq!(node.accepted().len(), 1);
        assert_eq!(node.accepted()[0].txid, txid);
        assert_eq!(node.accepted()[0].accepted_at_height, 100);
        assert_eq!(txid, tx.txid().expect("txid"));
    }

    #[test]
    fn test_advance_blocks() {
        let mut node = MockStacksNode::new();
        assert_eq!(node.burn_block_height(), 0);

        node.advance_blocks(144);
        assert_eq!(node.burn_block_height(), 144);

        node.advance_blocks(u64::MAX);
        assert_eq!(node.burn_block_height(), u64::MAX);
    }
}
