//! Seams to the two external collaborators of the pipeline: the position
//! index and the signing chain transport.

use alloy::primitives::{Address, TxHash, U256};
use anyhow::Result;
use async_trait::async_trait;
use clients_harvester::{GasSettings, HarvesterClient};
use clients_subgraph::{LiquidityPosition, SubgraphClient};

use crate::types::ContractCall;

/// Paged access to an account's liquidity positions.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Returns up to `first` positions of `account` after skipping `skip`,
    /// ordered by descending liquidity token balance.
    async fn positions_page(
        &self,
        account: Address,
        first: u32,
        skip: u32,
    ) -> Result<Vec<LiquidityPosition>>;
}

/// Signing access to the chain.
#[async_trait]
pub trait HarvestChain: Send + Sync {
    /// Signs and broadcasts `call`, returning its transaction hash.
    async fn submit(&self, call: &ContractCall, gas: GasSettings) -> Result<TxHash>;

    /// Resolves once `tx_hash` is `confirmations` blocks deep; fails if the
    /// transaction reverted or the wait timed out.
    async fn wait_for_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> Result<()>;

    /// Native balance of the signing account in wei.
    async fn balance(&self) -> Result<U256>;
}

#[async_trait]
impl PositionSource for SubgraphClient {
    async fn positions_page(
        &self,
        account: Address,
        first: u32,
        skip: u32,
    ) -> Result<Vec<LiquidityPosition>> {
        self.liquidity_positions(account, first, skip).await
    }
}

#[async_trait]
impl HarvestChain for HarvesterClient {
    async fn submit(&self, call: &ContractCall, gas: GasSettings) -> Result<TxHash> {
        match call {
            ContractCall::Harvest { contract, pairs } => {
                self.harvest(*contract, pairs.clone(), gas).await
            }
            ContractCall::Adjust { contract } => self.adjust(*contract, gas).await,
            ContractCall::TransferBalance { proxy } => self.transfer_balance(*proxy, gas).await,
        }
    }

    async fn wait_for_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> Result<()> {
        HarvesterClient::wait_for_confirmations(self, tx_hash, confirmations).await
    }

    async fn balance(&self) -> Result<U256> {
        HarvesterClient::balance(self).await
    }
}
