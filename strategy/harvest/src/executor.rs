//! Sequential submission of harvest, adjustment and transfer transactions.
//!
//! Every transaction is broadcast, then awaited to the configured
//! confirmation depth before the next one is sent, so the signing account
//! never has two transactions in flight. A failed transaction is logged and
//! recorded; it never stops the transactions after it.

use alloy::primitives::{Address, TxHash};
use clients_harvester::GasSettings;
use tracing::{error, info};
use utils::{chunk, u256_to_f64};

use crate::error::{HarvestError, HarvestResult};
use crate::source::HarvestChain;
use crate::types::{BatchOutcome, ContractCall, TransactionOutcome};

const ETHER_DECIMALS: u32 = 18;

/// Gas settings per kind of call
#[derive(Debug, Clone, Copy)]
pub struct ExecutorGas {
    pub harvest: GasSettings,
    pub adjust: GasSettings,
    pub transfer: GasSettings,
}

/// Turns eligible pair ids into confirmed on-chain calls
pub struct HarvestExecutor<C> {
    chain: C,
    batch_size: usize,
    gas: ExecutorGas,
    confirmations: u64,
}

impl<C: HarvestChain> HarvestExecutor<C> {
    /// Creates a new `HarvestExecutor`
    ///
    /// # Arguments
    /// * `chain` - Signing transport
    /// * `batch_size` - Pair ids per harvest transaction
    /// * `gas` - Fixed gas settings per kind of call
    /// * `confirmations` - Depth each transaction must reach before the next is sent
    pub fn new(chain: C, batch_size: usize, gas: ExecutorGas, confirmations: u64) -> Self {
        Self {
            chain,
            batch_size,
            gas,
            confirmations,
        }
    }

    #[cfg(test)]
    pub(crate) fn chain(&self) -> &C {
        &self.chain
    }

    /// Harvests `pairs` on `contract`, one transaction per batch.
    ///
    /// # Returns
    /// One outcome per batch in submission order. Only a zero batch size is
    /// an error; failed batches are reported in the outcomes.
    pub async fn harvest(
        &self,
        contract: Address,
        pairs: &[Address],
    ) -> HarvestResult<Vec<BatchOutcome>> {
        let batches = chunk(pairs, self.batch_size).ok_or_else(|| {
            HarvestError::Configuration("batch size must be positive".into())
        })?;

        info!(pairs = pairs.len(), batches = batches.len(), "harvesting pairs");
        let mut outcomes = Vec::with_capacity(batches.len());
        for batch in batches {
            let call = ContractCall::Harvest {
                contract,
                pairs: batch.clone(),
            };
            let outcome = match self.send_and_confirm(&call, self.gas.harvest).await {
                Ok(tx_hash) => TransactionOutcome::Confirmed { tx_hash },
                Err(e) => {
                    error!(pairs = ?batch, error = %e, "harvest transaction failed");
                    TransactionOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            outcomes.push(BatchOutcome {
                pairs: batch,
                outcome,
            });
        }
        info!("done harvesting pairs");

        Ok(outcomes)
    }

    /// Calls `adjust()` on `contract`.
    pub async fn adjust(&self, contract: Address) -> TransactionOutcome {
        let call = ContractCall::Adjust { contract };
        match self.send_and_confirm(&call, self.gas.adjust).await {
            Ok(tx_hash) => TransactionOutcome::Confirmed { tx_hash },
            Err(e) => {
                error!(%contract, error = %e, "adjust transaction failed");
                TransactionOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Calls `transferBalance()` on every proxy in order.
    pub async fn transfer_balances(
        &self,
        proxies: &[Address],
    ) -> Vec<(Address, TransactionOutcome)> {
        let mut outcomes = Vec::with_capacity(proxies.len());
        for &proxy in proxies {
            let call = ContractCall::TransferBalance { proxy };
            let outcome = match self.send_and_confirm(&call, self.gas.transfer).await {
                Ok(tx_hash) => TransactionOutcome::Confirmed { tx_hash },
                Err(e) => {
                    error!(%proxy, error = %e, "balance transfer failed");
                    TransactionOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            outcomes.push((proxy, outcome));
        }
        outcomes
    }

    /// Logs the signer's current balance in ether.
    pub async fn log_balance(&self) -> HarvestResult<()> {
        let balance = self
            .chain
            .balance()
            .await
            .map_err(|e| HarvestError::Transport(format!("balance read failed: {e:#}")))?;
        info!(
            wei = %balance,
            ether = u256_to_f64(balance, ETHER_DECIMALS),
            "current balance"
        );
        Ok(())
    }

    async fn send_and_confirm(
        &self,
        call: &ContractCall,
        gas: GasSettings,
    ) -> HarvestResult<TxHash> {
        let tx_hash = self
            .chain
            .submit(call, gas)
            .await
            .map_err(|e| HarvestError::Submission(format!("{e:#}")))?;

        match call {
            ContractCall::Harvest { pairs, .. } => {
                for pair in pairs {
                    info!(%pair, %tx_hash, "sent transaction to harvest pair");
                }
            }
            ContractCall::Adjust { contract } => {
                info!(%contract, %tx_hash, "sent adjust transaction");
            }
            ContractCall::TransferBalance { proxy } => {
                info!(%proxy, %tx_hash, "sent balance transfer transaction");
            }
        }

        self.chain
            .wait_for_confirmations(tx_hash, self.confirmations)
            .await
            .map_err(|e| HarvestError::Submission(format!("{tx_hash}: {e:#}")))?;
        Ok(tx_hash)
    }
}
