//! One harvest cycle: fetch, filter, batch, execute, adjust, transfer.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::HarvestResult;
use crate::executor::{ExecutorGas, HarvestExecutor};
use crate::fetcher::PositionFetcher;
use crate::filter::eligible_pairs;
use crate::scheduler::Cycle;
use crate::source::{HarvestChain, PositionSource};
use crate::types::CycleReport;

/// Harvest pipeline bound to one account and one signer
pub struct HarvestPipeline<S, C> {
    config: RunConfig,
    fetcher: PositionFetcher<S>,
    executor: HarvestExecutor<C>,
}

impl<S: PositionSource, C: HarvestChain> HarvestPipeline<S, C> {
    /// Creates a new `HarvestPipeline`
    ///
    /// # Arguments
    /// * `config` - Validated run configuration
    /// * `source` - Position index
    /// * `chain` - Signing transport
    pub fn new(config: RunConfig, source: S, chain: C) -> Self {
        let fetcher = PositionFetcher::new(source, config.page_size, config.max_pages);
        let gas = ExecutorGas {
            harvest: config.harvest_gas,
            adjust: config.adjust_gas,
            transfer: config.transfer_gas,
        };
        let executor = HarvestExecutor::new(chain, config.batch_size, gas, config.confirmations);
        Self {
            config,
            fetcher,
            executor,
        }
    }

    /// Runs the pipeline once.
    ///
    /// # Returns
    /// The cycle report. Only a failed fetch (or a zero batch size) aborts the
    /// cycle with an error; failed transactions are recorded in the report.
    pub async fn run_once(&self) -> HarvestResult<CycleReport> {
        let positions = self.fetcher.fetch_positions(self.config.account).await?;
        let pairs = eligible_pairs(&positions, self.config.fee_cutoff_usd);
        info!(
            positions = positions.len(),
            eligible = pairs.len(),
            cutoff_usd = self.config.fee_cutoff_usd,
            "selected pairs to harvest"
        );

        let batches = self
            .executor
            .harvest(self.config.harvester_contract, &pairs)
            .await?;

        if let Err(e) = self.executor.log_balance().await {
            warn!(error = %e, "could not read balance");
        }

        let adjustment = match self.config.adjust_contract {
            Some(contract) => Some(self.executor.adjust(contract).await),
            None => None,
        };
        let transfers = self.executor.transfer_balances(&self.config.proxies).await;

        Ok(CycleReport {
            positions_fetched: positions.len(),
            eligible_pairs: pairs.len(),
            batches,
            adjustment,
            transfers,
        })
    }
}

#[async_trait]
impl<S: PositionSource, C: HarvestChain> Cycle for HarvestPipeline<S, C> {
    async fn run_cycle(&self) -> HarvestResult<()> {
        let report = self.run_once().await?;
        info!(
            positions = report.positions_fetched,
            eligible = report.eligible_pairs,
            confirmed_batches = report.confirmed_batches(),
            failed_batches = report.failed_batches(),
            adjusted = report.adjustment.as_ref().map(|o| o.is_confirmed()),
            transfers = report.transfers.len(),
            "harvest cycle finished"
        );
        Ok(())
    }
}
