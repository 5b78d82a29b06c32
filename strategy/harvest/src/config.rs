//! Configuration types for the harvest pipeline.

use std::time::Duration;

use alloy::primitives::Address;
use clients_harvester::GasSettings;

use crate::error::{HarvestError, HarvestResult};

/// Run configuration, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Account whose liquidity positions are harvested
    pub account: Address,
    /// Fee harvester contract receiving `harvest(pairs)`
    pub harvester_contract: Address,
    /// Optional contract receiving `adjust()` after harvesting
    pub adjust_contract: Option<Address>,
    /// Proxies receiving `transferBalance()` at the end of each cycle
    pub proxies: Vec<Address>,
    /// Minimum potential fee in USD for a position to be harvested (inclusive)
    pub fee_cutoff_usd: f64,
    /// Positions requested per subgraph page
    pub page_size: u32,
    /// Optional cap on subgraph pages per cycle; `None` pages until exhausted
    pub max_pages: Option<u32>,
    /// Pair ids per harvest transaction
    pub batch_size: usize,
    /// Gas for each harvest transaction
    pub harvest_gas: GasSettings,
    /// Gas for the adjustment transaction
    pub adjust_gas: GasSettings,
    /// Gas for each balance transfer transaction
    pub transfer_gas: GasSettings,
    /// Blocks a transaction must be buried under before the next one is sent
    pub confirmations: u64,
    /// Delay between the end of one cycle and the start of the next
    pub interval: Duration,
}

impl RunConfig {
    /// Checks the numeric options for values the pipeline cannot run with.
    pub fn validate(&self) -> HarvestResult<()> {
        if self.page_size == 0 {
            return Err(HarvestError::Configuration("page size must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(HarvestError::Configuration("batch size must be positive".into()));
        }
        if self.max_pages == Some(0) {
            return Err(HarvestError::Configuration("max pages must be positive".into()));
        }
        if !self.fee_cutoff_usd.is_finite() || self.fee_cutoff_usd < 0.0 {
            return Err(HarvestError::Configuration(format!(
                "fee cutoff must be a non-negative number, got {}",
                self.fee_cutoff_usd
            )));
        }
        if self.confirmations == 0 {
            return Err(HarvestError::Configuration(
                "confirmation depth must be positive".into(),
            ));
        }
        if self.interval.is_zero() {
            return Err(HarvestError::Configuration("interval must be positive".into()));
        }
        Ok(())
    }
}
