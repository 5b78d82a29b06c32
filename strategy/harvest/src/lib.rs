//! Fee harvesting strategy crate.
//!
//! Finds the liquidity positions of an account whose accrued value passes a
//! USD cutoff and harvests them on-chain in fixed-size batches, once per
//! scheduling period.

pub mod config;
mod error;
mod executor;
mod fetcher;
mod filter;
#[cfg(test)]
mod mock;
mod pipeline;
mod scheduler;
mod source;
mod types;

pub use config::RunConfig;
pub use error::{HarvestError, HarvestResult};
pub use executor::{ExecutorGas, HarvestExecutor};
pub use fetcher::PositionFetcher;
pub use filter::eligible_pairs;
pub use pipeline::HarvestPipeline;
pub use scheduler::{Cycle, Scheduler};
pub use source::{HarvestChain, PositionSource};
pub use types::{BatchOutcome, ContractCall, CycleReport, Position, TransactionOutcome};
