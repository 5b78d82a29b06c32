//! In-memory collaborators for pipeline tests.

use std::collections::HashSet;
use std::sync::Mutex;

use alloy::primitives::{Address, TxHash, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clients_harvester::GasSettings;
use clients_subgraph::{LiquidityPosition, Pair};

use crate::source::{HarvestChain, PositionSource};
use crate::types::ContractCall;

pub(crate) fn liquidity_position(
    pair: Address,
    balance: &str,
    supply: &str,
    reserve_usd: &str,
) -> LiquidityPosition {
    LiquidityPosition {
        pair: Pair {
            id: pair,
            total_supply: supply.to_string(),
            reserve_usd: reserve_usd.to_string(),
        },
        liquidity_token_balance: balance.to_string(),
    }
}

/// Serves fixed pages, selected by `skip / first`.
#[derive(Default)]
pub(crate) struct MockSource {
    pages: Vec<Vec<LiquidityPosition>>,
    failing_page: Option<u32>,
    requests: Mutex<Vec<(Address, u32, u32)>>,
}

impl MockSource {
    pub(crate) fn new(pages: Vec<Vec<LiquidityPosition>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub(crate) fn failing_on_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub(crate) fn requests(&self) -> Vec<(Address, u32, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PositionSource for MockSource {
    async fn positions_page(
        &self,
        account: Address,
        first: u32,
        skip: u32,
    ) -> Result<Vec<LiquidityPosition>> {
        self.requests.lock().unwrap().push((account, first, skip));
        let page = skip / first;
        if self.failing_page == Some(page) {
            return Err(anyhow!("subgraph unavailable"));
        }
        Ok(self.pages.get(page as usize).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChainEvent {
    /// Submission of the n-th call
    Submit(usize),
    /// Confirmation wait for the n-th call at the given depth
    Wait(usize, u64),
}

/// Records calls and hands out sequential transaction hashes.
#[derive(Default)]
pub(crate) struct MockChain {
    failing_submits: HashSet<usize>,
    failing_waits: HashSet<usize>,
    failing_balance: bool,
    calls: Mutex<Vec<(ContractCall, GasSettings)>>,
    events: Mutex<Vec<ChainEvent>>,
}

impl MockChain {
    pub(crate) fn failing_submit(mut self, index: usize) -> Self {
        self.failing_submits.insert(index);
        self
    }

    pub(crate) fn failing_wait(mut self, index: usize) -> Self {
        self.failing_waits.insert(index);
        self
    }

    pub(crate) fn failing_balance(mut self) -> Self {
        self.failing_balance = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(ContractCall, GasSettings)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn events(&self) -> Vec<ChainEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl HarvestChain for MockChain {
    async fn submit(&self, call: &ContractCall, gas: GasSettings) -> Result<TxHash> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((call.clone(), gas));
            calls.len() - 1
        };
        self.events.lock().unwrap().push(ChainEvent::Submit(index));

        if self.failing_submits.contains(&index) {
            return Err(anyhow!("insufficient funds for gas"));
        }
        Ok(TxHash::with_last_byte(index as u8))
    }

    async fn wait_for_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> Result<()> {
        let index = tx_hash[31] as usize;
        self.events
            .lock()
            .unwrap()
            .push(ChainEvent::Wait(index, confirmations));

        if self.failing_waits.contains(&index) {
            return Err(anyhow!("transaction reverted"));
        }
        Ok(())
    }

    async fn balance(&self) -> Result<U256> {
        if self.failing_balance {
            return Err(anyhow!("connection refused"));
        }
        Ok(U256::from(1_500_000_000_000_000_000u128))
    }
}
