//! Shared types for the harvest pipeline.

use alloy::primitives::{Address, TxHash};
use clients_subgraph::LiquidityPosition;

use crate::error::HarvestError;

/// Snapshot of the account's stake in one pair, decoded from the subgraph
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Address of the pair contract
    pub pair_id: Address,
    /// Liquidity tokens held by the account
    pub liquidity_token_balance: f64,
    /// Total liquidity tokens of the pair
    pub total_supply: f64,
    /// Total value locked in the pair in USD
    pub reserve_usd: f64,
}

impl Position {
    /// Estimated USD value of the account's share of the pair.
    ///
    /// Returns `None` when the ratio is undefined, e.g. for a pair with zero
    /// total supply.
    pub fn potential_fee_usd(&self) -> Option<f64> {
        let value = self.liquidity_token_balance / self.total_supply * self.reserve_usd;
        value.is_finite().then_some(value)
    }
}

impl TryFrom<LiquidityPosition> for Position {
    type Error = HarvestError;

    fn try_from(position: LiquidityPosition) -> Result<Self, Self::Error> {
        let pair_id = position.pair.id;
        let parse = |field: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|e| {
                HarvestError::Fetch(format!(
                    "pair {pair_id}: failed to parse {field} {value:?}: {e}"
                ))
            })
        };

        Ok(Self {
            pair_id,
            liquidity_token_balance: parse(
                "liquidityTokenBalance",
                &position.liquidity_token_balance,
            )?,
            total_supply: parse("totalSupply", &position.pair.total_supply)?,
            reserve_usd: parse("reserveUSD", &position.pair.reserve_usd)?,
        })
    }
}

/// Contract call issued by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// `harvest(pairs)` on the fee harvester
    Harvest {
        contract: Address,
        pairs: Vec<Address>,
    },
    /// `adjust()` on the adjustment contract
    Adjust { contract: Address },
    /// `transferBalance()` on a proxy
    TransferBalance { proxy: Address },
}

/// Result of submitting one transaction and waiting for its confirmations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Confirmed { tx_hash: TxHash },
    Failed { error: String },
}

impl TransactionOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TransactionOutcome::Confirmed { .. })
    }
}

/// Outcome of one harvest batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Pair ids sent together in the batch
    pub pairs: Vec<Address>,
    pub outcome: TransactionOutcome,
}

/// Summary of one pipeline cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Positions returned by the subgraph
    pub positions_fetched: usize,
    /// Pair ids above the fee cutoff
    pub eligible_pairs: usize,
    /// One entry per harvest batch, in submission order
    pub batches: Vec<BatchOutcome>,
    /// Adjustment outcome, `None` when no adjustment contract is configured
    pub adjustment: Option<TransactionOutcome>,
    /// Balance transfer outcomes keyed by proxy, in configuration order
    pub transfers: Vec<(Address, TransactionOutcome)>,
}

impl CycleReport {
    pub fn confirmed_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.outcome.is_confirmed()).count()
    }

    pub fn failed_batches(&self) -> usize {
        self.batches.len() - self.confirmed_batches()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients_subgraph::Pair;

    fn liquidity_position(balance: &str, supply: &str, reserve: &str) -> LiquidityPosition {
        LiquidityPosition {
            pair: Pair {
                id: Address::repeat_byte(0x11),
                total_supply: supply.to_string(),
                reserve_usd: reserve.to_string(),
            },
            liquidity_token_balance: balance.to_string(),
        }
    }

    #[test]
    fn decodes_decimal_strings() {
        let position =
            Position::try_from(liquidity_position("2.5", "10", "1000.75")).unwrap();
        assert_eq!(position.pair_id, Address::repeat_byte(0x11));
        assert_eq!(position.liquidity_token_balance, 2.5);
        assert_eq!(position.total_supply, 10.0);
        assert_eq!(position.reserve_usd, 1000.75);
    }

    #[test]
    fn malformed_decimal_is_a_fetch_failure() {
        let err = Position::try_from(liquidity_position("abc", "10", "1")).unwrap_err();
        assert!(matches!(err, HarvestError::Fetch(_)));
    }

    #[test]
    fn zero_supply_has_no_fee_value() {
        let position = Position::try_from(liquidity_position("5", "0", "100")).unwrap();
        assert_eq!(position.potential_fee_usd(), None);

        let position = Position::try_from(liquidity_position("0", "0", "100")).unwrap();
        assert_eq!(position.potential_fee_usd(), None);
    }

    #[test]
    fn fee_value_is_share_of_reserve() {
        let position = Position::try_from(liquidity_position("1", "4", "400")).unwrap();
        assert_eq!(position.potential_fee_usd(), Some(100.0));
    }
}
