//! Economic filter selecting the pairs worth harvesting.

use alloy::primitives::Address;
use tracing::debug;

use crate::types::Position;

/// Returns the pair ids of `positions` whose potential fee reaches `cutoff_usd`.
///
/// The cutoff is inclusive. Input order is kept and duplicates are not
/// merged. Positions with an undefined fee value (zero total supply) never
/// pass.
pub fn eligible_pairs(positions: &[Position], cutoff_usd: f64) -> Vec<Address> {
    positions
        .iter()
        .filter(|position| match position.potential_fee_usd() {
            Some(fee_usd) => fee_usd >= cutoff_usd,
            None => {
                debug!(pair = %position.pair_id, "skipping pair with undefined fee value");
                false
            }
        })
        .map(|position| position.pair_id)
        .collect()
}
