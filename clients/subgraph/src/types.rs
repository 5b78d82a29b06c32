use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Liquidity position of a user in one pair, as reported by the subgraph.
///
/// All amounts are decimal strings exactly as the subgraph returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    pub pair: Pair,
    #[serde(rename = "liquidityTokenBalance")]
    pub liquidity_token_balance: String,
}

/// Pair aggregates attached to a liquidity position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    /// Address of the pair contract
    pub id: Address,
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct User {
    #[serde(rename = "liquidityPositions")]
    pub liquidity_positions: Vec<LiquidityPosition>,
}

#[derive(Serialize)]
pub(crate) struct QueryRequest {
    pub query: String,
}
