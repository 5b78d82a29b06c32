//! GraphQL client for the exchange subgraph.

use alloy::primitives::Address;
use anyhow::{anyhow, bail, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::SubgraphClientConfig;
use crate::types::{GraphQlResponse, LiquidityPosition, QueryRequest, UserData};

/// Client for querying liquidity positions from the exchange subgraph.
pub struct SubgraphClient {
    client: Client,
    url: Url,
}

impl SubgraphClient {
    /// Creates a new `SubgraphClient` with the given HTTP client and endpoint.
    pub fn new(client: Client, config: SubgraphClientConfig) -> Self {
        Self {
            client,
            url: config.url,
        }
    }

    /// Fetches one page of `user`'s liquidity positions, largest balance first.
    ///
    /// # Arguments
    /// * `user` - Account whose positions are queried; lowercased in the query
    /// * `first` - Maximum number of positions in the page
    /// * `skip` - Number of positions to skip
    ///
    /// # Returns
    /// The positions of the page, empty once the listing is exhausted. Transport
    /// failures, non-success statuses, GraphQL errors, an unknown user and
    /// payloads missing expected fields are all errors.
    pub async fn liquidity_positions(
        &self,
        user: Address,
        first: u32,
        skip: u32,
    ) -> Result<Vec<LiquidityPosition>> {
        let body = QueryRequest {
            query: liquidity_positions_query(user, first, skip),
        };
        debug!(%user, first, skip, "querying liquidity positions");

        let text = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_liquidity_positions(&text)
    }
}

/// Builds the liquidity position query for one page.
pub(crate) fn liquidity_positions_query(user: Address, first: u32, skip: u32) -> String {
    let user = user.to_string().to_lowercase();
    format!(
        r#"{{
  user(id: "{user}") {{
    liquidityPositions(
      first: {first},
      skip: {skip},
      orderBy: liquidityTokenBalance,
      orderDirection: desc
    ) {{
      pair {{
        id
        totalSupply
        reserveUSD
      }}
      liquidityTokenBalance
    }}
  }}
}}"#
    )
}

pub(crate) fn parse_liquidity_positions(text: &str) -> Result<Vec<LiquidityPosition>> {
    let response: GraphQlResponse<UserData> = serde_json::from_str(text)?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        bail!("subgraph returned errors: {}", messages.join("; "));
    }

    let user = response
        .data
        .ok_or_else(|| anyhow!("subgraph response has no data"))?
        .user
        .ok_or_else(|| anyhow!("user not found in subgraph"))?;

    Ok(user.liquidity_positions)
}
