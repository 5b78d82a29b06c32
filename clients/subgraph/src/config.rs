use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for SubgraphClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphClientConfig {
    /// GraphQL endpoint of the exchange subgraph
    pub url: Url,
}
