//! Configuration types for the harvester client.

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for HarvesterClient
#[derive(Clone, Serialize, Deserialize)]
pub struct HarvesterClientConfig {
    /// BIP-39 recovery phrase; the first derived account signs all calls
    pub mnemonic: String,
    /// JSON-RPC endpoint of the chain
    pub rpc_url: Url,
}

impl std::fmt::Debug for HarvesterClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvesterClientConfig")
            .field("mnemonic", &"<redacted>")
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}

/// Fixed gas parameters attached to a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSettings {
    /// Gas price in wei
    pub gas_price: u128,
    /// Gas limit of the call
    pub gas_limit: u64,
}
