mod client;
mod config;
mod types;

pub use client::SubgraphClient;
pub use config::SubgraphClientConfig;
pub use types::{LiquidityPosition, Pair};
