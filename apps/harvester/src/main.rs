//! Harvester: periodically harvest fees from the liquidity positions held by
//! a contract.
//!
//! Every option can be given as a flag or through the environment variable
//! named in `--help`. MNEMONIC, ETH_URI, CONTRACT_ADDRESS and SUBGRAPH_URI
//! are required.

use std::time::Duration;

use alloy::primitives::Address;
use anyhow::Result;
use clap::Parser;
use clients_harvester::{GasSettings, HarvesterClient, HarvesterClientConfig};
use clients_subgraph::{SubgraphClient, SubgraphClientConfig};
use harvest::{HarvestPipeline, RunConfig, Scheduler};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

const ONE_GWEI: u128 = 1_000_000_000;
const ONE_DAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Parser)]
#[command(name = "harvester")]
#[command(about = "Harvests accrued pair fees on a fixed interval")]
struct Args {
    /// Recovery phrase of the signing wallet
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    mnemonic: String,

    /// JSON-RPC endpoint
    #[arg(long, env = "ETH_URI")]
    eth_uri: Url,

    /// Fee harvester contract
    #[arg(long, env = "CONTRACT_ADDRESS")]
    contract_address: Address,

    /// Contract called with `adjust()` after each harvest
    #[arg(long, env = "ADJUST_CONTRACT_ADDRESS")]
    adjust_contract_address: Option<Address>,

    /// Proxies called with `transferBalance()`, comma separated
    #[arg(long, env = "PROXY_ADDRESSES", value_delimiter = ',')]
    proxy_addresses: Vec<Address>,

    /// Account whose positions are harvested, defaults to the contract
    #[arg(long, env = "POSITIONS_ACCOUNT")]
    positions_account: Option<Address>,

    /// Exchange subgraph endpoint
    #[arg(long, env = "SUBGRAPH_URI")]
    subgraph_uri: Url,

    /// Minimum potential fee in USD for a pair to be harvested
    #[arg(long, env = "FEE_CUTOFF", default_value_t = 50.0)]
    fee_cutoff: f64,

    /// Milliseconds between the end of a cycle and the start of the next
    #[arg(long, env = "INTERVAL", default_value_t = ONE_DAY_MS)]
    interval: u64,

    /// Positions per subgraph page
    #[arg(long, env = "PAGE_SIZE", default_value_t = 20)]
    page_size: u32,

    /// Stop paging after this many pages
    #[arg(long, env = "MAX_PAGES")]
    max_pages: Option<u32>,

    /// Pairs per harvest transaction
    #[arg(long, env = "BATCH_SIZE", default_value_t = 5)]
    batch_size: usize,

    /// Gas price in wei
    #[arg(long, env = "GAS_PRICE", default_value_t = ONE_GWEI)]
    gas_price: u128,

    #[arg(long, env = "HARVEST_GAS_LIMIT", default_value_t = 1_400_000)]
    harvest_gas_limit: u64,

    #[arg(long, env = "ADJUST_GAS_LIMIT", default_value_t = 500_000)]
    adjust_gas_limit: u64,

    #[arg(long, env = "TRANSFER_GAS_LIMIT", default_value_t = 200_000)]
    transfer_gas_limit: u64,

    /// Blocks each transaction must be buried under
    #[arg(long, env = "CONFIRMATIONS", default_value_t = 2)]
    confirmations: u64,

    /// Give up waiting for confirmations after this many seconds
    #[arg(long, env = "CONFIRMATION_TIMEOUT_SECS")]
    confirmation_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("mnemonic", &"<redacted>")
            .field("eth_uri", &self.eth_uri)
            .field("contract_address", &self.contract_address)
            .field("adjust_contract_address", &self.adjust_contract_address)
            .field("proxy_addresses", &self.proxy_addresses)
            .field("positions_account", &self.positions_account)
            .field("subgraph_uri", &self.subgraph_uri)
            .field("fee_cutoff", &self.fee_cutoff)
            .field("interval", &self.interval)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("batch_size", &self.batch_size)
            .field("gas_price", &self.gas_price)
            .field("harvest_gas_limit", &self.harvest_gas_limit)
            .field("adjust_gas_limit", &self.adjust_gas_limit)
            .field("transfer_gas_limit", &self.transfer_gas_limit)
            .field("confirmations", &self.confirmations)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .finish()
    }
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let gas = |gas_limit| GasSettings {
            gas_price: self.gas_price,
            gas_limit,
        };
        RunConfig {
            account: self.positions_account.unwrap_or(self.contract_address),
            harvester_contract: self.contract_address,
            adjust_contract: self.adjust_contract_address,
            proxies: self.proxy_addresses.clone(),
            fee_cutoff_usd: self.fee_cutoff,
            page_size: self.page_size,
            max_pages: self.max_pages,
            batch_size: self.batch_size,
            harvest_gas: gas(self.harvest_gas_limit),
            adjust_gas: gas(self.adjust_gas_limit),
            transfer_gas: gas(self.transfer_gas_limit),
            confirmations: self.confirmations,
            interval: Duration::from_millis(self.interval),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.run_config();
    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }

    let chain = HarvesterClient::new(HarvesterClientConfig {
        mnemonic: args.mnemonic.clone(),
        rpc_url: args.eth_uri.clone(),
    })?
    .with_confirmation_timeout(args.confirmation_timeout_secs.map(Duration::from_secs));

    info!("Acting as {}", chain.address());
    info!("Connected to {}", args.eth_uri);
    info!(
        "Calling harvest on {} every {}ms",
        config.harvester_contract,
        config.interval.as_millis()
    );
    if let Some(contract) = config.adjust_contract {
        info!("Calling adjust on {} after each harvest", contract);
    }

    let client = reqwest::Client::builder().build()?;
    let subgraph = SubgraphClient::new(
        client,
        SubgraphClientConfig {
            url: args.subgraph_uri.clone(),
        },
    );

    let interval = config.interval;
    let pipeline = HarvestPipeline::new(config, subgraph, chain);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop requested, finishing current cycle");
            let _ = stop_tx.send(true);
        }
    });

    Scheduler::new(interval, stop_rx).run(&pipeline).await;
    Ok(())
}
