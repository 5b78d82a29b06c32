//! Signing client for the fee harvester contracts.

use std::time::Duration;

use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use anyhow::{bail, Result};
use tracing::debug;

use crate::config::{GasSettings, HarvesterClientConfig};
use crate::contracts::{IAdjuster, IBalanceProxy, IFeeHarvester};

/// HarvesterClient signs and broadcasts calls to the harvester contracts and
/// tracks them until they are buried under enough blocks.
pub struct HarvesterClient {
    /// Provider with the signing wallet attached
    provider: DynProvider,
    /// Address of the signing account
    address: Address,
    /// Upper bound on a confirmation wait, `None` waits forever
    confirmation_timeout: Option<Duration>,
}

impl HarvesterClient {
    /// Creates a new `HarvesterClient`
    ///
    /// # Arguments
    /// * `config` - Recovery phrase and RPC endpoint
    ///
    /// # Returns
    /// The client, or an error if the phrase cannot be turned into a signer
    pub fn new(config: HarvesterClientConfig) -> Result<Self> {
        let signer: PrivateKeySigner = MnemonicBuilder::<English>::default()
            .phrase(config.mnemonic.as_str())
            .build()?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc_url)
            .erased();

        Ok(Self {
            provider,
            address,
            confirmation_timeout: None,
        })
    }

    /// Bounds every confirmation wait by `timeout`.
    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Address of the signing account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Broadcasts `harvest(pairs)` on `contract` and returns the transaction hash.
    pub async fn harvest(
        &self,
        contract: Address,
        pairs: Vec<Address>,
        gas: GasSettings,
    ) -> Result<TxHash> {
        let harvester = IFeeHarvester::new(contract, &self.provider);
        let pending = harvester
            .harvest(pairs)
            .gas_price(gas.gas_price)
            .gas(gas.gas_limit)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Broadcasts `adjust()` on `contract` and returns the transaction hash.
    pub async fn adjust(&self, contract: Address, gas: GasSettings) -> Result<TxHash> {
        let adjuster = IAdjuster::new(contract, &self.provider);
        let pending = adjuster
            .adjust()
            .gas_price(gas.gas_price)
            .gas(gas.gas_limit)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Broadcasts `transferBalance()` on `proxy` and returns the transaction hash.
    pub async fn transfer_balance(&self, proxy: Address, gas: GasSettings) -> Result<TxHash> {
        let balance_proxy = IBalanceProxy::new(proxy, &self.provider);
        let pending = balance_proxy
            .transferBalance()
            .gas_price(gas.gas_price)
            .gas(gas.gas_limit)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Waits until `tx_hash` is mined and `confirmations` blocks deep.
    ///
    /// # Returns
    /// `Ok(())` once the transaction is confirmed; an error if it reverted,
    /// the wait timed out or the provider failed
    pub async fn wait_for_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> Result<()> {
        debug!(%tx_hash, confirmations, "waiting for confirmations");
        let receipt = PendingTransactionBuilder::<Ethereum>::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(confirmations)
            .with_timeout(self.confirmation_timeout)
            .get_receipt()
            .await?;

        if !receipt.status() {
            bail!(
                "transaction {} reverted in block {:?} (gas used: {})",
                tx_hash,
                receipt.block_number,
                receipt.gas_used
            );
        }
        Ok(())
    }

    /// Current native balance of the signing account in wei.
    pub async fn balance(&self) -> Result<U256> {
        Ok(self.provider.get_balance(self.address).await?)
    }
}
