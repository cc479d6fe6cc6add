// src/provider/wallet.rs
//! Wallet provider: signing key plus one JSON-RPC client per supported chain.
//!
//! Chain selection is an explicit parameter on every method. The client map is
//! immutable after construction, so concurrent requests against different
//! chains cannot interfere with each other.

use anyhow::{anyhow, Context, Result};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, U256};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::chains::SupportedChain;
use crate::runtime::AgentRuntime;
use crate::types::WalletError;
use crate::utils::{checksum, format_token_amount};

pub const PRIVATE_KEY_SETTING: &str = "EVM_PRIVATE_KEY";

#[derive(Clone, Debug)]
pub struct WalletProvider {
    wallet: LocalWallet,
    clients: HashMap<SupportedChain, Arc<Provider<Http>>>,
}

impl WalletProvider {
    /// Build a provider from a 0x-prefixed private key and optional per-chain
    /// RPC URL overrides. Clients for every supported chain are created up
    /// front from the static chain table.
    pub fn new(
        private_key: &str,
        rpc_overrides: &HashMap<SupportedChain, String>,
    ) -> Result<Self> {
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);
        let wallet = LocalWallet::from_str(key)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;

        let mut clients = HashMap::new();
        for chain in SupportedChain::all() {
            let url = rpc_overrides
                .get(chain)
                .map(String::as_str)
                .unwrap_or(chain.config().default_rpc_url);
            let provider = Provider::<Http>::try_from(url)
                .with_context(|| format!("invalid RPC URL for {}: {}", chain, url))?;
            clients.insert(*chain, Arc::new(provider));
        }

        debug!(address = %checksum(&wallet.address()), "wallet provider initialized");
        Ok(Self { wallet, clients })
    }

    /// Build a provider from the host runtime's settings: `EVM_PRIVATE_KEY`
    /// plus `ETHEREUM_PROVIDER_<CHAIN>` RPC overrides.
    pub fn from_runtime(runtime: &dyn AgentRuntime) -> Result<Self> {
        let key = runtime
            .get_setting(PRIVATE_KEY_SETTING)
            .ok_or(WalletError::MissingPrivateKey)?;

        let mut overrides = HashMap::new();
        for chain in SupportedChain::all() {
            let setting = format!("ETHEREUM_PROVIDER_{}", chain.name().to_uppercase());
            if let Some(url) = runtime.get_setting(&setting) {
                overrides.insert(*chain, url);
            }
        }

        Self::new(&key, &overrides)
    }

    /// The wallet's own address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// The wallet's own address, checksummed.
    pub fn checksum_address(&self) -> String {
        checksum(&self.wallet.address())
    }

    /// Read-only RPC client for a chain.
    pub fn public_client(&self, chain: SupportedChain) -> Result<Arc<Provider<Http>>> {
        self.clients
            .get(&chain)
            .cloned()
            .ok_or_else(|| anyhow!(WalletError::UnsupportedChain(chain.name().to_string())))
    }

    /// Signing client for a chain, with the chain id from the static table.
    pub fn signer_for(
        &self,
        chain: SupportedChain,
    ) -> Result<SignerMiddleware<Provider<Http>, LocalWallet>> {
        let provider = self.public_client(chain)?;
        let signer = self.wallet.clone().with_chain_id(chain.id());
        Ok(SignerMiddleware::new((*provider).clone(), signer))
    }

    /// Native balance of an address, in wei.
    pub async fn native_balance(&self, chain: SupportedChain, address: Address) -> Result<U256> {
        let client = self.public_client(chain)?;
        client
            .get_balance(address, None)
            .await
            .map_err(|e| anyhow!("failed to fetch native balance: {}", e))
    }

    /// The wallet's own native balance on a chain, in human units.
    pub async fn wallet_balance(&self, chain: SupportedChain) -> Result<String> {
        let wei = self.native_balance(chain, self.address()).await?;
        format_token_amount(wei, chain.config().native_decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test vector: this key derives the address below.
    const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const TEST_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

    #[test]
    fn derives_address_from_private_key() {
        let provider = WalletProvider::new(TEST_KEY, &HashMap::new()).unwrap();
        assert_eq!(provider.checksum_address(), TEST_ADDRESS);
    }

    #[test]
    fn rejects_malformed_private_key() {
        let err = WalletProvider::new("0xnot-a-key", &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("invalid private key"));
    }

    #[test]
    fn rpc_override_replaces_default_endpoint() {
        let mut overrides = HashMap::new();
        overrides.insert(SupportedChain::Sepolia, "http://127.0.0.1:8545".to_string());
        let provider = WalletProvider::new(TEST_KEY, &overrides).unwrap();

        let client = provider.public_client(SupportedChain::Sepolia).unwrap();
        assert_eq!(client.url().as_str(), "http://127.0.0.1:8545/");
        // Other chains keep the table default
        let mainnet = provider.public_client(SupportedChain::Ethereum).unwrap();
        assert!(mainnet.url().as_str().contains("publicnode.com"));
    }

    #[test]
    fn signer_uses_chain_id_from_table() {
        let provider = WalletProvider::new(TEST_KEY, &HashMap::new()).unwrap();
        let signer = provider.signer_for(SupportedChain::Base).unwrap();
        assert_eq!(signer.signer().chain_id(), 8453);
    }
}
