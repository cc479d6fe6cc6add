// src/provider/wallet_info.rs
//! Wallet data provider: formats the wallet's address and native balance as
//! context text the host injects into conversation state, filling the
//! `{{walletInfo}}` placeholder the action templates reference.

use async_trait::async_trait;
use tracing::error;

use crate::chains::SupportedChain;
use crate::provider::WalletProvider;
use crate::runtime::{AgentRuntime, Memory, State, StateProvider};

/// Optional setting naming the chain the wallet summary reports. Falls back
/// to Ethereum mainnet when absent or unparseable.
pub const DEFAULT_CHAIN_SETTING: &str = "EVM_DEFAULT_CHAIN";

pub struct WalletInfoProvider;

#[async_trait]
impl StateProvider for WalletInfoProvider {
    async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        _message: &Memory,
        _state: &State,
    ) -> Option<String> {
        // No wallet configured means no wallet info; the placeholder renders
        // empty and the actions stay unavailable via their own gate.
        let provider = WalletProvider::from_runtime(runtime).ok()?;

        let chain = runtime
            .get_setting(DEFAULT_CHAIN_SETTING)
            .and_then(|name| name.parse().ok())
            .unwrap_or(SupportedChain::Ethereum);

        match provider.wallet_balance(chain).await {
            Ok(balance) => {
                let config = chain.config();
                Some(format!(
                    "EVM Wallet Address: {}\nBalance: {} {}\nChain ID: {}, Name: {}",
                    provider.checksum_address(),
                    balance,
                    config.native_symbol,
                    config.id,
                    chain
                ))
            }
            Err(e) => {
                error!("failed to build wallet info: {:#}", e);
                None
            }
        }
    }
}
