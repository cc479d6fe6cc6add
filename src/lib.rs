// src/lib.rs

// Re-export commonly used types
pub use ethers::types::{Address, H256, U256};

// Re-export modules
pub mod actions;
pub mod chains;
pub mod config;
pub mod lifi;
pub mod provider;
pub mod runtime;
pub mod templates;
pub mod types;
pub mod utils;

use std::sync::Arc;

pub use actions::{Action, ActionResult};
pub use chains::{ChainConfig, SupportedChain};
pub use provider::wallet::WalletProvider;
pub use provider::wallet_info::WalletInfoProvider;

use runtime::{AgentRuntime, Memory, State, StateProvider};

/// One data provider entry on the plugin descriptor. The host runs each
/// provider before composing action prompts and folds the returned text into
/// conversation state.
pub struct DataProvider {
    pub name: &'static str,
    pub provider: Arc<dyn StateProvider>,
}

impl DataProvider {
    pub async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: &State,
    ) -> Option<String> {
        self.provider.get(runtime, message, state).await
    }
}

/// Plugin descriptor handed to the host runtime. The actions table is plain
/// data: the host matches a trigger phrase against names and similes and runs
/// the selected handler. Providers supply context text, e.g. the wallet
/// summary that fills `{{walletInfo}}`.
pub struct Plugin {
    pub name: &'static str,
    pub description: &'static str,
    pub actions: Vec<Action>,
    pub providers: Vec<DataProvider>,
}

impl Plugin {
    /// Look up an action by name or simile, case-insensitively.
    pub fn find_action(&self, trigger: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.matches(trigger))
    }
}

/// Build the EVM plugin with its full action set and the wallet data provider.
pub fn evm_plugin() -> Plugin {
    Plugin {
        name: "evm",
        description: "EVM blockchain integration plugin",
        actions: vec![
            actions::transfer::transfer_action(),
            actions::bridge::bridge_action(),
            actions::swap::swap_action(),
            actions::balance::balance_action(),
        ],
        providers: vec![DataProvider {
            name: "wallet",
            provider: Arc::new(WalletInfoProvider),
        }],
    }
}
