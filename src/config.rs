// src/config.rs

use std::collections::HashMap;
use std::env;

/// Runtime settings loaded once from the environment. Hosts that do not carry
/// their own settings store can back [`AgentRuntime::get_setting`] with this.
///
/// Recognized keys:
/// - `EVM_PRIVATE_KEY`: 0x-prefixed signing key; gates action availability.
/// - `ETHEREUM_PROVIDER_<CHAIN>`: per-chain RPC URL override, e.g.
///   `ETHEREUM_PROVIDER_SEPOLIA`.
///
/// [`AgentRuntime::get_setting`]: crate::runtime::AgentRuntime::get_setting
#[derive(Clone, Debug, Default)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Load variables from the .env file (if present) and the process
    /// environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            values: env::vars().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}
