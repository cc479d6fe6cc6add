// src/chains.rs

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::types::WalletError;

/// Chains the plugin can route requests to. The set is fixed at compile time;
/// per-chain metadata lives in the static registry below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedChain {
    Ethereum,
    Sepolia,
    Base,
    Arbitrum,
    Optimism,
    Polygon,
    Bsc,
    Avalanche,
    Gnosis,
    Linea,
    Scroll,
    Mantle,
    Zksync,
}

/// Static per-chain metadata. Read-only after process start.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub id: u64,
    pub name: &'static str,
    pub native_symbol: &'static str,
    pub native_decimals: u8,
    pub default_rpc_url: &'static str,
    pub block_explorer: &'static str,
}

macro_rules! chain_config {
    ($id:expr, $name:expr, $symbol:expr, $rpc:expr, $explorer:expr) => {
        ChainConfig {
            id: $id,
            name: $name,
            native_symbol: $symbol,
            native_decimals: 18,
            default_rpc_url: $rpc,
            block_explorer: $explorer,
        }
    };
}

lazy_static! {
    static ref CHAIN_REGISTRY: HashMap<SupportedChain, ChainConfig> = {
        use SupportedChain::*;
        let mut m = HashMap::new();
        m.insert(
            Ethereum,
            chain_config!(1, "ethereum", "ETH", "https://ethereum-rpc.publicnode.com", "https://etherscan.io"),
        );
        m.insert(
            Sepolia,
            chain_config!(11155111, "sepolia", "ETH", "https://ethereum-sepolia-rpc.publicnode.com", "https://sepolia.etherscan.io"),
        );
        m.insert(
            Base,
            chain_config!(8453, "base", "ETH", "https://base-rpc.publicnode.com", "https://basescan.org"),
        );
        m.insert(
            Arbitrum,
            chain_config!(42161, "arbitrum", "ETH", "https://arbitrum-one-rpc.publicnode.com", "https://arbiscan.io"),
        );
        m.insert(
            Optimism,
            chain_config!(10, "optimism", "ETH", "https://optimism-rpc.publicnode.com", "https://optimistic.etherscan.io"),
        );
        m.insert(
            Polygon,
            chain_config!(137, "polygon", "POL", "https://polygon-bor-rpc.publicnode.com", "https://polygonscan.com"),
        );
        m.insert(
            Bsc,
            chain_config!(56, "bsc", "BNB", "https://bsc-rpc.publicnode.com", "https://bscscan.com"),
        );
        m.insert(
            Avalanche,
            chain_config!(43114, "avalanche", "AVAX", "https://avalanche-c-chain-rpc.publicnode.com", "https://snowtrace.io"),
        );
        m.insert(
            Gnosis,
            chain_config!(100, "gnosis", "XDAI", "https://gnosis-rpc.publicnode.com", "https://gnosisscan.io"),
        );
        m.insert(
            Linea,
            chain_config!(59144, "linea", "ETH", "https://linea-rpc.publicnode.com", "https://lineascan.build"),
        );
        m.insert(
            Scroll,
            chain_config!(534352, "scroll", "ETH", "https://scroll-rpc.publicnode.com", "https://scrollscan.com"),
        );
        m.insert(
            Mantle,
            chain_config!(5000, "mantle", "MNT", "https://mantle-rpc.publicnode.com", "https://mantlescan.xyz"),
        );
        m.insert(
            Zksync,
            chain_config!(324, "zksync", "ETH", "https://mainnet.era.zksync.io", "https://era.zksync.network"),
        );
        m
    };
}

impl SupportedChain {
    pub fn all() -> &'static [SupportedChain] {
        use SupportedChain::*;
        &[
            Ethereum, Sepolia, Base, Arbitrum, Optimism, Polygon, Bsc, Avalanche, Gnosis, Linea,
            Scroll, Mantle, Zksync,
        ]
    }

    /// Static configuration for this chain.
    pub fn config(&self) -> &'static ChainConfig {
        // Registry covers every variant
        &CHAIN_REGISTRY[self]
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn id(&self) -> u64 {
        self.config().id
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SupportedChain {
    type Err = WalletError;

    /// Accepts canonical chain names plus the aliases users commonly type.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        use SupportedChain::*;
        let mut s = input.trim().to_lowercase();
        s = s.replace([' ', '_'], "-");
        while s.contains("--") {
            s = s.replace("--", "-");
        }

        let chain = match s.as_str() {
            "ethereum" | "mainnet" | "main" | "eth" => Ethereum,
            "sepolia" | "testnet" => Sepolia,
            "base" => Base,
            "arbitrum" | "arbitrum-one" | "arb" => Arbitrum,
            "optimism" | "op" => Optimism,
            "polygon" | "matic" | "pol" => Polygon,
            "bsc" | "binance" | "bnb" => Bsc,
            "avalanche" | "avax" => Avalanche,
            "gnosis" | "xdai" => Gnosis,
            "linea" => Linea,
            "scroll" => Scroll,
            "mantle" => Mantle,
            "zksync" | "zksync-era" | "zk" => Zksync,
            _ => return Err(WalletError::UnsupportedChain(input.to_string())),
        };
        Ok(chain)
    }
}

/// Quoted, comma-separated chain names for template substitution.
pub fn supported_chain_list() -> String {
    SupportedChain::all()
        .iter()
        .map(|c| format!("\"{}\"", c.name()))
        .collect::<Vec<_>>()
        .join(" | ")
}
