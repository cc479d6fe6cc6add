// src/types.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chains::SupportedChain;

// --- Error types for wallet operations ---

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),
    #[error("EVM_PRIVATE_KEY is not configured")]
    MissingPrivateKey,
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

// --- Parameter structs extracted by the host's language model ---

/// Parameters for a balance lookup. Field names match the JSON schema the
/// balance template asks the model to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceParams {
    pub chain: SupportedChain,
    /// Token symbol or contract address; `None` or "eth" means the native asset.
    #[serde(default)]
    pub token: Option<String>,
    /// Address to query; `None` means the wallet's own address.
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParams {
    pub from_chain: SupportedChain,
    pub to_address: String,
    /// Amount in human units, e.g. "0.1".
    pub amount: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Optional calldata attached to a native transfer.
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    pub chain: SupportedChain,
    pub input_token: String,
    pub output_token: String,
    pub amount: String,
    #[serde(default)]
    pub slippage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeParams {
    pub from_chain: SupportedChain,
    pub to_chain: SupportedChain,
    #[serde(default)]
    pub from_token: Option<String>,
    #[serde(default)]
    pub to_token: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub to_address: Option<String>,
}

// --- Responses ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Balance in human units (already divided by the token's decimal exponent).
    pub balance: String,
    pub token: Option<String>,
    pub chain: SupportedChain,
    /// Checksummed address the balance was resolved for.
    pub address: String,
}

/// Submitted transaction, returned by transfer, swap and bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    /// Value in wei, decimal string.
    pub value: String,
    pub chain: SupportedChain,
}

// --- Token classification ---

/// How a token identifier should be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClass {
    /// The chain's base currency.
    Native,
    /// ERC-20 identified by contract address.
    Address(String),
    /// ERC-20 identified by ticker symbol, resolved via the token lookup API.
    Symbol(String),
}

/// Classify a token identifier against a chain's native symbol. Empty or
/// missing tokens and the literal "eth" (any case) denote the native asset,
/// as does the chain's own native currency symbol.
pub fn classify_token(token: Option<&str>, native_symbol: &str) -> TokenClass {
    match token.map(str::trim) {
        None | Some("") => TokenClass::Native,
        Some(t) if t.eq_ignore_ascii_case("eth") || t.eq_ignore_ascii_case(native_symbol) => {
            TokenClass::Native
        }
        Some(t) if t.starts_with("0x") => TokenClass::Address(t.to_string()),
        Some(t) => TokenClass::Symbol(t.to_string()),
    }
}
