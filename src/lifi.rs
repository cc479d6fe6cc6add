// src/lifi.rs
//! Minimal client for the LiFi chain-abstraction API. Two endpoints are used:
//! `/token` to resolve a ticker symbol into a contract address, and `/quote`
//! to obtain a ready-to-sign transaction request for swaps and bridges.

use anyhow::{anyhow, Context, Result};
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::{parse_address, parse_hex_u256};

const DEFAULT_BASE_URL: &str = "https://li.quest/v1";

/// Zero address, LiFi's placeholder for a chain's native asset.
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Clone)]
pub struct LifiClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for LifiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Token metadata returned by `/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub chain_id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub from_chain: u64,
    pub to_chain: u64,
    pub from_token: String,
    pub to_token: String,
    /// Amount in the source token's smallest unit.
    pub from_amount: U256,
    pub from_address: String,
    pub to_address: Option<String>,
    pub slippage: Option<f64>,
}

/// Quote returned by `/quote`: route estimate plus the transaction to submit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub transaction_request: QuoteTransaction,
    #[serde(default)]
    pub estimate: Option<QuoteEstimate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTransaction {
    pub to: String,
    pub data: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub gas_limit: Option<String>,
    #[serde(default)]
    pub gas_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEstimate {
    #[serde(default)]
    pub to_amount: Option<String>,
    #[serde(default)]
    pub to_amount_min: Option<String>,
}

impl LifiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve a token symbol (or address) to its metadata on a chain.
    pub async fn token(&self, chain_id: u64, token: &str) -> Result<TokenInfo> {
        let url = format!("{}/token", self.base_url);
        debug!(chain_id, token, "resolving token via LiFi");
        let response = self
            .http
            .get(&url)
            .query(&[("chain", chain_id.to_string()), ("token", token.to_string())])
            .send()
            .await
            .context("token lookup request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("token lookup failed ({}): {}", status, body));
        }
        response
            .json::<TokenInfo>()
            .await
            .context("failed to decode token lookup response")
    }

    /// Request a route quote. Swap requests set `from_chain == to_chain`.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let url = format!("{}/quote", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("fromChain", request.from_chain.to_string()),
            ("toChain", request.to_chain.to_string()),
            ("fromToken", request.from_token.clone()),
            ("toToken", request.to_token.clone()),
            ("fromAmount", request.from_amount.to_string()),
            ("fromAddress", request.from_address.clone()),
        ];
        if let Some(to_address) = &request.to_address {
            query.push(("toAddress", to_address.clone()));
        }
        if let Some(slippage) = request.slippage {
            query.push(("slippage", slippage.to_string()));
        }

        debug!(
            from_chain = request.from_chain,
            to_chain = request.to_chain,
            "requesting route quote"
        );
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("quote request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("quote request failed ({}): {}", status, body));
        }
        response
            .json::<Quote>()
            .await
            .context("failed to decode quote response")
    }
}

impl QuoteTransaction {
    /// Convert the quoted transaction into a signable request.
    pub fn to_transaction_request(&self) -> Result<TransactionRequest> {
        let to: Address = parse_address(&self.to)?;
        let data = self
            .data
            .strip_prefix("0x")
            .unwrap_or(&self.data)
            .to_string();
        let data = hex::decode(data).context("quote calldata is not valid hex")?;

        let mut tx = TransactionRequest::new().to(to).data(Bytes::from(data));
        if let Some(value) = &self.value {
            tx = tx.value(parse_hex_u256(value)?);
        }
        if let Some(gas) = &self.gas_limit {
            tx = tx.gas(parse_hex_u256(gas)?);
        }
        if let Some(gas_price) = &self.gas_price {
            tx = tx.gas_price(parse_hex_u256(gas_price)?);
        }
        Ok(tx)
    }
}
