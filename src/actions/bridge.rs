// src/actions/bridge.rs
//! Cross-chain bridge through the chain-abstraction quote API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::providers::Middleware;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::actions::swap::resolve_route_token;
use crate::actions::{extract_params, Action, ActionHandler, ActionResult};
use crate::lifi::{LifiClient, QuoteRequest};
use crate::provider::WalletProvider;
use crate::runtime::{AgentRuntime, Memory, State};
use crate::templates::BRIDGE_TEMPLATE;
use crate::types::{BridgeParams, Transaction};

pub struct BridgeAction {
    provider: WalletProvider,
    lifi: LifiClient,
}

impl BridgeAction {
    pub fn new(provider: WalletProvider) -> Self {
        Self {
            provider,
            lifi: LifiClient::default(),
        }
    }

    pub fn with_lifi(provider: WalletProvider, lifi: LifiClient) -> Self {
        Self { provider, lifi }
    }

    pub async fn bridge(&self, params: BridgeParams) -> Result<Transaction> {
        let from_chain = params.from_chain;
        let to_chain = params.to_chain;
        info!(%from_chain, %to_chain, amount = %params.amount, "executing bridge");

        let from_token = resolve_route_token(
            &self.provider,
            &self.lifi,
            from_chain,
            params.from_token.as_deref(),
        )
        .await?;
        // Default to bridging into the same asset on the destination chain.
        let to_token = resolve_route_token(
            &self.provider,
            &self.lifi,
            to_chain,
            params.to_token.as_deref().or(params.from_token.as_deref()),
        )
        .await?;

        let from_amount = crate::utils::parse_token_amount(&params.amount, from_token.decimals)?;
        let to_address = params
            .to_address
            .clone()
            .unwrap_or_else(|| self.provider.checksum_address());

        let quote = self
            .lifi
            .quote(&QuoteRequest {
                from_chain: from_chain.id(),
                to_chain: to_chain.id(),
                from_token: from_token.address,
                to_token: to_token.address,
                from_amount,
                from_address: self.provider.checksum_address(),
                to_address: Some(to_address),
                slippage: None,
            })
            .await
            .context("bridge quote failed")?;

        let tx = quote.transaction_request.to_transaction_request()?;
        let value = tx.value.unwrap_or_default();

        let signer = self.provider.signer_for(from_chain)?;
        let pending = signer
            .send_transaction(tx, None)
            .await
            .map_err(|e| anyhow!("bridge failed: {}", e))?;
        let hash = *pending;

        Ok(Transaction {
            hash: format!("{:#x}", hash),
            from: self.provider.checksum_address(),
            to: quote.transaction_request.to.clone(),
            value: value.to_string(),
            chain: from_chain,
        })
    }
}

struct BridgeHandler;

#[async_trait]
impl ActionHandler for BridgeHandler {
    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        _message: &Memory,
        state: &State,
    ) -> ActionResult {
        info!("bridge action handler invoked");

        let params: BridgeParams = match extract_params(runtime, BRIDGE_TEMPLATE, state).await {
            Ok(params) => params,
            Err(result) => return result,
        };

        let provider = match WalletProvider::from_runtime(runtime) {
            Ok(provider) => provider,
            Err(e) => return ActionResult::failure(format!("Error: {}", e)),
        };

        let (amount, from_chain, to_chain) =
            (params.amount.clone(), params.from_chain, params.to_chain);
        match BridgeAction::new(provider).bridge(params).await {
            Ok(tx) => ActionResult::ok(
                format!(
                    "Successfully bridged {} from {} to {}\nTransaction Hash: {}",
                    amount, from_chain, to_chain, tx.hash
                ),
                json!({
                    "success": true,
                    "hash": tx.hash,
                    "from": tx.from,
                    "to": tx.to,
                    "value": tx.value,
                    "chain": tx.chain,
                }),
            ),
            Err(e) => {
                error!("bridge handler failed: {:#}", e);
                ActionResult::failure(format!("Error: {:#}", e))
            }
        }
    }
}

pub fn bridge_action() -> Action {
    Action {
        name: "bridge",
        description: "Bridge tokens between chains",
        similes: &["BRIDGE_TOKENS", "CROSS_CHAIN_TRANSFER", "MOVE_CROSS_CHAIN"],
        handler: Arc::new(BridgeHandler),
    }
}
