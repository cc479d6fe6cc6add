// src/actions/swap.rs
//! Same-chain token swap through the chain-abstraction quote API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::providers::Middleware;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::actions::{extract_params, Action, ActionHandler, ActionResult};
use crate::chains::SupportedChain;
use crate::lifi::{LifiClient, QuoteRequest, NATIVE_TOKEN_ADDRESS};
use crate::provider::{erc20, WalletProvider};
use crate::runtime::{AgentRuntime, Memory, State};
use crate::templates::SWAP_TEMPLATE;
use crate::types::{classify_token, SwapParams, TokenClass, Transaction};
use crate::utils::{parse_address, parse_token_amount};

/// Token resolved for routing: the form the quote API expects.
pub(crate) struct RouteToken {
    pub address: String,
    pub decimals: u8,
}

/// Resolve a token identifier into the address/decimals pair the quote API
/// needs. Native assets map to the zero-address placeholder.
pub(crate) async fn resolve_route_token(
    provider: &WalletProvider,
    lifi: &LifiClient,
    chain: SupportedChain,
    token: Option<&str>,
) -> Result<RouteToken> {
    let config = chain.config();
    match classify_token(token, config.native_symbol) {
        TokenClass::Native => Ok(RouteToken {
            address: NATIVE_TOKEN_ADDRESS.to_string(),
            decimals: config.native_decimals,
        }),
        TokenClass::Address(address) => {
            let token_addr = parse_address(&address)?;
            let client = provider.public_client(chain)?;
            let decimals = erc20::decimals(client.as_ref(), token_addr).await?;
            Ok(RouteToken { address, decimals })
        }
        TokenClass::Symbol(symbol) => {
            let info = lifi
                .token(chain.id(), &symbol)
                .await
                .with_context(|| format!("failed to resolve token symbol '{}'", symbol))?;
            Ok(RouteToken {
                address: info.address,
                decimals: info.decimals,
            })
        }
    }
}

pub struct SwapAction {
    provider: WalletProvider,
    lifi: LifiClient,
}

impl SwapAction {
    pub fn new(provider: WalletProvider) -> Self {
        Self {
            provider,
            lifi: LifiClient::default(),
        }
    }

    pub fn with_lifi(provider: WalletProvider, lifi: LifiClient) -> Self {
        Self { provider, lifi }
    }

    pub async fn swap(&self, params: SwapParams) -> Result<Transaction> {
        let chain = params.chain;
        info!(
            %chain,
            input = %params.input_token,
            output = %params.output_token,
            amount = %params.amount,
            "executing swap"
        );

        let input =
            resolve_route_token(&self.provider, &self.lifi, chain, Some(&params.input_token))
                .await?;
        let output =
            resolve_route_token(&self.provider, &self.lifi, chain, Some(&params.output_token))
                .await?;
        let from_amount = parse_token_amount(&params.amount, input.decimals)?;

        let quote = self
            .lifi
            .quote(&QuoteRequest {
                from_chain: chain.id(),
                to_chain: chain.id(),
                from_token: input.address,
                to_token: output.address,
                from_amount,
                from_address: self.provider.checksum_address(),
                to_address: None,
                slippage: params.slippage,
            })
            .await
            .context("swap quote failed")?;

        let tx = quote.transaction_request.to_transaction_request()?;
        let value = tx.value.unwrap_or_default();

        let signer = self.provider.signer_for(chain)?;
        let pending = signer
            .send_transaction(tx, None)
            .await
            .map_err(|e| anyhow!("swap failed: {}", e))?;
        let hash = *pending;

        Ok(Transaction {
            hash: format!("{:#x}", hash),
            from: self.provider.checksum_address(),
            to: quote.transaction_request.to.clone(),
            value: value.to_string(),
            chain,
        })
    }
}

struct SwapHandler;

#[async_trait]
impl ActionHandler for SwapHandler {
    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        _message: &Memory,
        state: &State,
    ) -> ActionResult {
        info!("swap action handler invoked");

        let params: SwapParams = match extract_params(runtime, SWAP_TEMPLATE, state).await {
            Ok(params) => params,
            Err(result) => return result,
        };

        let provider = match WalletProvider::from_runtime(runtime) {
            Ok(provider) => provider,
            Err(e) => return ActionResult::failure(format!("Error: {}", e)),
        };

        let (amount, input, output) = (
            params.amount.clone(),
            params.input_token.clone(),
            params.output_token.clone(),
        );
        match SwapAction::new(provider).swap(params).await {
            Ok(tx) => ActionResult::ok(
                format!(
                    "Successfully swapped {} {} for {}\nTransaction Hash: {}",
                    amount, input, output, tx.hash
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
                error!("swap handler failed: {:#}", e);
                ActionResult::failure(format!("Error: {:#}", e))
            }
        }
    }
}

pub fn swap_action() -> Action {
    Action {
        name: "swap",
        description: "Swap tokens on the same chain",
        similes: &["SWAP_TOKENS", "TOKEN_SWAP", "EXCHANGE_TOKENS", "TRADE_TOKENS"],
        handler: Arc::new(SwapHandler),
    }
}
