// src/actions/balance.rs
//! Balance lookup across native and ERC-20 tokens.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::types::Address;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::actions::{extract_params, Action, ActionHandler, ActionResult};
use crate::chains::SupportedChain;
use crate::lifi::LifiClient;
use crate::provider::{erc20, WalletProvider};
use crate::runtime::{AgentRuntime, Memory, State};
use crate::templates::BALANCE_TEMPLATE;
use crate::types::{classify_token, BalanceParams, BalanceResponse, TokenClass};
use crate::utils::{checksum, format_token_amount, parse_address};

pub struct BalanceAction {
    provider: WalletProvider,
    lifi: LifiClient,
}

impl BalanceAction {
    pub fn new(provider: WalletProvider) -> Self {
        Self {
            provider,
            lifi: LifiClient::default(),
        }
    }

    pub fn with_lifi(provider: WalletProvider, lifi: LifiClient) -> Self {
        Self { provider, lifi }
    }

    pub async fn get_balance(&self, params: BalanceParams) -> Result<BalanceResponse> {
        let chain = params.chain;
        let config = chain.config();
        info!(
            token = params.token.as_deref().unwrap_or(config.native_symbol),
            %chain,
            "resolving balance"
        );

        // Normalization happens before any network call: a missing address
        // falls back to the wallet's own, a malformed one fails synchronously.
        let address = self.resolve_address(params.address.as_deref())?;
        let class = classify_token(params.token.as_deref(), config.native_symbol);

        let balance = self
            .resolve_balance(chain, address, class)
            .await
            .map_err(|e| anyhow!("fetch balance failed: {:#}", e))?;

        Ok(BalanceResponse {
            balance,
            token: params.token,
            chain,
            address: checksum(&address),
        })
    }

    fn resolve_address(&self, address: Option<&str>) -> Result<Address> {
        match address {
            Some(a) if !a.trim().is_empty() => Ok(parse_address(a)?),
            _ => Ok(self.provider.address()),
        }
    }

    async fn resolve_balance(
        &self,
        chain: SupportedChain,
        address: Address,
        class: TokenClass,
    ) -> Result<String> {
        match class {
            TokenClass::Native => {
                let wei = self.provider.native_balance(chain, address).await?;
                format_token_amount(wei, chain.config().native_decimals)
            }
            TokenClass::Address(token) => {
                let token = parse_address(&token)?;
                self.erc20_balance(chain, address, token).await
            }
            TokenClass::Symbol(symbol) => {
                // Symbol form: resolve to a contract address through the
                // token lookup API, then read the contract as usual.
                let info = self
                    .lifi
                    .token(chain.id(), &symbol)
                    .await
                    .with_context(|| format!("failed to resolve token symbol '{}'", symbol))?;
                let token = parse_address(&info.address)?;
                self.erc20_balance(chain, address, token).await
            }
        }
    }

    async fn erc20_balance(
        &self,
        chain: SupportedChain,
        address: Address,
        token: Address,
    ) -> Result<String> {
        let client = self.provider.public_client(chain)?;
        let raw = erc20::balance_of(client.as_ref(), token, address).await?;
        let decimals = erc20::decimals(client.as_ref(), token).await?;
        format_token_amount(raw, decimals)
    }
}

struct BalanceHandler;

#[async_trait]
impl ActionHandler for BalanceHandler {
    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        _message: &Memory,
        state: &State,
    ) -> ActionResult {
        info!("balance action handler invoked");

        let params: BalanceParams = match extract_params(runtime, BALANCE_TEMPLATE, state).await {
            Ok(params) => params,
            Err(result) => return result,
        };

        let provider = match WalletProvider::from_runtime(runtime) {
            Ok(provider) => provider,
            Err(e) => return ActionResult::failure(format!("Error: {}", e)),
        };

        let action = BalanceAction::new(provider);
        let token_label = params
            .token
            .clone()
            .unwrap_or_else(|| params.chain.config().native_symbol.to_string());
        let chain = params.chain;

        match action.get_balance(params).await {
            Ok(response) => ActionResult::ok(
                format!(
                    "Balance for {} on {}: {}",
                    token_label, chain, response.balance
                ),
                json!({
                    "success": true,
                    "balance": response.balance,
                    "token": response.token,
                    "chain": response.chain,
                    "address": response.address,
                }),
            ),
            Err(e) => {
                error!("balance handler failed: {:#}", e);
                ActionResult::failure(format!("Error: {:#}", e))
            }
        }
    }
}

pub fn balance_action() -> Action {
    Action {
        name: "balance",
        description: "Fetch token balances for a wallet address",
        similes: &["CHECK_BALANCE", "FETCH_BALANCE", "GET_BALANCE"],
        handler: Arc::new(BalanceHandler),
    }
}
