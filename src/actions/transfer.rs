// src/actions/transfer.rs
//! Native and ERC-20 transfers.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Bytes, TransactionRequest, U256};
use ethers::utils::parse_ether;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::actions::{extract_params, Action, ActionHandler, ActionResult};
use crate::chains::SupportedChain;
use crate::lifi::LifiClient;
use crate::provider::{erc20, WalletProvider};
use crate::runtime::{AgentRuntime, Memory, State};
use crate::templates::TRANSFER_TEMPLATE;
use crate::types::{classify_token, Transaction, TokenClass, TransferParams};
use crate::utils::{checksum, parse_address, parse_token_amount};

pub struct TransferAction {
    provider: WalletProvider,
    lifi: LifiClient,
}

impl TransferAction {
    pub fn new(provider: WalletProvider) -> Self {
        Self {
            provider,
            lifi: LifiClient::default(),
        }
    }

    pub async fn transfer(&self, params: TransferParams) -> Result<Transaction> {
        let chain = params.from_chain;
        let config = chain.config();
        let to = parse_address(&params.to_address)?;
        info!(%chain, to = %params.to_address, amount = %params.amount, "executing transfer");

        let class = classify_token(params.token.as_deref(), config.native_symbol);
        let (tx, value) = match class {
            TokenClass::Native => {
                let value = parse_ether(&params.amount)
                    .map_err(|e| anyhow!("invalid amount '{}': {}", params.amount, e))?;
                let mut tx = TransactionRequest::new().to(to).value(value);
                if let Some(data) = &params.data {
                    let raw = hex::decode(data.trim_start_matches("0x"))
                        .context("transfer calldata is not valid hex")?;
                    tx = tx.data(Bytes::from(raw));
                }
                (tx, value)
            }
            TokenClass::Address(token) => {
                let token = parse_address(&token)?;
                self.erc20_transfer_request(chain, token, to, &params.amount)
                    .await?
            }
            TokenClass::Symbol(symbol) => {
                let info = self
                    .lifi
                    .token(chain.id(), &symbol)
                    .await
                    .with_context(|| format!("failed to resolve token symbol '{}'", symbol))?;
                let token = parse_address(&info.address)?;
                self.erc20_transfer_request(chain, token, to, &params.amount)
                    .await?
            }
        };

        let signer = self.provider.signer_for(chain)?;
        let pending = signer
            .send_transaction(tx, None)
            .await
            .map_err(|e| anyhow!("transfer failed: {}", e))?;
        let hash = *pending;

        Ok(Transaction {
            hash: format!("{:#x}", hash),
            from: self.provider.checksum_address(),
            to: checksum(&to),
            value: value.to_string(),
            chain,
        })
    }

    /// Build a `transfer(to, amount)` call against the token contract, with
    /// the amount scaled by the contract's own decimals.
    async fn erc20_transfer_request(
        &self,
        chain: SupportedChain,
        token: ethers::types::Address,
        to: ethers::types::Address,
        amount: &str,
    ) -> Result<(TransactionRequest, U256)> {
        let client = self.provider.public_client(chain)?;
        let decimals = erc20::decimals(client.as_ref(), token).await?;
        let raw_amount = parse_token_amount(amount, decimals)?;
        let tx = TransactionRequest::new()
            .to(token)
            .data(erc20::transfer_calldata(to, raw_amount));
        Ok((tx, U256::zero()))
    }
}

struct TransferHandler;

#[async_trait]
impl ActionHandler for TransferHandler {
    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        _message: &Memory,
        state: &State,
    ) -> ActionResult {
        info!("transfer action handler invoked");

        let params: TransferParams = match extract_params(runtime, TRANSFER_TEMPLATE, state).await {
            Ok(params) => params,
            Err(result) => return result,
        };

        let provider = match WalletProvider::from_runtime(runtime) {
            Ok(provider) => provider,
            Err(e) => return ActionResult::failure(format!("Error: {}", e)),
        };

        let amount = params.amount.clone();
        match TransferAction::new(provider).transfer(params).await {
            Ok(tx) => ActionResult::ok(
                format!(
                    "Successfully transferred {} to {}\nTransaction Hash: {}",
                    amount, tx.to, tx.hash
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
                error!("transfer handler failed: {:#}", e);
                ActionResult::failure(format!("Error: {:#}", e))
            }
        }
    }
}

pub fn transfer_action() -> Action {
    Action {
        name: "transfer",
        description: "Transfer native or ERC-20 tokens between addresses on the same chain",
        similes: &[
            "SEND_TOKENS",
            "TOKEN_TRANSFER",
            "MOVE_TOKENS",
            "SEND_ETH",
        ],
        handler: Arc::new(TransferHandler),
    }
}
