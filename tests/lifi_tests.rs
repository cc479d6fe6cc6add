//! LiFi API client against a mocked HTTP server.

use mockito::{mock, server_url, Matcher};
use serde_json::json;

use evm_agent_plugin::lifi::{LifiClient, QuoteRequest};
use evm_agent_plugin::U256;

#[tokio::test]
async fn resolves_token_symbol_to_contract_address() {
    let _m = mock("GET", Matcher::Regex(r"^/token\?.*token=USDC.*$".to_string()))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                "symbol": "USDC",
                "decimals": 6,
                "chainId": 1,
                "name": "USD Coin"
            })
            .to_string(),
        )
        .create();

    let client = LifiClient::new(server_url());
    let info = client.token(1, "USDC").await.unwrap();

    assert_eq!(info.address, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    assert_eq!(info.decimals, 6);
    assert_eq!(info.chain_id, 1);
}

#[tokio::test]
async fn unknown_token_lookup_fails_with_status() {
    let _m = mock("GET", Matcher::Regex(r"^/token\?.*token=NOPE.*$".to_string()))
        .with_status(404)
        .with_body("token not found")
        .create();

    let client = LifiClient::new(server_url());
    let err = client.token(1, "NOPE").await.unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("token lookup failed"));
    assert!(message.contains("token not found"));
}

#[tokio::test]
async fn quote_returns_signable_transaction() {
    let _m = mock(
        "GET",
        Matcher::Regex(r"^/quote\?.*fromChain=1.*toChain=10.*$".to_string()),
    )
    .with_header("content-type", "application/json")
    .with_body(
        json!({
            "transactionRequest": {
                "to": "0x1231DEB6f5749EF6cE6943a275A1D3E7486F4EaE",
                "data": "0xdeadbeef",
                "value": "0x0de0b6b3a7640000",
                "gasLimit": "0x5208"
            },
            "estimate": {
                "toAmount": "995000",
                "toAmountMin": "990000"
            }
        })
        .to_string(),
    )
    .create();

    let client = LifiClient::new(server_url());
    let quote = client
        .quote(&QuoteRequest {
            from_chain: 1,
            to_chain: 10,
            from_token: "0x0000000000000000000000000000000000000000".to_string(),
            to_token: "0x0000000000000000000000000000000000000000".to_string(),
            from_amount: U256::from(1_000_000u64),
            from_address: "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23".to_string(),
            to_address: None,
            slippage: Some(0.005),
        })
        .await
        .unwrap();

    let tx = quote.transaction_request.to_transaction_request().unwrap();
    assert_eq!(
        tx.value.unwrap().to_string(),
        "1000000000000000000"
    );
    assert_eq!(quote.estimate.unwrap().to_amount.as_deref(), Some("995000"));
}
