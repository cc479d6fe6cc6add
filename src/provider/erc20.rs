// src/provider/erc20.rs
//! Read-only ERC-20 calls and calldata construction. Calls are issued as raw
//! `eth_call`s with hand-encoded selectors; generic over [`Middleware`] so the
//! same paths run against a mock transport in tests.

use anyhow::{anyhow, Context, Result};
use ethers::abi::{decode, encode, ParamType, Token};
use ethers::providers::Middleware;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use ethers::utils::keccak256;

fn selector(signature: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&keccak256(signature.as_bytes())[0..4]);
    sel
}

fn encode_call(signature: &str, tokens: Vec<Token>) -> Bytes {
    let mut data = selector(signature).to_vec();
    data.extend(encode(&tokens));
    Bytes::from(data)
}

async fn eth_call<M: Middleware>(client: &M, to: Address, data: Bytes) -> Result<Bytes> {
    let tx: TypedTransaction = TransactionRequest::new().to(to).data(data).into();
    client
        .call(&tx, None)
        .await
        .map_err(|e| anyhow!("eth_call failed: {}", e))
}

fn decode_u256(raw: &Bytes) -> Result<U256> {
    let tokens = decode(&[ParamType::Uint(256)], raw).context("failed to decode uint256")?;
    match tokens.first() {
        Some(Token::Uint(value)) => Ok(*value),
        _ => Err(anyhow!("unexpected eth_call return data")),
    }
}

/// `balanceOf(address)`: raw balance in the token's smallest unit.
pub async fn balance_of<M: Middleware>(client: &M, token: Address, owner: Address) -> Result<U256> {
    let data = encode_call("balanceOf(address)", vec![Token::Address(owner)]);
    let raw = eth_call(client, token, data).await?;
    decode_u256(&raw)
}

/// `decimals()`: the token's decimal exponent.
pub async fn decimals<M: Middleware>(client: &M, token: Address) -> Result<u8> {
    let data = encode_call("decimals()", vec![]);
    let raw = eth_call(client, token, data).await?;
    let value = decode_u256(&raw)?;
    if value > U256::from(u8::MAX) {
        return Err(anyhow!("token reports implausible decimals: {}", value));
    }
    Ok(value.as_u32() as u8)
}

/// Calldata for `transfer(address,uint256)`.
pub fn transfer_calldata(to: Address, amount: U256) -> Bytes {
    encode_call(
        "transfer(address,uint256)",
        vec![Token::Address(to), Token::Uint(amount)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::Provider;
    use std::str::FromStr;

    const OWNER: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
    const TOKEN: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    fn abi_word(value: u64) -> Bytes {
        Bytes::from(encode(&[Token::Uint(U256::from(value))]))
    }

    #[tokio::test]
    async fn reads_balance_and_decimals() {
        let (provider, mock) = Provider::mocked();
        let token = Address::from_str(TOKEN).unwrap();
        let owner = Address::from_str(OWNER).unwrap();

        mock.push::<Bytes, _>(abi_word(2_500_000)).unwrap();
        let balance = balance_of(&provider, token, owner).await.unwrap();
        assert_eq!(balance, U256::from(2_500_000u64));

        mock.push::<Bytes, _>(abi_word(6)).unwrap();
        assert_eq!(decimals(&provider, token).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn propagates_rpc_failures() {
        // Nothing pushed: the transport rejects every request
        let (provider, _mock) = Provider::mocked();
        let token = Address::from_str(TOKEN).unwrap();
        let owner = Address::from_str(OWNER).unwrap();

        let err = balance_of(&provider, token, owner).await.unwrap_err();
        assert!(err.to_string().contains("eth_call failed"));
    }

    #[test]
    fn transfer_calldata_starts_with_selector() {
        let to = Address::from_str(OWNER).unwrap();
        let data = transfer_calldata(to, U256::from(1u64));
        // keccak("transfer(address,uint256)")[..4] == a9059cbb
        assert_eq!(&data[0..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(data.len(), 4 + 32 + 32);
    }
}
