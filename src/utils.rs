// src/utils.rs
//! Address parsing and token-unit conversion helpers.

use anyhow::{anyhow, Result};
use ethers::types::{Address, U256};
use ethers::utils::{format_units, parse_units, to_checksum};
use std::str::FromStr;

use crate::types::WalletError;

/// Parse a `0x`-prefixed hex address.
pub fn parse_address(input: &str) -> Result<Address, WalletError> {
    Address::from_str(input.trim()).map_err(|_| WalletError::InvalidAddress(input.to_string()))
}

/// Checksummed string form of an address.
pub fn checksum(address: &Address) -> String {
    to_checksum(address, None)
}

/// Parse a hex quantity ("0x..") into a U256. Used for values coming back
/// from the quote API.
pub fn parse_hex_u256(input: &str) -> Result<U256> {
    let s = input.trim().trim_start_matches("0x");
    if s.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(s, 16).map_err(|e| anyhow!("invalid hex quantity '{}': {}", input, e))
}

/// Format a raw token amount into human units, trimming trailing zeros so
/// 1_500_000_000_000_000_000 at 18 decimals renders as "1.5".
pub fn format_token_amount(amount: U256, decimals: u8) -> Result<String> {
    let formatted = format_units(amount, decimals as u32)
        .map_err(|e| anyhow!("failed to format token amount: {}", e))?;
    Ok(trim_decimal_zeros(&formatted))
}

/// Parse a human-unit amount string into base units.
pub fn parse_token_amount(amount: &str, decimals: u8) -> Result<U256> {
    let parsed = parse_units(amount, decimals as u32)
        .map_err(|e| anyhow!("invalid amount '{}': {}", amount, e))?;
    Ok(parsed.into())
}

fn trim_decimal_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
