// src/provider/mod.rs

pub mod erc20;
pub mod wallet;
pub mod wallet_info;

pub use wallet::WalletProvider;
pub use wallet_info::WalletInfoProvider;
