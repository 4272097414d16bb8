//! Core trait abstractions for pool operations.
//!
//! This module defines the traits pools implement and consume:
//! [`SwapPool`] for executing swaps, [`LiquidityPool`] for share
//! issuance, [`FromConfig`] for configuration-driven construction, and
//! [`AssetLedger`] for the host-side balances a pool settles against.

mod asset_ledger;
mod from_config;
mod liquidity_pool;
mod swap_pool;

pub use asset_ledger::{AssetLedger, Transfer, check_payers, execute_transfers};
pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
