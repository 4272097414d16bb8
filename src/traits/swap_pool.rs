//! Core swap pool trait for executing swaps and querying pool state.
//!
//! [`SwapPool`] covers the full lifecycle of a swap:
//!
//! 1. **Quote**: [`SwapPool::quote`] prices a [`SwapSpec`] without
//!    mutating anything.
//! 2. **Execute**: [`SwapPool::swap`] prices, checks slippage and
//!    balances, commits reserves, then moves assets on the ledger.
//! 3. **Inspect**: [`SwapPool::spot_price`], [`SwapPool::token_pair`]
//!    and [`SwapPool::reserves`].
//!
//! # Time Dependence
//!
//! The curve exponent is a function of time to maturity, so every
//! pricing method takes `now` and re-derives it; nothing is cached across
//! calls.
//!
//! # Slippage Invariant
//!
//! `swap` must fail with [`AmmError::SlippageExceeded`] instead of
//! executing when the priced amount violates the bound carried in the
//! [`SwapSpec`], and must leave all state untouched in that case.

use super::AssetLedger;
use crate::domain::{Address, AssetAmounts, Price, SwapResult, SwapSpec, Timestamp, TokenPair};
use crate::error::AmmError;

/// Swap execution and pricing over two reserves.
pub trait SwapPool {
    /// Executes a swap for `trader`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if the bound in `spec` is violated.
    /// - [`AmmError::InsufficientLiquidity`] if the curve cannot support
    ///   the trade.
    /// - [`AmmError::InsufficientBalance`] if the trader cannot pay.
    fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        trader: &Address,
        spec: SwapSpec,
        now: Timestamp,
    ) -> Result<SwapResult, AmmError>;

    /// Prices `spec` against current reserves without executing it.
    ///
    /// Slippage bounds are not enforced by quotes.
    ///
    /// # Errors
    ///
    /// Same pricing errors as [`swap`](SwapPool::swap).
    fn quote(&self, spec: SwapSpec, now: Timestamp) -> Result<SwapResult, AmmError>;

    /// Marginal price of side A in side-B units at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::NotInitialized`] for an empty pool.
    fn spot_price(&self, now: Timestamp) -> Result<Price, AmmError>;

    /// Returns the asset pair managed by the pool.
    #[must_use]
    fn token_pair(&self) -> &TokenPair;

    /// Returns the current reserves.
    #[must_use]
    fn reserves(&self) -> AssetAmounts;
}
