//! Liquidity management trait extending [`SwapPool`].
//!
//! [`LiquidityPool`] adds proportional share issuance and redemption on
//! top of the swap functionality provided by [`SwapPool`].
//!
//! # Share Accounting Invariant
//!
//! ```text
//! total_supply = Σ share_balance(account)   for all accounts
//! ```
//!
//! Supply only changes through [`first_deposit`](LiquidityPool::first_deposit),
//! [`deposit`](LiquidityPool::deposit) and
//! [`withdraw`](LiquidityPool::withdraw).  Swaps never alter it.
//!
//! # Non-dilution
//!
//! Deposits and withdrawals preserve `reserve_a / reserve_b` up to
//! rounding, and rounding always favors the pool, so the redeemable value
//! of an existing share never decreases through another account's
//! deposit or withdrawal.

use super::{AssetLedger, SwapPool};
use crate::domain::{Address, Amount, AssetAmounts, Shares, Timestamp};
use crate::error::AmmError;

/// Proportional liquidity provision.
pub trait LiquidityPool: SwapPool {
    /// Seeds an empty pool with both reserves and mints `amount_a` shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyInitialized`] if the pool has reserves.
    /// - [`AmmError::InvalidQuantity`] if either amount is zero.
    fn first_deposit<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        amount_a: Amount,
        amount_b: Amount,
        now: Timestamp,
    ) -> Result<Shares, AmmError>;

    /// Deposits at the current reserve ratio, bounded by `max_a`/`max_b`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if side B required exceeds `max_b`.
    /// - [`AmmError::InvalidQuantity`] if no shares would be minted.
    fn deposit<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        max_a: Amount,
        max_b: Amount,
        now: Timestamp,
    ) -> Result<Shares, AmmError>;

    /// Burns `shares` and pays out the proportional reserves.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `provider` holds fewer
    /// shares.
    fn withdraw<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        shares: Shares,
        now: Timestamp,
    ) -> Result<AssetAmounts, AmmError>;

    /// Returns the total share supply.
    #[must_use]
    fn total_supply(&self) -> Shares;

    /// Returns `account`'s share balance.
    #[must_use]
    fn share_balance(&self, account: &Address) -> Shares;
}
