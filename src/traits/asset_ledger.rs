//! External asset ledger consumed by pools.
//!
//! The engine never holds balances of the traded assets itself.  The
//! execution host exposes them through [`AssetLedger`], and pools emit a
//! list of [`Transfer`]s that are executed only after the pool's own
//! state has been committed.
//!
//! # Ordering Contract
//!
//! 1. Compute the complete outcome of the call.
//! 2. Check every payer's balance through [`AssetLedger::balance_of`].
//! 3. Commit pool state.
//! 4. Execute the transfers with [`execute_transfers`].
//!
//! A ledger that fails in step 4 after a successful balance check breaks
//! the host's own contract; the error is surfaced as
//! [`AmmError::LedgerRejected`].

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// Balance view and transfer capability for fungible assets.
pub trait AssetLedger {
    /// Returns `account`'s balance of `asset`.
    #[must_use]
    fn balance_of(&self, asset: &Address, account: &Address) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`, or [`AmmError::LedgerRejected`] for host-specific
    /// failures.
    fn transfer(&mut self, asset: &Address, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError>;
}

/// A single asset movement produced by a pool operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    /// Asset moved.
    pub asset: Address,
    /// Payer.
    pub from: Address,
    /// Payee.
    pub to: Address,
    /// Amount moved.
    pub amount: Amount,
}

impl Transfer {
    /// Creates a new transfer.
    pub const fn new(asset: Address, from: Address, to: Address, amount: Amount) -> Self {
        Self {
            asset,
            from,
            to,
            amount,
        }
    }
}

/// Verifies that every payer in `transfers` can cover what it owes.
///
/// Amounts owed by the same payer in the same asset are summed.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientBalance`] if any payer falls short.
pub fn check_payers<L: AssetLedger + ?Sized>(ledger: &L, transfers: &[Transfer]) -> Result<(), AmmError> {
    for (i, t) in transfers.iter().enumerate() {
        // only check the first occurrence of each (asset, payer)
        if transfers[..i]
            .iter()
            .any(|p| p.asset == t.asset && p.from == t.from)
        {
            continue;
        }
        let mut owed = Amount::ZERO;
        for same in transfers
            .iter()
            .filter(|p| p.asset == t.asset && p.from == t.from)
        {
            owed = owed
                .checked_add(&same.amount)
                .ok_or(AmmError::Overflow("transfer total overflow"))?;
        }
        if ledger.balance_of(&t.asset, &t.from) < owed {
            return Err(AmmError::InsufficientBalance);
        }
    }
    Ok(())
}

/// Executes `transfers` in order, skipping zero amounts.
///
/// # Errors
///
/// Returns [`AmmError::LedgerRejected`] if the ledger refuses a transfer.
pub fn execute_transfers<L: AssetLedger + ?Sized>(ledger: &mut L, transfers: &[Transfer]) -> Result<(), AmmError> {
    for t in transfers.iter().filter(|t| !t.amount.is_zero()) {
        ledger
            .transfer(&t.asset, &t.from, &t.to, t.amount)
            .map_err(|_| AmmError::LedgerRejected("transfer failed after state commit"))?;
    }
    Ok(())
}
