//! Fungible liquidity-share balances and allowances.
//!
//! [`ShareLedger`] is pure bookkeeping.  It knows nothing about dividends
//! or reserves; the pool settles dividends before calling any method that
//! changes a balance.

use std::collections::HashMap;

use crate::domain::{Address, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Share balances, spender allowances and total supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShareLedger {
    #[cfg_attr(feature = "serde", serde(with = "super::serde_pairs"))]
    balances: HashMap<Address, Shares>,
    #[cfg_attr(feature = "serde", serde(with = "super::serde_pairs"))]
    allowances: HashMap<(Address, Address), Shares>,
    total_supply: Shares,
}

impl ShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all balances.
    #[must_use]
    pub const fn total_supply(&self) -> Shares {
        self.total_supply
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Shares {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Shares `spender` may still move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Creates `amount` shares for `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if supply would exceed `u128`.
    pub fn mint(&mut self, account: &Address, amount: Shares) -> Result<(), AmmError> {
        let total_supply = self.total_supply.safe_add(&amount)?;
        // balance <= supply, so this cannot overflow once supply fits
        let balance = self
            .balance_of(account)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("share balance"))?;
        self.total_supply = total_supply;
        self.balances.insert(*account, balance);
        Ok(())
    }

    /// Destroys `amount` of `account`'s shares.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `account` holds fewer.
    pub fn burn(&mut self, account: &Address, amount: Shares) -> Result<(), AmmError> {
        let balance = self
            .balance_of(account)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let total_supply = self.total_supply.safe_sub(&amount)?;
        self.set_balance(account, balance);
        self.total_supply = total_supply;
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds fewer.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Shares) -> Result<(), AmmError> {
        let debited = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("share balance"))?;
        self.set_balance(from, debited);
        self.set_balance(to, credited);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Shares) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    /// Reduces `spender`'s allowance over `owner`'s shares by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientAllowance`] if the allowance is
    /// smaller than `amount`.
    pub fn spend_allowance(&mut self, owner: &Address, spender: &Address, amount: Shares) -> Result<(), AmmError> {
        let remaining = self
            .allowance(owner, spender)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientAllowance)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, account: &Address, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, balance);
        }
    }
}
