//! In-memory [`AssetLedger`] for simulation and tests.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::traits::AssetLedger;

/// A `HashMap`-backed ledger of `(asset, account) → balance`.
///
/// Anything can be minted into existence, which makes it suitable for
/// simulations and for modelling yield that accrues to a pool by
/// crediting the pool's account directly.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::{Address, Amount};
/// use bond_amm::ledger::InMemoryLedger;
/// use bond_amm::traits::AssetLedger;
///
/// let usdc = Address::from_byte(1);
/// let alice = Address::from_byte(0xA1);
/// let bob = Address::from_byte(0xB0);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&usdc, &alice, Amount::new(100)).expect("no overflow");
/// ledger.transfer(&usdc, &alice, &bob, Amount::new(40)).expect("funded");
/// assert_eq!(ledger.balance_of(&usdc, &bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(Address, Address), Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn mint(&mut self, asset: &Address, account: &Address, amount: Amount) -> Result<(), AmmError> {
        let entry = self.balances.entry((*asset, *account)).or_default();
        *entry = entry
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("ledger mint overflow"))?;
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, asset: &Address, account: &Address) -> Amount {
        self.balances
            .get(&(*asset, *account))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, asset: &Address, from: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        let from_balance = self.balance_of(asset, from);
        let remaining = from_balance
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("ledger transfer overflow"))?;
        self.balances.insert((*asset, *from), remaining);
        self.balances.insert((*asset, *to), credited);
        Ok(())
    }
}
