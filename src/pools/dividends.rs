//! Checkpointed dividend accounting for share holders.
//!
//! Assets that accrue to a pool's account outside of its reserves (yield,
//! donations) are harvested into a checkpoint log.  Each checkpoint
//! stores the cumulative harvested amounts per side and the share supply
//! at harvest time; an account is entitled to
//!
//! ```text
//! Σ (cum[i] − cum[i−1]) · balance / supply[i]    for i in (last_claimed, latest]
//! ```
//!
//! rounded down per checkpoint.  Every change to an account's share
//! balance must be preceded by [`DividendLedger::settle`], so the balance
//! used above is the one held throughout the range.  Index 0 is a zero
//! genesis checkpoint; accounts that never settled start there.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::{Address, AssetAmounts, Rounding, Shares, Side};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// A harvest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendCheckpoint {
    cumulative: AssetAmounts,
    supply: Shares,
}

impl DividendCheckpoint {
    /// Total harvested per side up to and including this checkpoint.
    #[must_use]
    pub const fn cumulative(&self) -> AssetAmounts {
        self.cumulative
    }

    /// Share supply when the harvest happened.
    #[must_use]
    pub const fn supply(&self) -> Shares {
        self.supply
    }
}

/// Checkpoint log plus per-account claim cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendLedger {
    checkpoints: Vec<DividendCheckpoint>,
    #[cfg_attr(feature = "serde", serde(with = "super::serde_pairs"))]
    last_claimed: HashMap<Address, usize>,
    /// Harvested but not yet paid out; still held by the pool.
    unclaimed: AssetAmounts,
}

impl Default for DividendLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl DividendLedger {
    /// Creates a ledger holding only the genesis checkpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checkpoints: vec![DividendCheckpoint {
                cumulative: AssetAmounts::ZERO,
                supply: Shares::ZERO,
            }],
            last_claimed: HashMap::new(),
            unclaimed: AssetAmounts::ZERO,
        }
    }

    /// All checkpoints, genesis first.
    #[must_use]
    pub fn checkpoints(&self) -> &[DividendCheckpoint] {
        &self.checkpoints
    }

    fn latest_index(&self) -> usize {
        self.checkpoints.len() - 1
    }

    /// Amounts harvested but not yet paid to holders.
    #[must_use]
    pub const fn unclaimed(&self) -> AssetAmounts {
        self.unclaimed
    }

    /// Index of the last checkpoint `account` has been settled through.
    #[must_use]
    pub fn last_claimed(&self, account: &Address) -> usize {
        self.last_claimed.get(account).copied().unwrap_or(0)
    }

    /// Excess of `held` over reserves and unclaimed dividends, floored at
    /// zero per side.
    #[must_use]
    pub fn harvestable(&self, held: AssetAmounts, reserves: AssetAmounts) -> AssetAmounts {
        let excess = |side: Side| {
            held.get(side)
                .saturating_sub(&reserves.get(side))
                .saturating_sub(&self.unclaimed.get(side))
        };
        AssetAmounts::new(excess(Side::A), excess(Side::B))
    }

    /// Appends a checkpoint for `harvested` at the current `supply`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NothingToHarvest`] if `harvested` is zero on both
    ///   sides.
    /// - [`AmmError::NotInitialized`] if `supply` is zero.
    /// - [`AmmError::Overflow`] if a cumulative overflows.
    pub fn record_harvest(&mut self, harvested: AssetAmounts, supply: Shares) -> Result<usize, AmmError> {
        if harvested.is_zero() {
            return Err(AmmError::NothingToHarvest);
        }
        if supply.is_zero() {
            return Err(AmmError::NotInitialized);
        }
        let previous = self.checkpoints[self.latest_index()].cumulative;
        let cumulative = add_amounts(previous, harvested)?;
        let unclaimed = add_amounts(self.unclaimed, harvested)?;
        self.checkpoints.push(DividendCheckpoint { cumulative, supply });
        self.unclaimed = unclaimed;
        let index = self.latest_index();
        info!(index, harvested = %harvested, supply = %supply, "dividend checkpoint recorded");
        Ok(index)
    }

    /// Dividends owed to `account` holding `balance` shares since its last
    /// settlement.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a payout does not fit.
    pub fn pending(&self, account: &Address, balance: Shares) -> Result<AssetAmounts, AmmError> {
        let from = self.last_claimed(account);
        if balance.is_zero() || from >= self.latest_index() {
            return Ok(AssetAmounts::ZERO);
        }
        let mut owed = AssetAmounts::ZERO;
        for window in self.checkpoints[from..].windows(2) {
            let (previous, current) = (window[0], window[1]);
            for side in Side::BOTH {
                let delta = current
                    .cumulative
                    .get(side)
                    .saturating_sub(&previous.cumulative.get(side));
                let share = delta.safe_mul_div(balance.get(), current.supply.get(), Rounding::Down)?;
                let slot = owed.get_mut(side);
                *slot = slot.safe_add(&share)?;
            }
        }
        Ok(owed)
    }

    /// Settles `account` through the latest checkpoint and returns the
    /// payout.  The caller transfers it out of the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if a payout does not fit.
    /// - [`AmmError::Underflow`] if the payout exceeds unclaimed funds.
    pub fn settle(&mut self, account: &Address, balance: Shares) -> Result<AssetAmounts, AmmError> {
        let payout = self.pending(account, balance)?;
        self.unclaimed = AssetAmounts::new(
            self.unclaimed.a.safe_sub(&payout.a)?,
            self.unclaimed.b.safe_sub(&payout.b)?,
        );
        self.last_claimed.insert(*account, self.latest_index());
        if !payout.is_zero() {
            debug!(account = %account, payout = %payout, "dividends settled");
        }
        Ok(payout)
    }
}

fn add_amounts(lhs: AssetAmounts, rhs: AssetAmounts) -> Result<AssetAmounts, AmmError> {
    Ok(AssetAmounts::new(lhs.a.safe_add(&rhs.a)?, lhs.b.safe_add(&rhs.b)?))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Amount;

    const ALICE: Address = Address::from_byte(0xA1);
    const BOB: Address = Address::from_byte(0xB0);
    const CAROL: Address = Address::from_byte(0xC0);

    fn amounts(a: u128, b: u128) -> AssetAmounts {
        AssetAmounts::new(Amount::new(a), Amount::new(b))
    }

    #[test]
    fn starts_with_genesis() {
        let ledger = DividendLedger::new();
        assert_eq!(ledger.checkpoints().len(), 1);
        assert!(ledger.checkpoints()[0].cumulative().is_zero());
        assert_eq!(ledger.last_claimed(&ALICE), 0);
    }

    #[test]
    fn harvestable_excludes_reserves_and_unclaimed() {
        let mut ledger = DividendLedger::new();
        assert_eq!(
            ledger.harvestable(amounts(1_000, 1_100), amounts(1_000, 1_000)),
            amounts(0, 100)
        );
        assert!(ledger.record_harvest(amounts(0, 100), Shares::new(10)).is_ok());
        assert!(
            ledger
                .harvestable(amounts(1_000, 1_100), amounts(1_000, 1_000))
                .is_zero()
        );
        // held below reserves floors at zero
        assert!(ledger.harvestable(amounts(5, 5), amounts(10, 10)).is_zero());
    }

    #[test]
    fn empty_harvest_rejected() {
        let mut ledger = DividendLedger::new();
        assert_eq!(
            ledger.record_harvest(AssetAmounts::ZERO, Shares::new(1)),
            Err(AmmError::NothingToHarvest)
        );
        assert_eq!(
            ledger.record_harvest(amounts(1, 0), Shares::ZERO),
            Err(AmmError::NotInitialized)
        );
    }

    #[test]
    fn pro_rata_payout() {
        let mut ledger = DividendLedger::new();
        assert!(ledger.record_harvest(amounts(0, 100), Shares::new(1_000)).is_ok());
        let Ok(alice) = ledger.settle(&ALICE, Shares::new(300)) else {
            panic!("settle alice");
        };
        let Ok(bob) = ledger.settle(&BOB, Shares::new(700)) else {
            panic!("settle bob");
        };
        assert_eq!(alice, amounts(0, 30));
        assert_eq!(bob, amounts(0, 70));
        assert!(ledger.unclaimed().is_zero());
    }

    #[test]
    fn settle_is_idempotent() {
        let mut ledger = DividendLedger::new();
        assert!(ledger.record_harvest(amounts(50, 0), Shares::new(100)).is_ok());
        assert_eq!(ledger.settle(&ALICE, Shares::new(100)), Ok(amounts(50, 0)));
        assert_eq!(ledger.settle(&ALICE, Shares::new(100)), Ok(AssetAmounts::ZERO));
    }

    #[test]
    fn late_holder_gets_nothing_from_earlier_harvests() {
        let mut ledger = DividendLedger::new();
        assert!(ledger.record_harvest(amounts(0, 100), Shares::new(1_000)).is_ok());
        // carol settles with a zero balance before acquiring shares
        assert_eq!(ledger.settle(&CAROL, Shares::ZERO), Ok(AssetAmounts::ZERO));
        assert_eq!(ledger.pending(&CAROL, Shares::new(500)), Ok(AssetAmounts::ZERO));
    }

    #[test]
    fn uses_supply_at_each_checkpoint() {
        let mut ledger = DividendLedger::new();
        assert!(ledger.record_harvest(amounts(0, 100), Shares::new(1_000)).is_ok());
        assert!(ledger.record_harvest(amounts(0, 100), Shares::new(500)).is_ok());
        // 100·100/1000 + 100·100/500
        assert_eq!(ledger.pending(&ALICE, Shares::new(100)), Ok(amounts(0, 30)));
    }

    #[test]
    fn rounding_dust_stays_unclaimed() {
        let mut ledger = DividendLedger::new();
        assert!(ledger.record_harvest(amounts(10, 0), Shares::new(3)).is_ok());
        let mut paid = 0;
        for who in [ALICE, BOB, CAROL] {
            let Ok(p) = ledger.settle(&who, Shares::new(1)) else {
                panic!("settle");
            };
            paid += p.a.get();
        }
        assert_eq!(paid, 9);
        assert_eq!(ledger.unclaimed(), amounts(1, 0));
    }
}
