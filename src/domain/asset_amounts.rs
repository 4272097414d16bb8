//! A pair of per-side amounts.

use core::fmt;

use super::{Amount, Side};

/// One [`Amount`] for each side of a pool.
///
/// Used for reserves, withdrawals, harvest results and dividend payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetAmounts {
    /// Side A (bond) amount.
    pub a: Amount,
    /// Side B (counter asset) amount.
    pub b: Amount,
}

impl AssetAmounts {
    /// Both sides zero.
    pub const ZERO: Self = Self {
        a: Amount::ZERO,
        b: Amount::ZERO,
    };

    /// Creates a new pair of amounts.
    pub const fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    /// Returns the amount on `side`.
    pub const fn get(&self, side: Side) -> Amount {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// Returns a mutable reference to the amount on `side`.
    pub fn get_mut(&mut self, side: Side) -> &mut Amount {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Returns `true` if both sides are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }
}

impl fmt::Display for AssetAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(A={}, B={})", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_access() {
        let mut v = AssetAmounts::new(Amount::new(1), Amount::new(2));
        assert_eq!(v.get(Side::B), Amount::new(2));
        *v.get_mut(Side::A) = Amount::new(7);
        assert_eq!(v.a, Amount::new(7));
        assert!(!v.is_zero());
        assert!(AssetAmounts::ZERO.is_zero());
    }
}
