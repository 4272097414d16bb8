//! Raw asset amount with checked arithmetic.

use core::fmt;

use super::Rounding;
use crate::math::mul_div;

/// A raw asset amount in the asset's smallest unit.
///
/// `Amount` never interprets decimals; the execution host owns that.
/// Arithmetic methods are checked and return `None` on overflow,
/// underflow, or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::{Amount, Rounding};
///
/// let reserve = Amount::new(1_000);
/// let share = reserve.checked_mul_div(3, 7, Rounding::Down);
/// assert_eq!(share, Some(Amount::new(428)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Computes `self × numerator / denominator` with a 256-bit
    /// intermediate product and an explicit rounding direction.
    ///
    /// Returns `None` if `denominator` is zero or the quotient does not
    /// fit in `u128`.
    #[must_use]
    pub fn checked_mul_div(&self, numerator: u128, denominator: u128, rounding: Rounding) -> Option<Self> {
        mul_div(self.0, numerator, denominator, rounding).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Amount::new(42).get(), 42);
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn add_and_sub() {
        let a = Amount::new(300);
        let b = Amount::new(100);
        assert_eq!(a.checked_add(&b), Some(Amount::new(400)));
        assert_eq!(a.checked_sub(&b), Some(Amount::new(200)));
        assert_eq!(b.checked_sub(&a), None);
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn saturating_sub_clamps() {
        assert_eq!(Amount::new(5).saturating_sub(&Amount::new(9)), Amount::ZERO);
        assert_eq!(Amount::new(9).saturating_sub(&Amount::new(5)), Amount::new(4));
    }

    #[test]
    fn mul_div_rounds_both_ways() {
        let a = Amount::new(10);
        assert_eq!(a.checked_mul_div(1, 3, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(a.checked_mul_div(1, 3, Rounding::Up), Some(Amount::new(4)));
        assert_eq!(a.checked_mul_div(3, 3, Rounding::Up), Some(Amount::new(10)));
    }

    #[test]
    fn mul_div_by_zero() {
        assert_eq!(Amount::new(10).checked_mul_div(1, 0, Rounding::Down), None);
    }

    #[test]
    fn mul_div_wide_intermediate() {
        // 1e30 * 1e30 overflows u128 but the quotient fits.
        let big = 1_000_000_000_000_000_000_000_000_000_000u128;
        let r = Amount::new(big).checked_mul_div(big, big, Rounding::Down);
        assert_eq!(r, Some(Amount::new(big)));
    }

    #[test]
    fn mul_div_quotient_overflow() {
        assert_eq!(Amount::MAX.checked_mul_div(2, 1, Rounding::Down), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Amount::new(1_000_000)), "1000000");
    }
}
