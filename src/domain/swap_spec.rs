//! Swap operation specification.

use core::fmt;

use super::{Amount, Side};
use crate::error::AmmError;

/// Specifies a swap: which side is fixed, its amount, and the caller's
/// slippage bound on the other side.
///
/// Construct through [`exact_in`](Self::exact_in) or
/// [`exact_out`](Self::exact_out), which reject zero amounts.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::{Amount, Side, SwapSpec};
///
/// // Sell 1 000 bonds, accept no less than 950 underlying back.
/// let spec = SwapSpec::exact_in(Side::A, Amount::new(1_000), Amount::new(950))
///     .expect("non-zero amount");
/// assert_eq!(spec.side_in(), Side::A);
/// assert_eq!(spec.side_out(), Side::B);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapSpec {
    /// Pay exactly `amount_in` of `side_in`; receive at least
    /// `min_amount_out` of the other side.
    ExactIn {
        /// Side the trader pays into the pool.
        side_in: Side,
        /// Exact amount paid.
        amount_in: Amount,
        /// Smallest acceptable output.
        min_amount_out: Amount,
    },
    /// Receive exactly `amount_out` of `side_out`; pay at most
    /// `max_amount_in` of the other side.
    ExactOut {
        /// Side the trader receives from the pool.
        side_out: Side,
        /// Exact amount received.
        amount_out: Amount,
        /// Largest acceptable input.
        max_amount_in: Amount,
    },
}

impl SwapSpec {
    /// Creates an exact-input swap specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `amount_in` is zero.
    pub const fn exact_in(side_in: Side, amount_in: Amount, min_amount_out: Amount) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        Ok(Self::ExactIn {
            side_in,
            amount_in,
            min_amount_out,
        })
    }

    /// Creates an exact-output swap specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `amount_out` is zero.
    pub const fn exact_out(side_out: Side, amount_out: Amount, max_amount_in: Amount) -> crate::error::Result<Self> {
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        Ok(Self::ExactOut {
            side_out,
            amount_out,
            max_amount_in,
        })
    }

    /// Returns the side paid into the pool.
    #[must_use]
    pub const fn side_in(&self) -> Side {
        match self {
            Self::ExactIn { side_in, .. } => *side_in,
            Self::ExactOut { side_out, .. } => side_out.other(),
        }
    }

    /// Returns the side paid out of the pool.
    #[must_use]
    pub const fn side_out(&self) -> Side {
        self.side_in().other()
    }

    /// Returns `true` for [`SwapSpec::ExactIn`].
    #[must_use]
    pub const fn is_exact_in(&self) -> bool {
        matches!(self, Self::ExactIn { .. })
    }

    /// Returns the fixed amount of the swap.
    pub const fn amount(&self) -> Amount {
        match self {
            Self::ExactIn { amount_in, .. } => *amount_in,
            Self::ExactOut { amount_out, .. } => *amount_out,
        }
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn {
                side_in,
                amount_in,
                min_amount_out,
            } => write!(f, "ExactIn({amount_in} {side_in}, min_out={min_amount_out})"),
            Self::ExactOut {
                side_out,
                amount_out,
                max_amount_in,
            } => write!(f, "ExactOut({amount_out} {side_out}, max_in={max_amount_in})"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn exact_in_valid() {
        let Ok(spec) = SwapSpec::exact_in(Side::B, Amount::new(100), Amount::ZERO) else {
            panic!("expected Ok");
        };
        assert!(spec.is_exact_in());
        assert_eq!(spec.amount(), Amount::new(100));
        assert_eq!(spec.side_out(), Side::A);
    }

    #[test]
    fn exact_out_sides() {
        let Ok(spec) = SwapSpec::exact_out(Side::A, Amount::new(5), Amount::MAX) else {
            panic!("expected Ok");
        };
        assert!(!spec.is_exact_in());
        assert_eq!(spec.side_in(), Side::B);
        assert_eq!(spec.side_out(), Side::A);
    }

    #[test]
    fn zero_rejected() {
        assert!(SwapSpec::exact_in(Side::A, Amount::ZERO, Amount::ZERO).is_err());
        assert!(SwapSpec::exact_out(Side::A, Amount::ZERO, Amount::MAX).is_err());
    }

    #[test]
    fn display() {
        let Ok(spec) = SwapSpec::exact_in(Side::A, Amount::new(10), Amount::new(9)) else {
            panic!("expected Ok");
        };
        assert_eq!(spec.to_string(), "ExactIn(10 A, min_out=9)");
    }
}
