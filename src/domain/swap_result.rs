//! Outcome of a swap operation.

use core::fmt;

use super::{Amount, Side};
use crate::error::AmmError;
use crate::math::{FixedPointArithmetic, Precision};

/// Result of a quoted or executed swap.
///
/// Records the amounts on both sides and the curve exponent that priced
/// the trade, so callers can reconstruct the invariant the pool held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    side_in: Side,
    amount_in: Amount,
    amount_out: Amount,
    exponent: FixedPointArithmetic,
}

impl SwapResult {
    /// Creates a new `SwapResult`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if either amount is zero.
    pub const fn new(
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
        exponent: FixedPointArithmetic,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("trade too small"));
        }
        Ok(Self {
            side_in,
            amount_in,
            amount_out,
            exponent,
        })
    }

    /// Side paid into the pool.
    #[must_use]
    pub const fn side_in(&self) -> Side {
        self.side_in
    }

    /// Side paid out of the pool.
    #[must_use]
    pub const fn side_out(&self) -> Side {
        self.side_in.other()
    }

    /// Amount paid into the pool.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount paid out of the pool.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Curve exponent `t` used to price the trade.
    #[must_use]
    pub const fn exponent(&self) -> FixedPointArithmetic {
        self.exponent
    }

    /// Average execution price as `amount_out / amount_in` (lossy).
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.amount_out.get() as f64 / self.amount_in.get() as f64;
        ratio
    }

    /// Returns `true` when the trade was priced on the linear
    /// post-maturity curve.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.exponent == FixedPointArithmetic::one()
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={} {}, out={} {}, t={})",
            self.amount_in,
            self.side_in,
            self.amount_out,
            self.side_out(),
            self.exponent
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_result() {
        let Ok(r) = SwapResult::new(
            Side::A,
            Amount::new(1_000),
            Amount::new(990),
            FixedPointArithmetic::from_f64(0.5),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(r.side_out(), Side::B);
        assert!((r.effective_price() - 0.99).abs() < 1e-12);
        assert!(!r.is_linear());
    }

    #[test]
    fn zero_output_is_too_small() {
        assert_eq!(
            SwapResult::new(Side::A, Amount::new(1), Amount::ZERO, FixedPointArithmetic::one()),
            Err(AmmError::InvalidQuantity("trade too small"))
        );
    }

    #[test]
    fn linear_flag() {
        let Ok(r) = SwapResult::new(Side::B, Amount::new(5), Amount::new(5), FixedPointArithmetic::one()) else {
            panic!("expected Ok");
        };
        assert!(r.is_linear());
    }
}
