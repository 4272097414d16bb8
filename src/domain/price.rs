//! Marginal exchange rate on the curve.

use core::fmt;

use crate::error::AmmError;
use crate::math::{FixedPointArithmetic, Precision};

/// Marginal price of one bond unit (side A) expressed in side-B units.
///
/// Wraps a non-negative [`FixedPointArithmetic`].  Before maturity a
/// bond trades at a discount (`price < 1`) whenever the pool holds more
/// bonds than counter units; at maturity the price is exactly one.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::Price;
/// use bond_amm::math::{FixedPointArithmetic, Precision};
///
/// let p = Price::new(FixedPointArithmetic::from_f64(0.97)).expect("non-negative");
/// assert!(p.to_f64_lossy() < 1.0);
/// assert!(Price::new(FixedPointArithmetic::from_f64(-0.1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(FixedPointArithmetic);

impl Price {
    /// Par: one bond for one counter unit.
    pub const ONE: Self = Self(FixedPointArithmetic::new(fixed::types::I80F48::ONE));

    /// Creates a new `Price`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if the value is negative.
    pub fn new(value: FixedPointArithmetic) -> crate::error::Result<Self> {
        if value.is_negative() {
            return Err(AmmError::DomainError("price must be non-negative"));
        }
        Ok(Self(value))
    }

    /// Returns the underlying fixed-point value.
    #[must_use]
    pub const fn get(&self) -> FixedPointArithmetic {
        self.0
    }

    /// Lossy conversion for display and analytics.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        self.0.to_f64_lossy()
    }

    /// Price of one counter unit in bond units.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] for a zero price.
    pub fn inverse(&self) -> crate::error::Result<Self> {
        let inv = FixedPointArithmetic::one().checked_div(&self.0, crate::domain::Rounding::Down)?;
        Self::new(inv)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
