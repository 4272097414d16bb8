//! Annualized interest rate.

use core::fmt;

use crate::math::{FixedPointArithmetic, Precision};

/// An annualized, compounding interest rate as a fraction (`0.05` = 5 %).
///
/// Rates may be negative when the pool prices bonds above par.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::Rate;
///
/// let r = Rate::from_f64(0.05);
/// assert_eq!(r.to_string(), "5.0000%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rate(FixedPointArithmetic);

impl Rate {
    /// Zero rate, the value every pool reports at and after maturity.
    pub const ZERO: Self = Self(FixedPointArithmetic::new(fixed::types::I80F48::ZERO));

    /// Wraps a fixed-point fraction.
    #[must_use]
    pub const fn new(value: FixedPointArithmetic) -> Self {
        Self(value)
    }

    /// Creates a rate from an `f64` fraction (lossy).
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self(FixedPointArithmetic::from_f64(value))
    }

    /// Returns the underlying fraction.
    #[must_use]
    pub const fn get(&self) -> FixedPointArithmetic {
        self.0
    }

    /// Lossy conversion for display and analytics.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        self.0.to_f64_lossy()
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.0.to_f64_lossy() * 100.0)
    }
}
