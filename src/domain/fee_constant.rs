//! Direction-specific curve fee constant.

use core::fmt;

use crate::error::AmmError;
use crate::math::Precision;

/// Fixed-point scale of a [`FeeConstant`]: `10_000` represents `1.0`.
pub const FEE_CONSTANT_SCALE: u32 = 10_000;

/// Multiplier `g` applied to the time-to-maturity ratio in the curve
/// exponent `t = 1 − r·g`, stored scaled by [`FEE_CONSTANT_SCALE`].
///
/// A pool carries one constant for each trade direction.  Choosing
/// `g_buy < 1 < g_sell` (or the reverse, depending on the pool's
/// convention) widens the curve asymmetrically and produces a bid/ask
/// spread without an explicit fee transfer.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::FeeConstant;
///
/// let g = FeeConstant::new(9_500).expect("non-zero");
/// assert_eq!(g.get(), 9_500);
/// assert_eq!(g.to_string(), "0.9500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeConstant(u32);

impl FeeConstant {
    /// `g = 1.0`: the mid curve with no spread.
    pub const ONE: Self = Self(FEE_CONSTANT_SCALE);

    /// Creates a new fee constant from its scaled value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `scaled` is zero.
    pub const fn new(scaled: u32) -> crate::error::Result<Self> {
        if scaled == 0 {
            return Err(AmmError::InvalidConfiguration(
                "fee constant must be positive",
            ));
        }
        Ok(Self(scaled))
    }

    /// Returns the scaled `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Converts to the numeric backend `P` as `scaled / 10_000`.
    ///
    /// # Errors
    ///
    /// Propagates conversion errors from the backend.
    pub fn to_precision<P: Precision>(&self) -> crate::error::Result<P> {
        P::from_ratio(u128::from(self.0), u128::from(FEE_CONSTANT_SCALE))
    }
}

impl fmt::Display for FeeConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / FEE_CONSTANT_SCALE;
        let frac = self.0 % FEE_CONSTANT_SCALE;
        write!(f, "{whole}.{frac:04}")
    }
}
