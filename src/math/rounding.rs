//! Rounding helpers for integer proportional math.
//!
//! [`mul_div`] computes `value × numerator / denominator` with a 256-bit
//! intermediate and an explicit [`Rounding`] direction.  It is the building
//! block behind every share and dividend computation: the product of two
//! reserve-sized `u128` values routinely exceeds `u128` for 18-decimal
//! assets.
//!
//! # Convention
//!
//! **Always round against the user** (pool-favorable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Shares minted, amounts paid out, dividends | [`Rounding::Down`] |
//! | Amounts charged to a depositor or trader | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use bond_amm::domain::Rounding;
//! use bond_amm::math::mul_div;
//!
//! assert_eq!(mul_div(10, 1, 3, Rounding::Down), Some(3));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Some(4));
//! assert_eq!(mul_div(10, 1, 0, Rounding::Down), None);
//! ```

use ethnum::U256;

use crate::domain::Rounding;

/// Computes `value × numerator / denominator` without intermediate
/// overflow.
///
/// Returns [`None`] if `denominator` is zero or the quotient does not fit
/// in `u128`.
#[must_use]
pub fn mul_div(value: u128, numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = U256::from(value) * U256::from(numerator);
    let d = U256::from(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && quotient * d != product {
        quotient += U256::ONE;
    }
    let (high, low) = quotient.into_words();
    if high != 0 {
        return None;
    }
    Some(low)
}
