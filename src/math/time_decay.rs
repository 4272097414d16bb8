//! Time-decaying curve exponent and the rates it implies.
//!
//! The exponent of the power-sum curve is
//!
//! ```text
//! t = 1 − r·g,    r = max(0, maturity − now) / anchor
//! ```
//!
//! where `g` is the fee constant for the trade direction.  As maturity
//! approaches `r → 0` and `t → 1`; from maturity onwards `t` is exactly one
//! and bonds redeem 1:1.
//!
//! On the mid curve (`g = 1`) the marginal price of a bond is
//! `p = (b/a)^r`, so the annualized rate consistent with that price over
//! the remaining `anchor·r` seconds collapses to
//!
//! ```text
//! rate = (a / b)^(YEAR / anchor) − 1
//! ```
//!
//! independent of the time left.  [`reserve_a_for_rate`] is its inverse and
//! bootstraps a pool at a given rate.

use crate::domain::{Amount, FEE_CONSTANT_SCALE, FeeConstant, Rounding};
use crate::error::AmmError;

use super::Precision;

/// Seconds in a Julian year (365.25 days).
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

/// Bit width reserve ratios are normalized to.
const RATIO_BITS: u32 = 60;

/// Computes the curve exponent `t = 1 − (time_to_maturity / anchor)·g`.
///
/// Returns exactly one when `time_to_maturity` is zero.
///
/// # Errors
///
/// - [`AmmError::InvalidConfiguration`] if `anchor` is zero or the
///   resulting exponent is not strictly positive.
pub fn curve_exponent<P: Precision>(time_to_maturity: u64, anchor: u64, g: FeeConstant) -> Result<P, AmmError> {
    if anchor == 0 {
        return Err(AmmError::InvalidConfiguration("anchor must be positive"));
    }
    if time_to_maturity == 0 {
        return Ok(P::one());
    }
    let numerator = u128::from(time_to_maturity) * u128::from(g.get());
    let denominator = u128::from(anchor) * u128::from(FEE_CONSTANT_SCALE);
    let t = P::one().checked_sub(&P::from_ratio(numerator, denominator)?)?;
    if !t.is_positive() {
        return Err(AmmError::InvalidConfiguration(
            "curve exponent must be positive: maturity too far relative to anchor",
        ));
    }
    Ok(t)
}

/// Converts `numerator / denominator` of two integer reserves to `P`
/// after dropping common low bits that would overflow the backend.
fn reserve_ratio<P: Precision>(numerator: Amount, denominator: Amount) -> Result<P, AmmError> {
    if numerator.is_zero() || denominator.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    let max = numerator.get().max(denominator.get());
    let shift = (u128::BITS - max.leading_zeros()).saturating_sub(RATIO_BITS);
    P::from_u128(numerator.get() >> shift)?
        .checked_div(&P::from_u128((denominator.get() >> shift).max(1))?, Rounding::Down)
}

/// Marginal price of a bond in side-B units: `(b / a)^(1 − t)`.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
pub fn spot_price<P: Precision>(reserve_a: Amount, reserve_b: Amount, t: &P) -> Result<P, AmmError> {
    let ratio: P = reserve_ratio(reserve_b, reserve_a)?;
    ratio.pow(&P::one().checked_sub(t)?)
}

/// Implied annual rate of the mid curve: `(a / b)^(YEAR / anchor) − 1`,
/// or zero once `time_to_maturity` is zero.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::InvalidConfiguration`] if `anchor` is zero.
/// - [`AmmError::Overflow`] if the rate is not representable.
pub fn implied_annual_rate<P: Precision>(
    reserve_a: Amount,
    reserve_b: Amount,
    time_to_maturity: u64,
    anchor: u64,
) -> Result<P, AmmError> {
    if anchor == 0 {
        return Err(AmmError::InvalidConfiguration("anchor must be positive"));
    }
    if time_to_maturity == 0 {
        return Ok(P::zero());
    }
    let ratio: P = reserve_ratio(reserve_a, reserve_b)?;
    let exponent = P::from_ratio(u128::from(SECONDS_PER_YEAR), u128::from(anchor))?;
    ratio.pow(&exponent)?.checked_sub(&P::one())
}

/// Side-A amount that, paired with `amount_b`, opens a pool at `rate`:
/// `amount_b · (1 + rate)^(anchor / YEAR)`, rounded down.
///
/// # Errors
///
/// - [`AmmError::DomainError`] if `rate <= −1`.
/// - [`AmmError::InvalidConfiguration`] if `anchor` is zero.
/// - [`AmmError::Overflow`] if the result does not fit.
pub fn reserve_a_for_rate<P: Precision>(rate: &P, amount_b: Amount, anchor: u64) -> Result<Amount, AmmError> {
    if anchor == 0 {
        return Err(AmmError::InvalidConfiguration("anchor must be positive"));
    }
    let base = P::one().checked_add(rate)?;
    let exponent = P::from_ratio(u128::from(anchor), u128::from(SECONDS_PER_YEAR))?;
    let factor = base.pow(&exponent)?;

    let shift = (u128::BITS - amount_b.get().leading_zeros()).saturating_sub(RATIO_BITS);
    let scaled_b = P::from_u128_scaled(amount_b.get(), shift)?;
    scaled_b
        .checked_mul(&factor)?
        .to_u128_scaled(shift, Rounding::Down)
        .map(Amount::new)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::FixedPointArithmetic;

    type FP = FixedPointArithmetic;

    const YEAR: u64 = SECONDS_PER_YEAR;

    #[test]
    fn exponent_is_one_at_maturity() {
        assert_eq!(curve_exponent::<FP>(0, YEAR, FeeConstant::ONE), Ok(FP::one()));
    }

    #[test]
    fn exponent_half_way() {
        let Ok(t) = curve_exponent::<FP>(YEAR / 2, YEAR, FeeConstant::ONE) else {
            panic!("expected Ok");
        };
        assert_eq!(t, FP::from_f64(0.5));
    }

    #[test]
    fn exponent_applies_fee_constant() {
        let Ok(g) = FeeConstant::new(5_000) else {
            panic!("expected Ok");
        };
        let Ok(t) = curve_exponent::<FP>(YEAR, YEAR, g) else {
            panic!("expected Ok");
        };
        assert_eq!(t, FP::from_f64(0.5));
    }

    #[test]
    fn non_positive_exponent_rejected() {
        assert!(matches!(
            curve_exponent::<FP>(YEAR, YEAR, FeeConstant::ONE),
            Err(AmmError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            curve_exponent::<FP>(10, 0, FeeConstant::ONE),
            Err(AmmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn exponent_monotonic_toward_maturity() {
        let mut prev = FP::zero();
        for ttm in (0..=YEAR / 2).rev().step_by(86_400) {
            let Ok(t) = curve_exponent::<FP>(ttm, YEAR, FeeConstant::ONE) else {
                panic!("expected Ok");
            };
            assert!(t > prev);
            prev = t;
        }
    }

    #[test]
    fn rate_zero_at_maturity() {
        assert_eq!(
            implied_annual_rate::<FP>(Amount::new(120), Amount::new(100), 0, YEAR),
            Ok(FP::zero())
        );
    }

    #[test]
    fn rate_for_one_year_anchor() {
        // a/b = 1.05 with anchor = one year gives exactly 5 %.
        let Ok(r) = implied_annual_rate::<FP>(Amount::new(105_000), Amount::new(100_000), 1_000, YEAR) else {
            panic!("expected Ok");
        };
        assert!((r.to_f64_lossy() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn balanced_pool_has_zero_rate() {
        let Ok(r) = implied_annual_rate::<FP>(Amount::new(1_000), Amount::new(1_000), 500, YEAR * 10) else {
            panic!("expected Ok");
        };
        assert!(r.to_f64_lossy().abs() < 1e-12);
    }

    #[test]
    fn bootstrap_inverts_rate() {
        let anchor = YEAR * 10;
        let rate = FP::from_f64(0.07);
        let Ok(a) = reserve_a_for_rate(&rate, Amount::new(1_000_000_000), anchor) else {
            panic!("expected Ok");
        };
        let Ok(back) = implied_annual_rate::<FP>(a, Amount::new(1_000_000_000), 1, anchor) else {
            panic!("expected Ok");
        };
        assert!((back.to_f64_lossy() - 0.07).abs() < 1e-6);
    }

    #[test]
    fn bootstrap_rejects_total_loss_rate() {
        assert!(matches!(
            reserve_a_for_rate(&FP::from_f64(-1.0), Amount::new(10), YEAR),
            Err(AmmError::DomainError(_))
        ));
    }

    #[test]
    fn spot_price_par_at_maturity() {
        let Ok(p) = spot_price(Amount::new(300), Amount::new(100), &FP::one()) else {
            panic!("expected Ok");
        };
        assert_eq!(p, FP::one());
    }

    #[test]
    fn spot_price_discount_when_bonds_abundant() {
        let Ok(p) = spot_price(Amount::new(110_000), Amount::new(100_000), &FP::from_f64(0.9)) else {
            panic!("expected Ok");
        };
        assert!(p < FP::one());
        assert!((p.to_f64_lossy() - (100_000f64 / 110_000f64).powf(0.1)).abs() < 1e-9);
    }

    #[test]
    fn ratio_of_huge_reserves() {
        let big = 10u128.pow(30);
        let Ok(r) = reserve_ratio::<FP>(Amount::new(big * 2), Amount::new(big)) else {
            panic!("expected Ok");
        };
        assert!((r.to_f64_lossy() - 2.0).abs() < 1e-12);
    }
}
