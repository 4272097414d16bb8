//! Constant power-sum invariant solver.
//!
//! A pool holds `a^t + b^t = K` constant across every trade, where `a` and
//! `b` are the two reserves and `t ∈ (0, 1]` is the curve exponent for the
//! trade's direction (see [`time_decay`](super::time_decay)).  With `t = 1`
//! the curve is the straight line `a + b = K` and trades clear 1:1.
//!
//! The functions here come in two layers:
//!
//! - [`implied_k`] and [`reserve_change`] work directly in a numeric
//!   backend `P` and are what the invariant properties are stated over.
//! - [`amount_out_for_exact_in`] and [`amount_in_for_exact_out`] wrap them
//!   for integer reserves.  Inputs are normalized by a power of two so the
//!   largest reserve sits near `2^40`, which keeps `a^t`, `K` and the
//!   inverse power comfortably inside the fixed-point range while the
//!   scaling itself is exact.  The solved counter reserve is padded by
//!   the `pow` error bound plus one unit before it is used, so the series
//!   error, which scales with the reserve and not with the shift, always
//!   lands in the pool's favor.  The linear curve is exact and unpadded.

use crate::domain::{Amount, Rounding};
use crate::error::AmmError;

use super::Precision;

/// Target bit width of the largest normalized reserve.
const NORMALIZED_BITS: u32 = 40;

/// Relative padding `2^-30 ≈ 9.3e-10` applied to a solved counter
/// reserve; covers the documented `pow` error bound.
const PAD_BITS: u32 = 30;

/// Computes the invariant `K = a^t + b^t`.
///
/// # Errors
///
/// - [`AmmError::DomainError`] if either reserve is not positive.
/// - [`AmmError::Overflow`] if `K` is not representable.
pub fn implied_k<P: Precision>(a: &P, b: &P, t: &P) -> Result<P, AmmError> {
    a.pow(t)?.checked_add(&b.pow(t)?)
}

/// Solves for the counter reserve `b'` that keeps `K` fixed once side A
/// moves from `a` to `a_new`.
fn counter_reserve<P: Precision>(a: &P, b: &P, t: &P, a_new: &P) -> Result<P, AmmError> {
    if !a_new.is_positive() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let k = implied_k(a, b, t)?;
    let remaining = k.checked_sub(&a_new.pow(t)?)?;
    if !remaining.is_positive() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let inverse = P::one().checked_div(t, Rounding::Down)?;
    remaining.pow(&inverse)
}

/// Returns `Δb` such that `(a + Δa)^t + (b + Δb)^t = a^t + b^t`.
///
/// `delta_a` and the result are signed: paying into side A yields a
/// negative `Δb`.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if `a + Δa <= 0` or
///   `K − (a + Δa)^t <= 0`.
/// - [`AmmError::DomainError`] if either reserve is not positive.
///
/// # Examples
///
/// ```
/// use bond_amm::math::{FixedPointArithmetic, Precision, reserve_change};
///
/// let a = FixedPointArithmetic::from_u128(100_000).expect("in range");
/// let half = FixedPointArithmetic::from_ratio(1, 2).expect("valid");
/// let delta = FixedPointArithmetic::from_u128(1_000).expect("in range");
/// let db = reserve_change(&a, &a, &half, &delta).expect("solvable");
/// assert!(db.is_negative());
/// assert!(db.abs().to_f64_lossy() < 1_000.0);
/// ```
pub fn reserve_change<P: Precision>(a: &P, b: &P, t: &P, delta_a: &P) -> Result<P, AmmError> {
    let a_new = a.checked_add(delta_a)?;
    counter_reserve(a, b, t, &a_new)?.checked_sub(b)
}

/// Power-of-two shift that brings `max` down to at most
/// [`NORMALIZED_BITS`] significant bits.
fn normalizing_shift(max: u128) -> u32 {
    (u128::BITS - max.leading_zeros()).saturating_sub(NORMALIZED_BITS)
}

/// Raises a solved counter reserve by `reserve · 2^-PAD_BITS + 1` unless
/// the curve is linear.
fn pad_for_pool<P: Precision>(reserve: u128, t: &P) -> Result<u128, AmmError> {
    if *t == P::one() {
        return Ok(reserve);
    }
    reserve
        .checked_add(reserve >> PAD_BITS)
        .and_then(|r| r.checked_add(1))
        .ok_or(AmmError::Overflow("counter reserve padding"))
}

/// Output of an exact-input trade on integer reserves, rounded down.
///
/// `reserve_in` is the side being paid into, `reserve_out` the side paid
/// out of.  The result is strictly less than `reserve_out`.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::InsufficientLiquidity`] if the curve cannot absorb the
///   input.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub fn amount_out_for_exact_in<P: Precision>(
    reserve_in: Amount,
    reserve_out: Amount,
    t: &P,
    amount_in: Amount,
) -> Result<Amount, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    let new_in = reserve_in
        .checked_add(&amount_in)
        .ok_or(AmmError::Overflow("reserve addition"))?;
    let shift = normalizing_shift(new_in.get().max(reserve_out.get()));

    let a = P::from_u128_scaled(reserve_in.get(), shift)?;
    let b = P::from_u128_scaled(reserve_out.get(), shift)?;
    let a_new = P::from_u128_scaled(new_in.get(), shift)?;

    let b_new = counter_reserve(&a, &b, t, &a_new)?.to_u128_scaled(shift, Rounding::Up)?;
    if b_new == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let b_new = pad_for_pool(b_new, t)?;
    Ok(Amount::new(reserve_out.get().saturating_sub(b_new)))
}

/// Input required by an exact-output trade on integer reserves, rounded
/// up.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::InsufficientLiquidity`] if `amount_out >= reserve_out`.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub fn amount_in_for_exact_out<P: Precision>(
    reserve_in: Amount,
    reserve_out: Amount,
    t: &P,
    amount_out: Amount,
) -> Result<Amount, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    let new_out = reserve_out
        .checked_sub(&amount_out)
        .filter(|r| !r.is_zero())
        .ok_or(AmmError::InsufficientLiquidity)?;
    let shift = normalizing_shift(reserve_in.get().max(reserve_out.get()));

    let a = P::from_u128_scaled(reserve_out.get(), shift)?;
    let b = P::from_u128_scaled(reserve_in.get(), shift)?;
    let a_new = P::from_u128_scaled(new_out.get(), shift)?;

    let b_new = pad_for_pool(counter_reserve(&a, &b, t, &a_new)?.to_u128_scaled(shift, Rounding::Up)?, t)?;
    Ok(Amount::new(b_new.saturating_sub(reserve_in.get())))
}
