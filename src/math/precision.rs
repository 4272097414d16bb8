//! Precision trait for the numeric backends behind the curve.
//!
//! The [`Precision`] trait abstracts over numeric types so that the
//! invariant solver and the time-decay schedule can be written once and
//! run on either backend:
//!
//! | Feature | Backend | Type |
//! |---------|---------|------|
//! | always on | `I80F48` (80-bit int, 48-bit frac) | `FixedPointArithmetic` |
//! | `float` | IEEE 754 `f64` | `FloatArithmetic` |
//!
//! Pools always run on the fixed-point backend; the float backend exists
//! for off-chain simulation and cross-checking.
//!
//! # Arbitrary real powers
//!
//! [`Precision::pow`] evaluates `x^y` for `x > 0` and any real `y` as
//! `exp(y · ln x)`.  Backends supply [`ln`](Precision::ln) and
//! [`exp`](Precision::exp); the composition and its shortcuts live here
//! so every backend treats the degenerate exponents identically:
//!
//! - `y = 0` or `x = 1` returns exactly one,
//! - `y = 1` returns `x` unchanged, which keeps the post-maturity curve
//!   an exact 1:1 line.

use crate::domain::Rounding;
use crate::error::AmmError;

/// Abstraction over the numeric types used in curve calculations.
///
/// # Contract
///
/// - All checked arithmetic methods return [`Err`] on overflow, underflow,
///   or division by zero and never panic.
/// - [`from_u128`](Precision::from_u128) fails with
///   [`AmmError::Overflow`] when the value is outside the representable
///   range instead of truncating it.
/// - [`ln`](Precision::ln) fails with [`AmmError::DomainError`] for
///   non-positive inputs.
pub trait Precision: Clone + Copy + core::fmt::Debug + PartialEq + PartialOrd {
    // -- Identity constants -------------------------------------------------

    /// Returns the additive identity (zero).
    #[must_use]
    fn zero() -> Self;

    /// Returns the multiplicative identity (one).
    #[must_use]
    fn one() -> Self;

    // -- Conversions --------------------------------------------------------

    /// Converts a `u128` value to this precision type.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the value is not representable.
    fn from_u128(value: u128) -> Result<Self, AmmError>;

    /// Converts `numerator / denominator` to this precision type,
    /// truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `denominator` is zero and
    /// [`AmmError::Overflow`] if either operand is not representable.
    fn from_ratio(numerator: u128, denominator: u128) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        Self::from_u128(numerator)?.checked_div(&Self::from_u128(denominator)?, Rounding::Down)
    }

    /// Converts a non-negative value to `u128` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] for negative values and
    /// [`AmmError::Overflow`] if the rounded value does not fit.
    fn to_u128(&self, rounding: Rounding) -> Result<u128, AmmError>;

    /// Converts `value / 2^shift` to this precision type.
    ///
    /// Lets callers normalize large integer reserves into the backend's
    /// comfortable range without losing low-order bits.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the scaled value is not
    /// representable.
    fn from_u128_scaled(value: u128, shift: u32) -> Result<Self, AmmError>;

    /// Converts `self · 2^shift` to `u128` with explicit rounding; the
    /// inverse of [`from_u128_scaled`](Precision::from_u128_scaled).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] for negative values and
    /// [`AmmError::Overflow`] if the result does not fit.
    fn to_u128_scaled(&self, shift: u32, rounding: Rounding) -> Result<u128, AmmError>;

    /// Converts an `f64` value to this precision type (lossy).
    #[must_use]
    fn from_f64(value: f64) -> Self;

    /// Converts this value to `f64`, potentially losing precision.
    #[must_use]
    fn to_f64_lossy(&self) -> f64;

    // -- Checked arithmetic -------------------------------------------------

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result is not representable.
    fn checked_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.  Negative results are representable.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result is not representable.
    fn checked_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result is not representable.
    fn checked_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn checked_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;

    // -- Sign and comparison helpers ----------------------------------------

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    fn is_negative(&self) -> bool;

    /// Returns `true` if the value is zero.
    #[must_use]
    fn is_zero(&self) -> bool;

    /// Returns `true` if the value is strictly positive.
    #[must_use]
    fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// Returns the absolute value.
    #[must_use]
    fn abs(&self) -> Self;

    // -- Transcendentals ----------------------------------------------------

    /// Natural logarithm.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if `self <= 0`.
    fn ln(&self) -> Result<Self, AmmError>;

    /// Natural exponential.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result is not representable.
    fn exp(&self) -> Result<Self, AmmError>;

    /// Raises `self` to an arbitrary real `exponent`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DomainError`] if `self <= 0`.
    /// - [`AmmError::Overflow`] if the result is not representable.
    fn pow(&self, exponent: &Self) -> Result<Self, AmmError> {
        if !self.is_positive() {
            return Err(AmmError::DomainError("power base must be positive"));
        }
        if exponent.is_zero() || *self == Self::one() {
            return Ok(Self::one());
        }
        if *exponent == Self::one() {
            return Ok(*self);
        }
        self.ln()?.checked_mul(exponent)?.exp()
    }
}
