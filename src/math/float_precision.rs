//! Floating-point implementation of the [`Precision`] trait.
//!
//! This module is only available when the `float` Cargo feature is enabled.
//! It provides [`FloatArithmetic`], a newtype over `f64` that implements
//! [`Precision`] using IEEE 754 double-precision arithmetic and the
//! standard library's `ln`/`exp`.
//!
//! # Precision characteristics
//!
//! | Aspect | Value |
//! |--------|-------|
//! | Significant digits | ~15–17 |
//! | Range | ±2^1024 |
//! | Determinism | Subject to IEEE 754 rounding and libm |
//!
//! # When to use
//!
//! Off-chain curve simulation and cross-checking the fixed-point backend.
//! Pools never run on this backend.

use core::fmt;

use crate::domain::Rounding;
use crate::error::AmmError;

use super::Precision;

/// IEEE 754 `f64`-backed precision type for off-chain computation.
///
/// All checked arithmetic methods return [`Err`] when the result is
/// non-finite (`NaN` or `±∞`).
///
/// # Examples
///
/// ```
/// use bond_amm::math::{FloatArithmetic, Precision};
///
/// let x = FloatArithmetic::new(100_000.0);
/// let root = x.pow(&FloatArithmetic::new(0.5)).expect("positive base");
/// assert!((root.get() - 316.227_766).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatArithmetic(f64);

impl FloatArithmetic {
    /// Creates a new `FloatArithmetic` from a raw `f64`.
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the underlying `f64` value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    fn finite(value: f64, err: AmmError) -> Result<Self, AmmError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(err)
        }
    }
}

impl From<f64> for FloatArithmetic {
    #[inline]
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FloatArithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Precision for FloatArithmetic {
    #[inline]
    fn zero() -> Self {
        Self(0.0)
    }

    #[inline]
    fn one() -> Self {
        Self(1.0)
    }

    // -- Conversions --------------------------------------------------------

    /// Values above 2^53 lose precision; the conversion never fails.
    #[inline]
    fn from_u128(value: u128) -> Result<Self, AmmError> {
        #[allow(clippy::cast_precision_loss)]
        let v = value as f64;
        Ok(Self(v))
    }

    fn to_u128(&self, rounding: Rounding) -> Result<u128, AmmError> {
        if !self.0.is_finite() {
            return Err(AmmError::Overflow("non-finite float"));
        }
        if self.0 < 0.0 {
            return Err(AmmError::Underflow("negative float value"));
        }
        let rounded = match rounding {
            Rounding::Down => self.0.floor(),
            Rounding::Up => self.0.ceil(),
        };
        #[allow(clippy::cast_precision_loss)]
        let limit = u128::MAX as f64;
        if rounded >= limit {
            return Err(AmmError::Overflow("float to u128 overflow"));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = rounded as u128;
        Ok(v)
    }

    fn from_u128_scaled(value: u128, shift: u32) -> Result<Self, AmmError> {
        let Self(v) = Self::from_u128(value)?;
        let scale = i32::try_from(shift).map_err(|_| AmmError::Overflow("scale shift too large"))?;
        Ok(Self(v / 2f64.powi(scale)))
    }

    fn to_u128_scaled(&self, shift: u32, rounding: Rounding) -> Result<u128, AmmError> {
        let scale = i32::try_from(shift).map_err(|_| AmmError::Overflow("scale shift too large"))?;
        Self(self.0 * 2f64.powi(scale)).to_u128(rounding)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    fn to_f64_lossy(&self) -> f64 {
        self.0
    }

    // -- Checked arithmetic -------------------------------------------------

    fn checked_add(&self, other: &Self) -> Result<Self, AmmError> {
        Self::finite(self.0 + other.0, AmmError::Overflow("float addition overflow"))
    }

    fn checked_sub(&self, other: &Self) -> Result<Self, AmmError> {
        Self::finite(self.0 - other.0, AmmError::Underflow("float subtraction underflow"))
    }

    fn checked_mul(&self, other: &Self) -> Result<Self, AmmError> {
        Self::finite(self.0 * other.0, AmmError::Overflow("float multiplication overflow"))
    }

    /// Divides using IEEE 754 semantics.
    ///
    /// The `_rounding` parameter is accepted for API consistency but has no
    /// effect.
    fn checked_div(&self, other: &Self, _rounding: Rounding) -> Result<Self, AmmError> {
        if other.0 == 0.0 {
            return Err(AmmError::DivisionByZero);
        }
        Self::finite(self.0 / other.0, AmmError::Overflow("float division overflow"))
    }

    // -- Sign and comparison helpers ----------------------------------------

    #[inline]
    fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    #[inline]
    fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    // -- Transcendentals ----------------------------------------------------

    fn ln(&self) -> Result<Self, AmmError> {
        if self.0 <= 0.0 {
            return Err(AmmError::DomainError("logarithm of non-positive value"));
        }
        Self::finite(self.0.ln(), AmmError::DomainError("logarithm of non-finite value"))
    }

    fn exp(&self) -> Result<Self, AmmError> {
        Self::finite(self.0.exp(), AmmError::Overflow("exponential overflow"))
    }
}
