//! Fixed-point implementation of the [`Precision`] trait.
//!
//! [`FixedPointArithmetic`] is a newtype over
//! [`I80F48`](fixed::types::I80F48) and is the backend every pool runs on.
//! Arithmetic is delegated to the [`fixed`] crate; `ln` and `exp` are
//! bounded series evaluated entirely in `I80F48`.
//!
//! # Precision characteristics
//!
//! | Aspect | Value |
//! |--------|-------|
//! | Integer bits | 80 (signed) |
//! | Fractional bits | 48 |
//! | Resolution | 2^−48 ≈ 3.55 × 10⁻¹⁵ |
//! | Range | ±2^79 ≈ ±6.0 × 10²³ |
//! | `pow` relative error | < 10⁻⁹ for `x ∈ [1, 2^78]`, `y ∈ [−4, 4]` |
//! | Determinism | 100 % bit-for-bit |
//!
//! # Logarithm
//!
//! `x` is normalized to `m · 2^k` with `m ∈ [1, 2)`, then
//! `ln x = k · ln 2 + 2 · atanh(z)` with `z = (m − 1) / (m + 1) < 1/3`.
//! Each term of the odd-power series shrinks by at least `1/9`.
//!
//! # Exponential
//!
//! `y` is reduced to `k · ln 2 + s` with `|s| ≤ ln 2 / 2`; `exp(s)` is a
//! Taylor series and the result is rescaled by `2^k` exactly.  Results
//! smaller than the resolution collapse to zero.

use core::fmt;

use fixed::types::I80F48;

use crate::domain::Rounding;
use crate::error::AmmError;

use super::Precision;

/// Number of fractional bits in `I80F48`.
const FRAC_BITS: i32 = 48;

/// `ln 2` rounded to the nearest `I80F48`.
const LN_2: I80F48 = I80F48::from_bits(195_103_586_505_167);

/// Upper bound on odd-power terms in the `atanh` series.
const LN_SERIES_TERMS: i32 = 24;

/// Upper bound on terms in the `exp` Taylor series.
const EXP_SERIES_TERMS: i32 = 24;

/// Largest binary exponent `exp` can scale by before leaving the range.
const MAX_EXP_SHIFT: i32 = 78;

/// `I80F48`-backed precision type for deterministic curve computation.
///
/// # Examples
///
/// ```
/// use bond_amm::math::{FixedPointArithmetic, Precision};
///
/// let x = FixedPointArithmetic::from_u128(100_000).expect("in range");
/// let half = FixedPointArithmetic::from_ratio(1, 2).expect("valid ratio");
/// let root = x.pow(&half).expect("positive base");
/// assert!((root.to_f64_lossy() - 316.227_766).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPointArithmetic(I80F48);

impl FixedPointArithmetic {
    /// Creates a new `FixedPointArithmetic` from a raw [`I80F48`].
    #[inline]
    #[must_use]
    pub const fn new(value: I80F48) -> Self {
        Self(value)
    }

    /// Returns the underlying [`I80F48`] value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> I80F48 {
        self.0
    }
}

impl From<I80F48> for FixedPointArithmetic {
    #[inline]
    fn from(value: I80F48) -> Self {
        Self(value)
    }
}

impl fmt::Display for FixedPointArithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Precision for FixedPointArithmetic {
    #[inline]
    fn zero() -> Self {
        Self(I80F48::ZERO)
    }

    #[inline]
    fn one() -> Self {
        Self(I80F48::ONE)
    }

    // -- Conversions --------------------------------------------------------

    fn from_u128(value: u128) -> Result<Self, AmmError> {
        I80F48::checked_from_num(value)
            .map(Self)
            .ok_or(AmmError::Overflow("value exceeds fixed-point range"))
    }

    /// Divides in fixed point directly so ratios of two in-range reserves
    /// keep the full 48 fractional bits.
    fn from_ratio(numerator: u128, denominator: u128) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        let n = Self::from_u128(numerator)?;
        let d = Self::from_u128(denominator)?;
        n.checked_div(&d, Rounding::Down)
    }

    fn to_u128(&self, rounding: Rounding) -> Result<u128, AmmError> {
        if self.0 < I80F48::ZERO {
            return Err(AmmError::Underflow("negative fixed-point value"));
        }
        let rounded = match rounding {
            Rounding::Down => self.0.floor(),
            Rounding::Up => self
                .0
                .checked_ceil()
                .ok_or(AmmError::Overflow("fixed-point ceil overflow"))?,
        };
        rounded
            .checked_to_num::<u128>()
            .ok_or(AmmError::Overflow("fixed-point to u128 overflow"))
    }

    /// Exact for `shift <= 48`; larger shifts truncate low bits.
    fn from_u128_scaled(value: u128, shift: u32) -> Result<Self, AmmError> {
        let frac = FRAC_BITS.unsigned_abs();
        let bits = if shift <= frac {
            i128::try_from(value)
                .ok()
                .and_then(|v| v.checked_mul(1i128 << (frac - shift)))
        } else {
            value
                .checked_shr(shift - frac)
                .and_then(|v| i128::try_from(v).ok())
                .or(Some(0))
        };
        bits.map(|b| Self(I80F48::from_bits(b)))
            .ok_or(AmmError::Overflow("scaled value exceeds fixed-point range"))
    }

    fn to_u128_scaled(&self, shift: u32, rounding: Rounding) -> Result<u128, AmmError> {
        let bits = u128::try_from(self.0.to_bits())
            .map_err(|_| AmmError::Underflow("negative fixed-point value"))?;
        if bits == 0 {
            return Ok(0);
        }
        let frac = FRAC_BITS.unsigned_abs();
        if shift >= frac {
            let k = shift - frac;
            if k > 0 && bits.leading_zeros() < k {
                return Err(AmmError::Overflow("fixed-point to u128 overflow"));
            }
            return Ok(bits << k);
        }
        let k = frac - shift;
        let quotient = bits >> k;
        let remainder = bits & ((1u128 << k) - 1);
        if rounding.is_up() && remainder != 0 {
            return quotient
                .checked_add(1)
                .ok_or(AmmError::Overflow("fixed-point to u128 overflow"));
        }
        Ok(quotient)
    }

    /// Saturates at `I80F48::MIN`/`I80F48::MAX` for out-of-range inputs.
    #[inline]
    fn from_f64(value: f64) -> Self {
        Self(I80F48::saturating_from_num(value))
    }

    #[inline]
    fn to_f64_lossy(&self) -> f64 {
        self.0.to_num::<f64>()
    }

    // -- Checked arithmetic -------------------------------------------------

    fn checked_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(AmmError::Overflow("fixed-point addition overflow"))
    }

    fn checked_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(AmmError::Underflow("fixed-point subtraction underflow"))
    }

    fn checked_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.0
            .checked_mul(other.0)
            .map(Self)
            .ok_or(AmmError::Overflow("fixed-point multiplication overflow"))
    }

    /// Divides with explicit rounding direction.
    ///
    /// [`Rounding::Up`] adds one ULP when truncation discarded a non-zero
    /// remainder.
    fn checked_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        if other.0 == I80F48::ZERO {
            return Err(AmmError::DivisionByZero);
        }

        let quotient = self
            .0
            .checked_div(other.0)
            .ok_or(AmmError::Overflow("fixed-point division overflow"))?;

        match rounding {
            Rounding::Down => Ok(Self(quotient)),
            Rounding::Up => {
                let product = quotient
                    .checked_mul(other.0)
                    .ok_or(AmmError::Overflow("fixed-point division rounding overflow"))?;
                if product == self.0 {
                    return Ok(Self(quotient));
                }
                quotient
                    .checked_add(I80F48::DELTA)
                    .map(Self)
                    .ok_or(AmmError::Overflow("fixed-point division rounding overflow"))
            }
        }
    }

    // -- Sign and comparison helpers ----------------------------------------

    #[inline]
    fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == I80F48::ZERO
    }

    #[inline]
    fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    // -- Transcendentals ----------------------------------------------------

    fn ln(&self) -> Result<Self, AmmError> {
        let x = self.0;
        if x <= I80F48::ZERO {
            return Err(AmmError::DomainError("logarithm of non-positive value"));
        }
        if x == I80F48::ONE {
            return Ok(Self::zero());
        }

        // x = m * 2^k with m in [1, 2)
        #[allow(clippy::cast_possible_wrap)]
        let msb = 127 - x.to_bits().leading_zeros() as i32;
        let k = msb - FRAC_BITS;
        let m = if k >= 0 {
            x >> k.unsigned_abs()
        } else {
            x << k.unsigned_abs()
        };

        // z in [0, 1/3): every intermediate below stays in (-1, 1)
        let z = (m - I80F48::ONE) / (m + I80F48::ONE);
        let z2 = z * z;
        let mut power = z;
        let mut series = z;
        for n in 1..LN_SERIES_TERMS {
            power *= z2;
            if power == I80F48::ZERO {
                break;
            }
            series += power / I80F48::from_num(2 * n + 1);
        }

        let ln_m = series + series;
        let ln_scale = LN_2
            .checked_mul_int(i128::from(k))
            .ok_or(AmmError::Overflow("logarithm scale overflow"))?;
        ln_scale
            .checked_add(ln_m)
            .map(Self)
            .ok_or(AmmError::Overflow("logarithm overflow"))
    }

    fn exp(&self) -> Result<Self, AmmError> {
        let y = self.0;
        if y == I80F48::ZERO {
            return Ok(Self::one());
        }

        let k = y
            .checked_div(LN_2)
            .and_then(|q| q.checked_round())
            .and_then(|q| q.checked_to_num::<i32>())
            .ok_or(AmmError::Overflow("exponential overflow"))?;
        if k > MAX_EXP_SHIFT {
            return Err(AmmError::Overflow("exponential overflow"));
        }
        if k < -(FRAC_BITS + 1) {
            return Ok(Self::zero());
        }

        // |s| <= ln2 / 2, so the Taylor terms stay below one
        let s = y - LN_2 * I80F48::from_num(k);
        let mut term = I80F48::ONE;
        let mut sum = I80F48::ONE;
        for n in 1..=EXP_SERIES_TERMS {
            term = term * s / I80F48::from_num(n);
            if term == I80F48::ZERO {
                break;
            }
            sum += term;
        }

        if k >= 0 {
            sum.checked_mul_int(1i128 << k)
                .map(Self)
                .ok_or(AmmError::Overflow("exponential overflow"))
        } else {
            Ok(Self(sum >> k.unsigned_abs()))
        }
    }
}
