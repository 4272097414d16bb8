//! Arithmetic and precision utilities for curve calculations.
//!
//! This module provides the [`Precision`] trait for numeric backends,
//! [`CheckedArithmetic`] for overflow-safe domain arithmetic,
//! [`mul_div`] for wide proportional math, the power-sum
//! [`invariant`] solver and the [`time_decay`] exponent schedule.
//!
//! # Backends
//!
//! | Feature | Type | Use case |
//! |---------|------|----------|
//! | always on | `FixedPointArithmetic` | Deterministic pool execution |
//! | `float` | `FloatArithmetic` | Off-chain simulation |

mod checked;
mod fixed_precision;
pub mod invariant;
mod precision;
mod rounding;
pub mod time_decay;

#[cfg(feature = "float")]
mod float_precision;

pub use checked::CheckedArithmetic;
pub use fixed_precision::FixedPointArithmetic;
pub use invariant::{amount_in_for_exact_out, amount_out_for_exact_in, implied_k, reserve_change};
pub use precision::Precision;
pub use rounding::mul_div;
pub use time_decay::{SECONDS_PER_YEAR, curve_exponent, implied_annual_rate, reserve_a_for_rate, spot_price};

#[cfg(feature = "float")]
pub use float_precision::FloatArithmetic;
