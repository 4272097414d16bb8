//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use bond_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, AssetAmounts, FeeConstant, Price, Rate, Rounding, Shares, Side, SwapResult,
    SwapSpec, Timestamp, TokenPair,
};

pub use crate::traits::{AssetLedger, FromConfig, LiquidityPool, SwapPool};

pub use crate::math::{CheckedArithmetic, SECONDS_PER_YEAR};

pub use crate::config::{OracleConfig, PoolConfig, PoolKind};

pub use crate::error::{AmmError, Result};

pub use crate::ledger::InMemoryLedger;

pub use crate::pools::BondPool;
