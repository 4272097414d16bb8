//! The bond pool and the components it is assembled from.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`BondPool`] | Power-sum curve with time-decaying exponent; implements [`SwapPool`](crate::traits::SwapPool) and [`LiquidityPool`](crate::traits::LiquidityPool) |
//! | [`ShareLedger`] | Liquidity share balances, allowances and supply |
//! | [`RateOracle`] | Throttled ring buffer of implied-rate samples |
//! | [`DividendLedger`] | Harvest checkpoints and per-account claim cursors |

mod bond_pool;
mod dividends;
mod oracle;
mod share_ledger;

#[cfg(feature = "serde")]
mod serde_pairs;

#[cfg(test)]
mod proptest_properties;

pub use bond_pool::BondPool;
pub use dividends::{DividendCheckpoint, DividendLedger};
pub use oracle::{RateObservation, RateOracle};
pub use share_ledger::ShareLedger;
