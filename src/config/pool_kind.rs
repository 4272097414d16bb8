//! Pool flavor.
//!
//! Both flavors share identical mechanics.  They differ only in what side
//! B holds and in how the first deposit is usually priced:
//!
//! ```text
//! PoolKind::BondUnderlying => discovers its own rate from trading
//! PoolKind::BondYieldClaim => bootstraps from a BondUnderlying oracle
//! ```

use core::fmt;

/// Which counter asset a pool pairs its bonds with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolKind {
    /// Bonds against the underlying base asset.
    BondUnderlying,
    /// Bonds against the matching yield-claim token.
    BondYieldClaim,
}

impl PoolKind {
    /// Returns `true` for [`PoolKind::BondUnderlying`].
    #[must_use]
    pub const fn is_bond_underlying(&self) -> bool {
        matches!(self, Self::BondUnderlying)
    }

    /// Returns `true` for [`PoolKind::BondYieldClaim`].
    #[must_use]
    pub const fn is_bond_yield_claim(&self) -> bool {
        matches!(self, Self::BondYieldClaim)
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BondUnderlying => write!(f, "BondUnderlying"),
            Self::BondYieldClaim => write!(f, "BondYieldClaim"),
        }
    }
}
