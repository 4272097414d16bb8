//! Configuration for a time-decaying bond pool.

use super::{OracleConfig, PoolKind};
use crate::domain::{Address, FeeConstant, Timestamp, TokenPair};
use crate::error::AmmError;

/// Immutable parameters of a bond pool.
///
/// Defines the pool's own ledger account, its asset pair and flavor, the
/// maturity and anchor that drive the curve exponent, the per-direction
/// fee constants, and its oracle cadence.
///
/// # Derived Values
///
/// - Curve exponent: `t = 1 − (maturity − now) / anchor · g`
/// - Exponent at inception must be positive for trading to be possible;
///   this depends on the inception time and is checked per trade.
///
/// # Validation
///
/// - `anchor` must be positive.
/// - `maturity` must be after the epoch.
/// - The pool account must not be one of the pair's assets.
///
/// # Examples
///
/// ```
/// use bond_amm::config::{PoolConfig, PoolKind};
/// use bond_amm::domain::{Address, FeeConstant, Timestamp, TokenPair};
///
/// let pair = TokenPair::new(Address::from_byte(1), Address::from_byte(2)).expect("distinct");
/// let cfg = PoolConfig::new(
///     Address::from_byte(0xF0),
///     pair,
///     PoolKind::BondUnderlying,
///     Timestamp::new(1_800_000_000),
///     31_557_600 * 10,
/// )
/// .and_then(|c| c.with_fee_constants(FeeConstant::new(9_500)?, FeeConstant::new(10_500)?))
/// .expect("valid config");
/// assert_eq!(cfg.fee_constant_buy().get(), 9_500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    address: Address,
    token_pair: TokenPair,
    kind: PoolKind,
    maturity: Timestamp,
    anchor: u64,
    fee_constant_buy: FeeConstant,
    fee_constant_sell: FeeConstant,
    oracle: OracleConfig,
}

impl PoolConfig {
    /// Creates a config with unit fee constants and the default oracle.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any invariant is
    /// violated.
    pub fn new(
        address: Address,
        token_pair: TokenPair,
        kind: PoolKind,
        maturity: Timestamp,
        anchor: u64,
    ) -> Result<Self, AmmError> {
        let config = Self {
            address,
            token_pair,
            kind,
            maturity,
            anchor,
            fee_constant_buy: FeeConstant::ONE,
            fee_constant_sell: FeeConstant::ONE,
            oracle: OracleConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the direction fee constants.
    ///
    /// `buy` prices trades that pay side B in (buying bonds); `sell`
    /// prices trades that pay side A in.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn with_fee_constants(mut self, buy: FeeConstant, sell: FeeConstant) -> Result<Self, AmmError> {
        self.fee_constant_buy = buy;
        self.fee_constant_sell = sell;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the oracle configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn with_oracle(mut self, oracle: OracleConfig) -> Result<Self, AmmError> {
        self.oracle = oracle;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on violation.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.anchor == 0 {
            return Err(AmmError::InvalidConfiguration("anchor must be positive"));
        }
        if self.maturity == Timestamp::ZERO {
            return Err(AmmError::InvalidConfiguration("maturity must be set"));
        }
        if self.token_pair.side_of(&self.address).is_ok() {
            return Err(AmmError::InvalidConfiguration(
                "pool account must differ from its assets",
            ));
        }
        self.oracle.validate()
    }

    /// Returns the pool's own ledger account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the pool flavor.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Returns the maturity timestamp.
    #[must_use]
    pub const fn maturity(&self) -> Timestamp {
        self.maturity
    }

    /// Returns the anchor in seconds.
    #[must_use]
    pub const fn anchor(&self) -> u64 {
        self.anchor
    }

    /// Returns the fee constant for trades paying side B in.
    #[must_use]
    pub const fn fee_constant_buy(&self) -> FeeConstant {
        self.fee_constant_buy
    }

    /// Returns the fee constant for trades paying side A in.
    #[must_use]
    pub const fn fee_constant_sell(&self) -> FeeConstant {
        self.fee_constant_sell
    }

    /// Returns the oracle configuration.
    #[must_use]
    pub const fn oracle(&self) -> OracleConfig {
        self.oracle
    }
}
