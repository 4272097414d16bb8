//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool instances
//! from their configuration structs.
//!
//! # Validation Contract
//!
//! Implementations **must** re-validate the configuration during
//! construction, since a config may have been deserialized without going
//! through its validating constructor.  A successfully constructed pool
//! is empty and awaits its first deposit.
//!
//! ```text
//! BondPool::from_config(&pool_config)?
//! ```

use crate::error::AmmError;

/// Builds `Self` from a validated configuration of type `C`.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] (or another validation
    /// error) if `config` violates an invariant.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
