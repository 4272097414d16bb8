//! Configuration for the implied-rate oracle.

use crate::error::AmmError;

/// Default number of observations kept in the ring buffer.
pub const DEFAULT_ORACLE_CAPACITY: usize = 31;

/// Default minimum spacing between observations, in seconds.
pub const DEFAULT_MIN_SAMPLE_INTERVAL: u64 = 120;

/// Ring-buffer size and sampling cadence of a pool's rate oracle.
///
/// # Validation
///
/// - `capacity` must be at least 2, since a smoothed rate needs one
///   interval.
/// - `min_interval` must be positive, otherwise same-timestamp samples
///   could flood the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OracleConfig {
    capacity: usize,
    min_interval: u64,
}

impl OracleConfig {
    /// Creates a new `OracleConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `capacity < 2` or
    /// `min_interval == 0`.
    pub fn new(capacity: usize, min_interval: u64) -> Result<Self, AmmError> {
        let config = Self {
            capacity,
            min_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] on violation.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.capacity < 2 {
            return Err(AmmError::InvalidConfiguration(
                "oracle capacity must be at least 2",
            ));
        }
        if self.min_interval == 0 {
            return Err(AmmError::InvalidConfiguration(
                "oracle sample interval must be positive",
            ));
        }
        Ok(())
    }

    /// Returns the ring-buffer capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the minimum seconds between observations.
    #[must_use]
    pub const fn min_interval(&self) -> u64 {
        self.min_interval
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ORACLE_CAPACITY,
            min_interval: DEFAULT_MIN_SAMPLE_INTERVAL,
        }
    }
}
