//! Execution-host time in whole seconds.

use core::fmt;

/// A point in time, in seconds since the execution host's epoch.
///
/// The engine never reads a clock: every time-dependent operation takes a
/// `Timestamp` argument supplied by the caller.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::Timestamp;
///
/// let now = Timestamp::new(1_000);
/// let maturity = Timestamp::new(4_600);
/// assert_eq!(now.seconds_until(maturity), 3_600);
/// assert_eq!(maturity.seconds_until(now), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch.
    pub const ZERO: Self = Self(0);

    /// Creates a new timestamp.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw second count.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Seconds from `self` until `later`, or zero if `later` is not after
    /// `self`.
    #[must_use]
    pub const fn seconds_until(&self, later: Self) -> u64 {
        later.0.saturating_sub(self.0)
    }

    /// Seconds elapsed since `earlier`, or `None` if `earlier` is after
    /// `self`.
    #[must_use]
    pub const fn checked_elapsed_since(&self, earlier: Self) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }

    /// Returns a timestamp `seconds` later, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
