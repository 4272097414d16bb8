//! Windowed implied-rate oracle.
//!
//! The oracle keeps the last `capacity` observations of a pool's implied
//! annual rate in a ring buffer.  Each observation carries a running
//! time-integral of the rate (`rate_cumulative`), accumulated with the
//! trapezoid rule between consecutive samples:
//!
//! ```text
//! cum[i] = cum[i-1] + (rate[i-1] + rate[i]) / 2 · (t[i] − t[i-1])
//! ```
//!
//! Differencing two cumulatives yields the time-weighted mean rate over
//! the interval between them, so the per-interval series and the window
//! average both fall out of the same accumulator.
//!
//! # Throttling
//!
//! A sample is accepted only when at least `min_interval` seconds have
//! passed since the previous one.  Without this a single actor could fill
//! the whole window within one block.  A timestamp earlier than the last
//! observation is never due.

use tracing::{debug, info};

use crate::config::OracleConfig;
use crate::domain::{Rate, Rounding, Timestamp};
use crate::error::AmmError;
use crate::math::{FixedPointArithmetic, Precision};

/// A single rate sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateObservation {
    timestamp: Timestamp,
    rate: Rate,
    rate_cumulative: FixedPointArithmetic,
}

impl RateObservation {
    /// When the sample was taken.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Spot implied rate at sampling time.
    #[must_use]
    pub const fn rate(&self) -> Rate {
        self.rate
    }

    /// Time-integral of the rate since the first observation, in
    /// rate·seconds.
    #[must_use]
    pub const fn rate_cumulative(&self) -> FixedPointArithmetic {
        self.rate_cumulative
    }
}

/// Ring buffer of [`RateObservation`]s with a one-time reference rate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateOracle {
    config: OracleConfig,
    observations: Vec<RateObservation>,
    /// Index of the most recent observation.
    head: usize,
    reference_rate: Option<Rate>,
}

impl RateOracle {
    /// Creates an empty oracle.
    #[must_use]
    pub fn new(config: OracleConfig) -> Self {
        Self {
            config,
            observations: Vec::with_capacity(config.capacity()),
            head: 0,
            reference_rate: None,
        }
    }

    /// Returns the oracle configuration.
    #[must_use]
    pub const fn config(&self) -> OracleConfig {
        self.config
    }

    /// Number of stored observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if nothing has been sampled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Most recent observation.
    #[must_use]
    pub fn latest(&self) -> Option<RateObservation> {
        self.observations.get(self.head).copied()
    }

    /// Returns `true` if a sample at `now` would be accepted.
    #[must_use]
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.latest() {
            None => true,
            Some(last) => now
                .checked_elapsed_since(last.timestamp)
                .is_some_and(|elapsed| elapsed >= self.config.min_interval()),
        }
    }

    /// Records `rate` at `now` if a sample is due.
    ///
    /// Returns `Ok(false)` without touching state when not due.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the cumulative overflows.
    pub fn record(&mut self, now: Timestamp, rate: Rate) -> Result<bool, AmmError> {
        if !self.is_due(now) {
            debug!(now = %now, "rate sample not due");
            return Ok(false);
        }
        let observation = self.next_observation(now, rate)?;
        if self.observations.len() < self.config.capacity() {
            self.observations.push(observation);
            self.head = self.observations.len() - 1;
        } else {
            self.head = (self.head + 1) % self.config.capacity();
            self.observations[self.head] = observation;
        }
        debug!(now = %now, rate = %rate, len = self.observations.len(), "rate sample recorded");
        Ok(true)
    }

    /// Records `rate` at `now`, failing when not due.
    ///
    /// # Errors
    ///
    /// - [`AmmError::RateNotDue`] if the minimum interval has not elapsed.
    /// - [`AmmError::Overflow`] if the cumulative overflows.
    pub fn record_strict(&mut self, now: Timestamp, rate: Rate) -> Result<(), AmmError> {
        if self.record(now, rate)? {
            Ok(())
        } else {
            Err(AmmError::RateNotDue)
        }
    }

    fn next_observation(&self, now: Timestamp, rate: Rate) -> Result<RateObservation, AmmError> {
        let rate_cumulative = match self.latest() {
            None => FixedPointArithmetic::zero(),
            Some(last) => {
                let elapsed = now
                    .checked_elapsed_since(last.timestamp)
                    .ok_or(AmmError::Underflow("oracle time went backwards"))?;
                let two = FixedPointArithmetic::from_u128(2)?;
                let mean = last
                    .rate
                    .get()
                    .checked_add(&rate.get())?
                    .checked_div(&two, Rounding::Down)?;
                let area = mean.checked_mul(&FixedPointArithmetic::from_u128(u128::from(elapsed))?)?;
                last.rate_cumulative.checked_add(&area)?
            }
        };
        Ok(RateObservation {
            timestamp: now,
            rate,
            rate_cumulative,
        })
    }

    /// Observations in chronological order.
    #[must_use]
    pub fn observations(&self) -> Vec<RateObservation> {
        let len = self.observations.len();
        let start = if len < self.config.capacity() {
            0
        } else {
            (self.head + 1) % len
        };
        (0..len)
            .map(|i| self.observations[(start + i) % len])
            .collect()
    }

    /// Time-weighted mean rate between two observations.
    fn interval_rate(earlier: &RateObservation, later: &RateObservation) -> Result<Rate, AmmError> {
        let elapsed = later
            .timestamp
            .checked_elapsed_since(earlier.timestamp)
            .filter(|e| *e > 0)
            .ok_or(AmmError::DivisionByZero)?;
        let area = later.rate_cumulative.checked_sub(&earlier.rate_cumulative)?;
        area.checked_div(
            &FixedPointArithmetic::from_u128(u128::from(elapsed))?,
            Rounding::Down,
        )
        .map(Rate::new)
    }

    /// Per-interval time-weighted rates, oldest first; `len − 1` entries.
    ///
    /// # Errors
    ///
    /// Propagates fixed-point arithmetic errors.
    pub fn implied_rate_series(&self) -> Result<Vec<Rate>, AmmError> {
        self.observations()
            .windows(2)
            .map(|w| Self::interval_rate(&w[0], &w[1]))
            .collect()
    }

    /// Time-weighted mean rate over the whole window.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::OracleNotReady`] with fewer than two
    /// observations.
    pub fn smoothed_rate(&self) -> Result<Rate, AmmError> {
        let observations = self.observations();
        match (observations.first(), observations.last()) {
            (Some(first), Some(last)) if observations.len() >= 2 => Self::interval_rate(first, last),
            _ => Err(AmmError::OracleNotReady("need at least two observations")),
        }
    }

    /// The committed reference rate, if any.
    #[must_use]
    pub const fn reference_rate(&self) -> Option<Rate> {
        self.reference_rate
    }

    /// Commits `rate` as the reference rate.  Can happen once.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReferenceRateAlreadySet`] on a second call.
    pub fn set_reference_rate(&mut self, rate: Rate) -> Result<(), AmmError> {
        if self.reference_rate.is_some() {
            return Err(AmmError::ReferenceRateAlreadySet);
        }
        self.reference_rate = Some(rate);
        info!(rate = %rate, "reference rate committed");
        Ok(())
    }

    /// Commits the current [`smoothed_rate`](Self::smoothed_rate) as the
    /// reference rate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReferenceRateAlreadySet`] if already committed.
    /// - [`AmmError::OracleNotReady`] with fewer than two observations.
    pub fn commit_reference_rate(&mut self) -> Result<Rate, AmmError> {
        if self.reference_rate.is_some() {
            return Err(AmmError::ReferenceRateAlreadySet);
        }
        let rate = self.smoothed_rate()?;
        self.set_reference_rate(rate)?;
        Ok(rate)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn oracle(capacity: usize, interval: u64) -> RateOracle {
        let Ok(cfg) = OracleConfig::new(capacity, interval) else {
            panic!("valid config");
        };
        RateOracle::new(cfg)
    }

    fn record(o: &mut RateOracle, t: u64, r: f64) -> bool {
        let Ok(accepted) = o.record(Timestamp::new(t), Rate::from_f64(r)) else {
            panic!("record failed");
        };
        accepted
    }

    #[test]
    fn first_sample_always_due() {
        let mut o = oracle(31, 120);
        assert!(o.is_due(Timestamp::ZERO));
        assert!(record(&mut o, 0, 0.05));
        assert_eq!(o.len(), 1);
    }

    #[test]
    fn throttled_within_interval() {
        let mut o = oracle(31, 120);
        assert!(record(&mut o, 1_000, 0.05));
        assert!(!record(&mut o, 1_119, 0.06));
        assert!(record(&mut o, 1_120, 0.06));
        assert_eq!(o.len(), 2);
    }

    #[test]
    fn earlier_timestamp_never_due() {
        let mut o = oracle(31, 120);
        assert!(record(&mut o, 1_000, 0.05));
        assert!(!o.is_due(Timestamp::new(10)));
    }

    #[test]
    fn strict_record_reports_not_due() {
        let mut o = oracle(31, 120);
        assert!(o.record_strict(Timestamp::new(0), Rate::ZERO).is_ok());
        assert_eq!(
            o.record_strict(Timestamp::new(1), Rate::ZERO),
            Err(AmmError::RateNotDue)
        );
    }

    #[test]
    fn ring_overwrites_oldest() {
        let mut o = oracle(3, 10);
        for (i, r) in [0.01, 0.02, 0.03, 0.04].iter().enumerate() {
            assert!(record(&mut o, i as u64 * 10, *r));
        }
        let obs = o.observations();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].timestamp(), Timestamp::new(10));
        assert_eq!(obs[2].timestamp(), Timestamp::new(30));
        assert_eq!(o.latest().map(|l| l.timestamp()), Some(Timestamp::new(30)));
    }

    #[test]
    fn series_has_len_minus_one_entries() {
        let mut o = oracle(31, 100);
        assert!(record(&mut o, 0, 0.04));
        assert!(record(&mut o, 100, 0.06));
        assert!(record(&mut o, 300, 0.06));
        let Ok(series) = o.implied_rate_series() else {
            panic!("expected Ok");
        };
        assert_eq!(series.len(), 2);
        assert!((series[0].to_f64_lossy() - 0.05).abs() < 1e-9);
        assert!((series[1].to_f64_lossy() - 0.06).abs() < 1e-9);
    }

    #[test]
    fn smoothed_rate_is_time_weighted() {
        let mut o = oracle(31, 100);
        assert!(record(&mut o, 0, 0.05));
        assert!(record(&mut o, 100, 0.05));
        assert!(record(&mut o, 400, 0.05));
        let Ok(r) = o.smoothed_rate() else {
            panic!("expected Ok");
        };
        assert!((r.to_f64_lossy() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn smoothed_rate_needs_two_observations() {
        let mut o = oracle(31, 100);
        assert!(matches!(o.smoothed_rate(), Err(AmmError::OracleNotReady(_))));
        assert!(record(&mut o, 0, 0.05));
        assert!(matches!(o.smoothed_rate(), Err(AmmError::OracleNotReady(_))));
    }

    #[test]
    fn reference_rate_set_once() {
        let mut o = oracle(31, 100);
        assert!(o.set_reference_rate(Rate::from_f64(0.03)).is_ok());
        assert_eq!(
            o.set_reference_rate(Rate::from_f64(0.04)),
            Err(AmmError::ReferenceRateAlreadySet)
        );
        assert_eq!(o.commit_reference_rate(), Err(AmmError::ReferenceRateAlreadySet));
        assert_eq!(o.reference_rate(), Some(Rate::from_f64(0.03)));
    }

    #[test]
    fn commit_uses_smoothed_window() {
        let mut o = oracle(31, 100);
        assert!(record(&mut o, 0, 0.02));
        assert!(record(&mut o, 200, 0.04));
        let Ok(r) = o.commit_reference_rate() else {
            panic!("expected Ok");
        };
        assert!((r.to_f64_lossy() - 0.03).abs() < 1e-9);
        assert_eq!(o.reference_rate(), Some(r));
    }
}
