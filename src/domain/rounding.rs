//! Explicit rounding direction for arithmetic operations.

/// Rounding direction for every division in the engine.
///
/// The pool always rounds against the caller: amounts paid out round
/// [`Down`](Rounding::Down), amounts owed to the pool round
/// [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use bond_amm::domain::Rounding;
///
/// assert_eq!(Rounding::for_payout(), Rounding::Down);
/// assert_eq!(Rounding::for_charge(), Rounding::Up);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Direction for amounts the pool pays out.
    #[must_use]
    pub const fn for_payout() -> Self {
        Self::Down
    }

    /// Direction for amounts the pool collects.
    #[must_use]
    pub const fn for_charge() -> Self {
        Self::Up
    }

    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_rounds_down() {
        assert!(!Rounding::for_payout().is_up());
    }

    #[test]
    fn charge_rounds_up() {
        assert!(Rounding::for_charge().is_up());
    }
}
