//! The two assets traded by a pool.

use super::{Address, Side};
use crate::error::AmmError;

/// The asset pair of a pool: the bond on side A and its counter asset
/// on side B.
///
/// Unlike a canonical AMM pair the order is semantic, not sorted: the
/// curve's implied rate is defined as bonds per counter unit.
///
/// # Examples
///
/// ```
/// use bond_amm::domain::{Address, Side, TokenPair};
///
/// let bond = Address::from_byte(1);
/// let underlying = Address::from_byte(2);
/// let pair = TokenPair::new(bond, underlying).expect("distinct assets");
/// assert_eq!(pair.asset(Side::A), bond);
/// assert_eq!(pair.side_of(&underlying).expect("member"), Side::B);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenPair {
    bond: Address,
    counter: Address,
}

impl TokenPair {
    /// Creates a new pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both assets share an address.
    pub fn new(bond: Address, counter: Address) -> Result<Self, AmmError> {
        if bond == counter {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { bond, counter })
    }

    /// Returns the bond asset (side A).
    #[must_use]
    pub const fn bond(&self) -> Address {
        self.bond
    }

    /// Returns the counter asset (side B).
    #[must_use]
    pub const fn counter(&self) -> Address {
        self.counter
    }

    /// Returns the asset held on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> Address {
        match side {
            Side::A => self.bond,
            Side::B => self.counter,
        }
    }

    /// Returns the side holding `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `asset` is not in the pair.
    pub fn side_of(&self, asset: &Address) -> Result<Side, AmmError> {
        if *asset == self.bond {
            Ok(Side::A)
        } else if *asset == self.counter {
            Ok(Side::B)
        } else {
            Err(AmmError::InvalidToken("asset is not part of this pair"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn same_address_rejected() {
        let a = Address::from_byte(1);
        assert!(matches!(
            TokenPair::new(a, a),
            Err(AmmError::InvalidToken(_))
        ));
    }

    #[test]
    fn order_is_preserved() {
        let Ok(pair) = TokenPair::new(Address::from_byte(9), Address::from_byte(1)) else {
            panic!("valid pair");
        };
        assert_eq!(pair.bond(), Address::from_byte(9));
        assert_eq!(pair.counter(), Address::from_byte(1));
    }

    #[test]
    fn side_lookup() {
        let Ok(pair) = TokenPair::new(Address::from_byte(1), Address::from_byte(2)) else {
            panic!("valid pair");
        };
        assert_eq!(pair.side_of(&Address::from_byte(1)), Ok(Side::A));
        assert_eq!(pair.side_of(&Address::from_byte(2)), Ok(Side::B));
        assert!(pair.side_of(&Address::from_byte(3)).is_err());
        assert_eq!(pair.asset(Side::B), Address::from_byte(2));
    }
}
