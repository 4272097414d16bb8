//! Unified error types for the bond AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every variant is a per-call rejection: an operation that
//! returns `Err` leaves the pool exactly as it found it.

use thiserror::Error;

/// Error returned by every fallible operation in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Invalid input to the power function (non-positive base).
    #[error("domain error: {0}")]
    DomainError(&'static str),

    /// The curve cannot support the requested trade size.
    #[error("insufficient liquidity for the requested trade")]
    InsufficientLiquidity,

    /// The resulting amount violates a caller-declared bound.
    #[error("slippage bound exceeded")]
    SlippageExceeded,

    /// A withdrawal or transfer exceeds the caller's holdings.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A spender tried to move more shares than it was approved for.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A dividend harvest found no surplus on any tracked asset.
    #[error("nothing to harvest")]
    NothingToHarvest,

    /// A strict rate sample was requested before the minimum interval.
    #[error("rate sample not due")]
    RateNotDue,

    /// The oracle does not hold enough observations for the request.
    #[error("oracle not ready: {0}")]
    OracleNotReady(&'static str),

    /// The one-time reference rate was already committed.
    #[error("reference rate already set")]
    ReferenceRateAlreadySet,

    /// `first_deposit` was called on a pool that already holds liquidity.
    #[error("pool already initialized")]
    AlreadyInitialized,

    /// The operation requires a pool that has received its first deposit.
    #[error("pool not initialized")]
    NotInitialized,

    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A reserve required by the computation is zero.
    #[error("zero reserve")]
    ZeroReserve,

    /// Invalid pool or oracle configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Invalid quantity (zero amount, dust deposit, ...).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// The asset is not one of the pool's two assets.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// The execution host refused a transfer.
    #[error("ledger rejected transfer: {0}")]
    LedgerRejected(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
