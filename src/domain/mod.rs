//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model a bond pool: asset
//! and account addresses, amounts and shares, timestamps, fee constants,
//! rates, prices and swap specifications.  All types are newtypes; those
//! with invariants expose validated constructors.

mod address;
mod amount;
mod asset_amounts;
mod fee_constant;
mod price;
mod rate;
mod rounding;
mod shares;
mod side;
mod swap_result;
mod swap_spec;
mod timestamp;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use asset_amounts::AssetAmounts;
pub use fee_constant::{FEE_CONSTANT_SCALE, FeeConstant};
pub use price::Price;
pub use rate::Rate;
pub use rounding::Rounding;
pub use shares::Shares;
pub use side::Side;
pub use swap_result::SwapResult;
pub use swap_spec::SwapSpec;
pub use timestamp::Timestamp;
pub use token_pair::TokenPair;
