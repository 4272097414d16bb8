//! Pool configuration structs.
//!
//! [`PoolConfig`] is the declarative blueprint for a bond pool; it embeds
//! an [`OracleConfig`] and a [`PoolKind`].  Pools are built from it through
//! [`FromConfig`](crate::traits::FromConfig).

mod oracle_config;
mod pool_config;
mod pool_kind;

pub use oracle_config::{DEFAULT_MIN_SAMPLE_INTERVAL, DEFAULT_ORACLE_CAPACITY, OracleConfig};
pub use pool_config::PoolConfig;
pub use pool_kind::PoolKind;
