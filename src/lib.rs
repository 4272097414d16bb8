//! # Bond AMM
//!
//! Time-decaying automated market maker for maturity-dated bonds.
//!
//! A pool holds a bond (side A) against its underlying or yield claim
//! (side B) on the power-sum curve
//!
//! ```text
//! reserve_a^t + reserve_b^t = K,    t = 1 − (maturity − now) / anchor · g
//! ```
//!
//! Far from maturity the curve is strongly convex and the reserve ratio
//! encodes an annualized interest rate; as maturity approaches `t → 1`
//! and from maturity onwards the pool redeems 1:1.
//!
//! On top of the curve the crate provides:
//!
//! - **Liquidity shares** minted pro rata to deposits, transferable with
//!   allowances.
//! - **Rate oracle**: a throttled ring buffer of implied-rate samples with
//!   time-weighted smoothing and a one-time reference rate.
//! - **Dividends**: anything accruing to the pool beyond its reserves is
//!   harvested into checkpoints and paid to share holders pro rata.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `float` | no | `f64` precision backend for simulation |
//! | `serde` | no | `Serialize`/`Deserialize` for configs and value types |
//!
//! ## Seed a pool and trade
//!
//! ```rust
//! use bond_amm::prelude::*;
//!
//! let bond = Address::from_byte(1);
//! let cash = Address::from_byte(2);
//! let pool_account = Address::from_byte(0xF0);
//! let lp = Address::from_byte(0xA1);
//! let trader = Address::from_byte(0xB0);
//!
//! // 1. Describe the pool: matures in one year, anchored at ten.
//! let year = SECONDS_PER_YEAR;
//! let pair = TokenPair::new(bond, cash).expect("distinct assets");
//! let config = PoolConfig::new(pool_account, pair, PoolKind::BondUnderlying, Timestamp::new(year), 10 * year)
//!     .expect("valid config");
//! let mut pool = BondPool::from_config(&config).expect("pool created");
//!
//! // 2. Fund accounts on an in-memory ledger.
//! let mut ledger = InMemoryLedger::new();
//! for who in [lp, trader] {
//!     ledger.mint(&bond, &who, Amount::new(10_000_000)).expect("mint");
//!     ledger.mint(&cash, &who, Amount::new(10_000_000)).expect("mint");
//! }
//!
//! // 3. Open the pool at a 5% annual rate.
//! let now = Timestamp::new(0);
//! pool.first_deposit_at_rate(&mut ledger, &lp, Rate::from_f64(0.05), Amount::new(1_000_000), now)
//!     .expect("seeded");
//!
//! // 4. Buy bonds with 10 000 units of cash.
//! let spec = SwapSpec::exact_in(Side::B, Amount::new(10_000), Amount::ZERO).expect("non-zero");
//! let result = pool.swap(&mut ledger, &trader, spec, now).expect("swap succeeded");
//! assert!(result.amount_out() > Amount::new(10_000));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │     Host     │  owns balances via AssetLedger, supplies `now`
//! └──────┬───────┘
//!        │ &mut BondPool, &mut impl AssetLedger
//!        ▼
//! ┌──────────────┐
//! │   BondPool   │  SwapPool + LiquidityPool; oracle, shares, dividends
//! └──────┬───────┘
//!        │ curve_exponent / amount_out_for_exact_in / …
//!        ▼
//! ┌──────────────┐
//! │     Math     │  Precision backends, power-sum solver, rates
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Domain    │  Amount, Shares, Rate, Timestamp, SwapResult, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Rate`](domain::Rate), [`Timestamp`](domain::Timestamp), etc. |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`AssetLedger`](traits::AssetLedger), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Declarative pool blueprints: [`PoolConfig`](config::PoolConfig), [`OracleConfig`](config::OracleConfig) |
//! | [`pools`]  | [`BondPool`](pools::BondPool) and its oracle, share and dividend components |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) for simulation and tests |
//! | [`math`]   | Checked arithmetic, precision backends, curve math |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
