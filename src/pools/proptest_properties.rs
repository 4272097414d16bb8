//! Property-based tests using `proptest` for bond pool invariants.
//!
//! 1. **Swap reversibility**: round-trip A→B→A returns ≤ original.
//! 2. **Invariant preservation**: `a^t + b^t` never decreases across a
//!    trade priced at the same `t`.
//! 3. **Non-dilution**: a deposit never lowers reserves per share.
//! 4. **Liquidity round-trip**: deposit then withdraw never gains.
//! 5. **Redemption**: from maturity onwards trades are exactly 1:1.
//! 6. **Oracle smoothing**: the window average lies within the sampled
//!    range.
//! 7. **18-decimal reserves**: reversibility and invariant preservation
//!    hold where reserves are normalized before the curve math.

use proptest::prelude::*;

use crate::config::{OracleConfig, PoolConfig, PoolKind};
use crate::domain::{Address, Amount, Rate, Shares, Side, Timestamp, TokenPair};
use crate::ledger::InMemoryLedger;
use crate::math::{Precision, SECONDS_PER_YEAR};
use crate::pools::{BondPool, RateOracle};
use crate::traits::{AssetLedger, FromConfig, LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const BOND: Address = Address::from_byte(1);
const CASH: Address = Address::from_byte(2);
const POOL: Address = Address::from_byte(0xF0);
const SEED: Address = Address::from_byte(0xA1);
const TRADER: Address = Address::from_byte(0xB0);

const MATURITY: u64 = SECONDS_PER_YEAR;
const ANCHOR: u64 = 2 * SECONDS_PER_YEAR;
const FUNDING: u128 = 1_000_000_000_000;

fn make_pool(ra: u128, rb: u128) -> (BondPool, InMemoryLedger) {
    make_funded_pool(ra, rb, FUNDING)
}

fn make_funded_pool(ra: u128, rb: u128, funding: u128) -> (BondPool, InMemoryLedger) {
    let Ok(pair) = TokenPair::new(BOND, CASH) else {
        panic!("valid pair");
    };
    let Ok(cfg) = PoolConfig::new(POOL, pair, PoolKind::BondYieldClaim, Timestamp::new(MATURITY), ANCHOR) else {
        panic!("valid config");
    };
    let Ok(mut pool) = BondPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let mut ledger = InMemoryLedger::new();
    for who in [SEED, TRADER] {
        for asset in [BOND, CASH] {
            let Ok(()) = ledger.mint(&asset, &who, Amount::new(funding)) else {
                panic!("mint");
            };
        }
    }
    let Ok(_) = pool.first_deposit(&mut ledger, &SEED, Amount::new(ra), Amount::new(rb), Timestamp::ZERO) else {
        panic!("seed");
    };
    (pool, ledger)
}

fn power_sum(a: Amount, b: Amount, t: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let (a, b) = (a.get() as f64, b.get() as f64);
    a.powf(t) + b.powf(t)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// 18-decimal reserves between 1e21 and ~1e27 native units.
fn large_reserve_strategy() -> impl Strategy<Value = u128> {
    (1u128..=999u128, 21u32..=24u32).prop_map(|(mantissa, exp)| mantissa * 10u128.pow(exp))
}

/// A time strictly before maturity.
fn pre_maturity_strategy() -> impl Strategy<Value = u64> {
    0u64..MATURITY
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::A), Just(Side::B)]
}

// ---------------------------------------------------------------------------
// Property 1: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        now in pre_maturity_strategy(),
        side in side_strategy(),
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let now = Timestamp::new(now);
        let swap_in = (pool.reserves().get(side).get() / 1_000).max(1);

        let Ok(there) = pool.swap_exact_in(&mut ledger, &TRADER, side, Amount::new(swap_in), Amount::ZERO, now) else {
            return Ok(());
        };
        let Ok(back) = pool.swap_exact_in(&mut ledger, &TRADER, side.other(), there.amount_out(), Amount::ZERO, now) else {
            return Ok(());
        };

        prop_assert!(
            back.amount_out().get() <= swap_in,
            "round-trip should not gain: final={} > original={}",
            back.amount_out(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_preservation(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        now in pre_maturity_strategy(),
        side in side_strategy(),
        divisor in 10u128..=1_000u128,
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let now = Timestamp::new(now);
        let Ok(t) = pool.curve_exponent(now, side) else {
            return Ok(());
        };
        let t = t.to_f64_lossy();
        let before = pool.reserves();
        let swap_in = (before.get(side).get() / divisor).max(1);

        if pool.swap_exact_in(&mut ledger, &TRADER, side, Amount::new(swap_in), Amount::ZERO, now).is_err() {
            return Ok(());
        }
        let after = pool.reserves();

        let k_before = power_sum(before.a, before.b, t);
        let k_after = power_sum(after.a, after.b, t);
        prop_assert!(
            k_after >= k_before * (1.0 - 1e-9),
            "invariant should not shrink: k_after={} < k_before={}",
            k_after, k_before
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Non-dilution
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_does_not_dilute(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        deposit_a in 1u128..=1_000_000u128,
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let supply_before = pool.total_supply().get();
        let before = pool.reserves();

        let Ok(_) = pool.deposit(&mut ledger, &TRADER, Amount::new(deposit_a), Amount::new(FUNDING), Timestamp::ZERO) else {
            return Ok(());
        };
        let supply_after = pool.total_supply().get();
        let after = pool.reserves();

        // reserve / supply never decreases: r_after · s_before >= r_before · s_after
        prop_assert!(after.a.get() * supply_before >= before.a.get() * supply_after);
        prop_assert!(after.b.get() * supply_before >= before.b.get() * supply_after);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Liquidity Round-trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_withdraw_never_gains(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        deposit_a in 1u128..=1_000_000u128,
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let Ok(minted) = pool.deposit(&mut ledger, &TRADER, Amount::new(deposit_a), Amount::new(FUNDING), Timestamp::ZERO) else {
            return Ok(());
        };
        prop_assert!(minted > Shares::ZERO);
        let Ok(_) = pool.withdraw(&mut ledger, &TRADER, minted, Timestamp::ZERO) else {
            return Ok(());
        };
        prop_assert!(ledger_balance(&ledger, BOND) <= FUNDING);
        prop_assert!(ledger_balance(&ledger, CASH) <= FUNDING);
    }
}

fn ledger_balance(ledger: &InMemoryLedger, asset: Address) -> u128 {
    ledger.balance_of(&asset, &TRADER).get()
}

// ---------------------------------------------------------------------------
// Property 5: Redemption at Maturity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_one_to_one_at_maturity(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        after in 0u64..=SECONDS_PER_YEAR,
        side in side_strategy(),
    ) {
        let (pool, _) = make_pool(ra, rb);
        let now = Timestamp::new(MATURITY + after);
        let amount = (pool.reserves().get(side.other()).get() / 2).max(1);

        let Ok(quote) = pool.quote_exact_in(side, Amount::new(amount), now) else {
            return Ok(());
        };
        prop_assert_eq!(quote.amount_out(), Amount::new(amount));
        prop_assert!(quote.is_linear());
    }

    #[test]
    fn prop_balanced_pool_never_pays_premium(
        reserve in reserve_strategy(),
        now in pre_maturity_strategy(),
        side in side_strategy(),
    ) {
        let (pool, _) = make_pool(reserve, reserve);
        let amount = (reserve / 100).max(1);
        let Ok(quote) = pool.quote_exact_in(side, Amount::new(amount), Timestamp::new(now)) else {
            return Ok(());
        };
        prop_assert!(quote.amount_out() <= Amount::new(amount));
    }
}

// ---------------------------------------------------------------------------
// Property 6: Oracle Smoothing
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_smoothed_rate_within_sampled_range(
        samples in prop::collection::vec((0u32..=5_000u32, 120u64..=3_600u64), 2..40),
    ) {
        let Ok(cfg) = OracleConfig::new(31, 120) else {
            panic!("valid oracle config");
        };
        let mut oracle = RateOracle::new(cfg);
        let mut now = 0u64;
        for (bps, gap) in &samples {
            now += gap;
            let rate = Rate::from_f64(f64::from(*bps) / 10_000.0);
            let Ok(true) = oracle.record(Timestamp::new(now), rate) else {
                panic!("sample should be due");
            };
        }
        let stored = oracle.observations();
        let lo = stored.iter().map(|o| o.rate().to_f64_lossy()).fold(f64::INFINITY, f64::min);
        let hi = stored.iter().map(|o| o.rate().to_f64_lossy()).fold(f64::NEG_INFINITY, f64::max);
        let Ok(smoothed) = oracle.smoothed_rate() else {
            panic!("at least two samples");
        };
        let smoothed = smoothed.to_f64_lossy();
        prop_assert!(smoothed >= lo - 1e-9 && smoothed <= hi + 1e-9, "{} outside [{}, {}]", smoothed, lo, hi);
        let Ok(series) = oracle.implied_rate_series() else {
            panic!("series");
        };
        prop_assert_eq!(series.len(), stored.len() - 1);
    }
}

// ---------------------------------------------------------------------------
// Property 7: 18-decimal Reserves
// ---------------------------------------------------------------------------

const LARGE_FUNDING: u128 = 10u128.pow(30);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_large_reserve_round_trip_never_gains(
        ra in large_reserve_strategy(),
        rb in large_reserve_strategy(),
        now in pre_maturity_strategy(),
        side in side_strategy(),
        divisor in 100u128..=100_000u128,
    ) {
        let (mut pool, mut ledger) = make_funded_pool(ra, rb, LARGE_FUNDING);
        let now = Timestamp::new(now);
        let swap_in = (pool.reserves().get(side).get() / divisor).max(1);

        let Ok(there) = pool.swap_exact_in(&mut ledger, &TRADER, side, Amount::new(swap_in), Amount::ZERO, now) else {
            return Ok(());
        };
        let Ok(back) = pool.swap_exact_in(&mut ledger, &TRADER, side.other(), there.amount_out(), Amount::ZERO, now) else {
            return Ok(());
        };

        prop_assert!(
            back.amount_out().get() <= swap_in,
            "round-trip should not gain: final={} > original={}",
            back.amount_out(), swap_in
        );
        prop_assert!(ledger.balance_of(&BOND, &TRADER).get() <= LARGE_FUNDING);
        prop_assert!(ledger.balance_of(&CASH, &TRADER).get() <= LARGE_FUNDING);
    }

    #[test]
    fn prop_large_reserve_invariant_preservation(
        ra in large_reserve_strategy(),
        rb in large_reserve_strategy(),
        now in pre_maturity_strategy(),
        side in side_strategy(),
        divisor in 10u128..=100_000u128,
        exact_out in any::<bool>(),
    ) {
        let (mut pool, mut ledger) = make_funded_pool(ra, rb, LARGE_FUNDING);
        let now = Timestamp::new(now);
        let Ok(t) = pool.curve_exponent(now, side) else {
            return Ok(());
        };
        let t = t.to_f64_lossy();
        let before = pool.reserves();

        let traded = if exact_out {
            let amount_out = (before.get(side.other()).get() / divisor).max(1);
            pool.swap_exact_out(&mut ledger, &TRADER, side.other(), Amount::new(amount_out), Amount::new(LARGE_FUNDING), now)
        } else {
            let amount_in = (before.get(side).get() / divisor).max(1);
            pool.swap_exact_in(&mut ledger, &TRADER, side, Amount::new(amount_in), Amount::ZERO, now)
        };
        if traded.is_err() {
            return Ok(());
        }
        let after = pool.reserves();

        let k_before = power_sum(before.a, before.b, t);
        let k_after = power_sum(after.a, after.b, t);
        prop_assert!(
            k_after >= k_before * (1.0 - 1e-14),
            "invariant should not shrink: k_after={} < k_before={}",
            k_after, k_before
        );
    }
}
