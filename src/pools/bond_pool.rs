//! Time-decaying power-sum pool for maturity-dated bonds.
//!
//! The swap invariant is
//!
//! ```text
//! reserve_a^t + reserve_b^t = K,    t = 1 − (maturity − now) / anchor · g
//! ```
//!
//! where side A holds the bond and side B its underlying (or yield claim).
//! `g` is `fee_constant_buy` when the trader pays side B in and
//! `fee_constant_sell` when side A is paid in; the spread between the two
//! directions is the pool's fee.  `t` is re-derived from `now` on every
//! call and reaches exactly one at maturity, after which bonds and the
//! underlying trade 1:1.
//!
//! # Execution Order
//!
//! Every mutating call follows the same sequence, so a failure in any of
//! the first three steps leaves the pool untouched:
//!
//! 1. Price the whole outcome, including dividend payouts.
//! 2. Verify every payer's ledger balance.
//! 3. Commit pool state (oracle sample first, on pre-trade reserves).
//! 4. Issue ledger transfers.
//!
//! # Dividends
//!
//! Anything the pool's ledger account holds beyond its reserves and
//! not-yet-paid dividends can be harvested into a checkpoint and is paid
//! to share holders pro rata.  Pending dividends are settled before any
//! share balance changes.

use tracing::{debug, info, warn};

use super::{DividendCheckpoint, DividendLedger, RateObservation, RateOracle, ShareLedger};
use crate::config::{PoolConfig, PoolKind};
use crate::domain::{
    Address, Amount, AssetAmounts, FeeConstant, Price, Rate, Rounding, Shares, Side, SwapResult,
    SwapSpec, Timestamp, TokenPair,
};
use crate::error::AmmError;
use crate::math::{self, CheckedArithmetic, FixedPointArithmetic};
use crate::traits::{
    AssetLedger, FromConfig, LiquidityPool, SwapPool, Transfer, check_payers, execute_transfers,
};

/// A bond pool over one asset pair and one maturity.
///
/// Created empty from a [`PoolConfig`] via [`FromConfig`]; the first
/// deposit sets the reserves and therefore the opening rate.
///
/// # State
///
/// - `reserves`: pool-owned balances of both sides, in native units
/// - `shares`: liquidity share balances, allowances and supply
/// - `oracle`: throttled ring buffer of implied-rate samples
/// - `dividends`: harvest checkpoints and per-account claim cursors
/// - `inception`: time of the first deposit
///
/// # Example
///
/// ```rust
/// use bond_amm::config::{PoolConfig, PoolKind};
/// use bond_amm::domain::{Address, Amount, Side, Timestamp, TokenPair};
/// use bond_amm::ledger::InMemoryLedger;
/// use bond_amm::pools::BondPool;
/// use bond_amm::traits::{AssetLedger, FromConfig, LiquidityPool, SwapPool};
///
/// let (bond, cash, pool_acct, alice) = (
///     Address::from_byte(1),
///     Address::from_byte(2),
///     Address::from_byte(0xF0),
///     Address::from_byte(0xA1),
/// );
/// let pair = TokenPair::new(bond, cash).expect("distinct");
/// let year = 31_557_600;
/// let cfg = PoolConfig::new(pool_acct, pair, PoolKind::BondUnderlying, Timestamp::new(year), 2 * year)
///     .expect("valid config");
/// let mut pool = BondPool::from_config(&cfg).expect("pool created");
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&bond, &alice, Amount::new(200_000)).expect("mint");
/// ledger.mint(&cash, &alice, Amount::new(200_000)).expect("mint");
///
/// let now = Timestamp::new(0);
/// pool.first_deposit(&mut ledger, &alice, Amount::new(100_000), Amount::new(100_000), now)
///     .expect("seeded");
/// let result = pool
///     .swap_exact_in(&mut ledger, &alice, Side::A, Amount::new(1_000), Amount::ZERO, now)
///     .expect("swap ok");
/// assert!(result.amount_out() < Amount::new(1_000));
/// assert_eq!(ledger.balance_of(&cash, &pool_acct), pool.reserves().b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondPool {
    config: PoolConfig,
    reserves: AssetAmounts,
    shares: ShareLedger,
    oracle: RateOracle,
    dividends: DividendLedger,
    inception: Option<Timestamp>,
}

impl BondPool {
    /// Returns the configuration the pool was built from.
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the pool's own ledger account.
    pub const fn address(&self) -> Address {
        self.config.address()
    }

    /// Returns the pool flavor.
    pub const fn kind(&self) -> PoolKind {
        self.config.kind()
    }

    /// Returns the maturity timestamp.
    pub const fn maturity(&self) -> Timestamp {
        self.config.maturity()
    }

    /// Returns the time of the first deposit, if any.
    pub const fn inception(&self) -> Option<Timestamp> {
        self.inception
    }

    /// Returns `true` once shares exist.
    pub const fn is_initialized(&self) -> bool {
        !self.shares.total_supply().is_zero()
    }

    /// Seconds left until maturity, zero from maturity onwards.
    pub const fn time_to_maturity(&self, now: Timestamp) -> u64 {
        now.seconds_until(self.config.maturity())
    }

    fn asset(&self, side: Side) -> Address {
        self.config.token_pair().asset(side)
    }

    fn ensure_initialized(&self) -> Result<(), AmmError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(AmmError::NotInitialized)
        }
    }

    /// Curve exponent for a trade paying `side_in` into the pool at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the exponent is not
    /// strictly positive at `now`.
    pub fn curve_exponent(&self, now: Timestamp, side_in: Side) -> Result<FixedPointArithmetic, AmmError> {
        let g = match side_in {
            Side::B => self.config.fee_constant_buy(),
            Side::A => self.config.fee_constant_sell(),
        };
        math::curve_exponent(self.time_to_maturity(now), self.config.anchor(), g)
    }

    fn mid_exponent(&self, now: Timestamp) -> Result<FixedPointArithmetic, AmmError> {
        math::curve_exponent(self.time_to_maturity(now), self.config.anchor(), FeeConstant::ONE)
    }

    /// Annualized rate implied by the current reserves on the mid curve;
    /// zero from maturity onwards.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::Overflow`] if the rate is not representable.
    pub fn implied_rate(&self, now: Timestamp) -> Result<Rate, AmmError> {
        self.ensure_initialized()?;
        math::implied_annual_rate::<FixedPointArithmetic>(
            self.reserves.a,
            self.reserves.b,
            self.time_to_maturity(now),
            self.config.anchor(),
        )
        .map(Rate::new)
    }

    // ── swaps ───────────────────────────────────────────────────────────

    /// Prices paying exactly `amount_in` of `side_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::InvalidQuantity`] if the input is zero or buys nothing.
    /// - [`AmmError::InsufficientLiquidity`] if the curve cannot absorb it.
    pub fn quote_exact_in(&self, side_in: Side, amount_in: Amount, now: Timestamp) -> Result<SwapResult, AmmError> {
        self.ensure_initialized()?;
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        let t = self.curve_exponent(now, side_in)?;
        let amount_out = math::amount_out_for_exact_in(
            self.reserves.get(side_in),
            self.reserves.get(side_in.other()),
            &t,
            amount_in,
        )?;
        let result = SwapResult::new(side_in, amount_in, amount_out, t)?;
        debug!(side_in = %side_in, amount_in = %amount_in, amount_out = %amount_out, "quoted exact in");
        Ok(result)
    }

    /// Prices receiving exactly `amount_out` of `side_out`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::InvalidQuantity`] if the output is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` would drain
    ///   the reserve.
    pub fn quote_exact_out(&self, side_out: Side, amount_out: Amount, now: Timestamp) -> Result<SwapResult, AmmError> {
        self.ensure_initialized()?;
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        let side_in = side_out.other();
        let t = self.curve_exponent(now, side_in)?;
        let amount_in = math::amount_in_for_exact_out(
            self.reserves.get(side_in),
            self.reserves.get(side_out),
            &t,
            amount_out,
        )?;
        let result = SwapResult::new(side_in, amount_in, amount_out, t)?;
        debug!(side_out = %side_out, amount_in = %amount_in, amount_out = %amount_out, "quoted exact out");
        Ok(result)
    }

    /// Pays exactly `amount_in` of `side_in` and receives at least
    /// `min_amount_out` of the other side.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_amount_out`.
    /// - [`AmmError::InsufficientBalance`] if `trader` cannot pay.
    /// - Any pricing error of [`quote_exact_in`](Self::quote_exact_in).
    pub fn swap_exact_in<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        trader: &Address,
        side_in: Side,
        amount_in: Amount,
        min_amount_out: Amount,
        now: Timestamp,
    ) -> Result<SwapResult, AmmError> {
        let result = self.quote_exact_in(side_in, amount_in, now)?;
        if result.amount_out() < min_amount_out {
            return Err(AmmError::SlippageExceeded);
        }
        self.settle_swap(ledger, trader, result, now)
    }

    /// Receives exactly `amount_out` of `side_out` and pays at most
    /// `max_amount_in` of the other side.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if the input exceeds
    ///   `max_amount_in`.
    /// - [`AmmError::InsufficientBalance`] if `trader` cannot pay.
    /// - Any pricing error of [`quote_exact_out`](Self::quote_exact_out).
    pub fn swap_exact_out<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        trader: &Address,
        side_out: Side,
        amount_out: Amount,
        max_amount_in: Amount,
        now: Timestamp,
    ) -> Result<SwapResult, AmmError> {
        let result = self.quote_exact_out(side_out, amount_out, now)?;
        if result.amount_in() > max_amount_in {
            return Err(AmmError::SlippageExceeded);
        }
        self.settle_swap(ledger, trader, result, now)
    }

    fn settle_swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        trader: &Address,
        result: SwapResult,
        now: Timestamp,
    ) -> Result<SwapResult, AmmError> {
        let (side_in, side_out) = (result.side_in(), result.side_out());
        let pool = self.address();
        let transfers = [
            Transfer::new(self.asset(side_in), *trader, pool, result.amount_in()),
            Transfer::new(self.asset(side_out), pool, *trader, result.amount_out()),
        ];
        check_payers(ledger, &transfers)?;

        let mut reserves = self.reserves;
        *reserves.get_mut(side_in) = reserves.get(side_in).safe_add(&result.amount_in())?;
        *reserves.get_mut(side_out) = reserves
            .get(side_out)
            .checked_sub(&result.amount_out())
            .ok_or(AmmError::InsufficientLiquidity)?;

        self.sample_if_due(now);
        self.reserves = reserves;
        execute_transfers(ledger, &transfers)?;

        info!(
            trader = %trader,
            side_in = %side_in,
            amount_in = %result.amount_in(),
            amount_out = %result.amount_out(),
            "swap executed"
        );
        Ok(result)
    }

    // ── liquidity ───────────────────────────────────────────────────────

    /// Seeds an empty pool at `rate`: pairs `amount_b` with
    /// `amount_b · (1 + rate)^(anchor / YEAR)` of side A.
    ///
    /// Used to open a pool at another pool's reference rate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DomainError`] if `rate <= −1`.
    /// - Any error of [`LiquidityPool::first_deposit`].
    pub fn first_deposit_at_rate<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        rate: Rate,
        amount_b: Amount,
        now: Timestamp,
    ) -> Result<Shares, AmmError> {
        let amount_a = math::reserve_a_for_rate(&rate.get(), amount_b, self.config.anchor())?;
        debug!(rate = %rate, amount_a = %amount_a, amount_b = %amount_b, "opening at rate");
        self.first_deposit(ledger, provider, amount_a, amount_b, now)
    }

    fn payout_transfers(&self, to: &Address, payout: AssetAmounts) -> [Transfer; 2] {
        let pool = self.address();
        Side::BOTH.map(|side| Transfer::new(self.asset(side), pool, *to, payout.get(side)))
    }

    // ── oracle ──────────────────────────────────────────────────────────

    /// Records the pre-trade implied rate when a sample is due.
    ///
    /// Sampling never fails the surrounding operation.
    fn sample_if_due(&mut self, now: Timestamp) {
        if !self.oracle.is_due(now) {
            return;
        }
        let recorded = self
            .implied_rate(now)
            .and_then(|rate| self.oracle.record(now, rate));
        if let Err(err) = recorded {
            warn!(now = %now, error = %err, "rate sample skipped");
        }
    }

    /// Records the current implied rate if the sampling interval has
    /// elapsed; returns whether a sample was taken.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::Overflow`] if the rate is not representable.
    pub fn force_rate_sample(&mut self, now: Timestamp) -> Result<bool, AmmError> {
        let rate = self.implied_rate(now)?;
        self.oracle.record(now, rate)
    }

    /// Records the current implied rate, failing if not due.
    ///
    /// # Errors
    ///
    /// - [`AmmError::RateNotDue`] if the sampling interval has not elapsed.
    /// - [`AmmError::NotInitialized`] for an empty pool.
    pub fn sample_rate(&mut self, now: Timestamp) -> Result<Rate, AmmError> {
        let rate = self.implied_rate(now)?;
        if !self.oracle.is_due(now) {
            warn!(now = %now, "rate sample requested before due");
            return Err(AmmError::RateNotDue);
        }
        self.oracle.record_strict(now, rate)?;
        Ok(rate)
    }

    /// Read access to the oracle.
    pub const fn oracle(&self) -> &RateOracle {
        &self.oracle
    }

    /// Stored observations, oldest first.
    pub fn observations(&self) -> Vec<RateObservation> {
        self.oracle.observations()
    }

    /// Per-interval time-weighted rates, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates fixed-point arithmetic errors.
    pub fn implied_rate_series(&self) -> Result<Vec<Rate>, AmmError> {
        self.oracle.implied_rate_series()
    }

    /// Time-weighted mean rate over the oracle window.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::OracleNotReady`] with fewer than two samples.
    pub fn smoothed_rate(&self) -> Result<Rate, AmmError> {
        self.oracle.smoothed_rate()
    }

    /// The committed reference rate, if any.
    pub const fn reference_rate(&self) -> Option<Rate> {
        self.oracle.reference_rate()
    }

    /// Commits `rate` as the reference rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReferenceRateAlreadySet`] on a second commit.
    pub fn set_reference_rate(&mut self, rate: Rate) -> Result<(), AmmError> {
        self.oracle.set_reference_rate(rate)
    }

    /// Commits the smoothed window rate as the reference rate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ReferenceRateAlreadySet`] on a second commit.
    /// - [`AmmError::OracleNotReady`] with fewer than two samples.
    pub fn commit_reference_rate(&mut self) -> Result<Rate, AmmError> {
        self.oracle.commit_reference_rate()
    }

    // ── dividends ───────────────────────────────────────────────────────

    fn held<L: AssetLedger>(&self, ledger: &L) -> AssetAmounts {
        let pool = self.address();
        AssetAmounts::new(
            ledger.balance_of(&self.asset(Side::A), &pool),
            ledger.balance_of(&self.asset(Side::B), &pool),
        )
    }

    /// Amounts the pool holds beyond reserves and unpaid dividends.
    pub fn harvestable<L: AssetLedger>(&self, ledger: &L) -> AssetAmounts {
        self.dividends.harvestable(self.held(ledger), self.reserves)
    }

    /// Harvests everything [`harvestable`](Self::harvestable) into a new
    /// dividend checkpoint apportioned by the current supply.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::NothingToHarvest`] if nothing is harvestable.
    pub fn contract_claim_dividend<L: AssetLedger>(&mut self, ledger: &L) -> Result<AssetAmounts, AmmError> {
        self.ensure_initialized()?;
        let harvested = self.harvestable(ledger);
        let index = self
            .dividends
            .record_harvest(harvested, self.shares.total_supply())?;
        info!(index, harvested = %harvested, "dividends harvested");
        Ok(harvested)
    }

    /// Pays `account`'s pending dividends to `to`.
    ///
    /// Returns the amounts paid, which may be zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::LedgerRejected`] if the ledger refuses a
    /// payout.
    pub fn claim_dividend<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        account: &Address,
        to: &Address,
    ) -> Result<AssetAmounts, AmmError> {
        let balance = self.shares.balance_of(account);
        let payout = self.dividends.pending(account, balance)?;
        let transfers = self.payout_transfers(to, payout);
        check_payers(ledger, &transfers)?;

        self.dividends.settle(account, balance)?;
        execute_transfers(ledger, &transfers)?;

        info!(account = %account, to = %to, payout = %payout, "dividends claimed");
        Ok(payout)
    }

    /// Dividends `account` could claim now.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the payout does not fit.
    pub fn pending_dividend(&self, account: &Address) -> Result<AssetAmounts, AmmError> {
        self.dividends.pending(account, self.shares.balance_of(account))
    }

    /// Harvest checkpoints, genesis first.
    pub fn checkpoints(&self) -> &[DividendCheckpoint] {
        self.dividends.checkpoints()
    }

    // ── share token ─────────────────────────────────────────────────────

    /// Shares `spender` may move on behalf of `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.shares.allowance(owner, spender)
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Shares) {
        self.shares.approve(owner, spender, amount);
        debug!(owner = %owner, spender = %spender, amount = %amount, "share allowance set");
    }

    /// Moves `amount` shares from `from` to `to`, settling both accounts'
    /// dividends first.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds fewer.
    pub fn transfer<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        from: &Address,
        to: &Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.move_shares(ledger, None, from, to, amount)
    }

    /// Moves `amount` of `from`'s shares to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too small.
    /// - [`AmmError::InsufficientBalance`] if `from` holds fewer.
    pub fn transfer_from<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.move_shares(ledger, Some(spender), from, to, amount)
    }

    fn move_shares<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        spender: Option<&Address>,
        from: &Address,
        to: &Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        if spender.is_some_and(|spender| self.shares.allowance(from, spender) < amount) {
            return Err(AmmError::InsufficientAllowance);
        }
        let from_balance = self.shares.balance_of(from);
        if from_balance < amount {
            return Err(AmmError::InsufficientBalance);
        }
        let to_balance = self.shares.balance_of(to);
        let from_payout = self.dividends.pending(from, from_balance)?;
        let to_payout = if from == to {
            AssetAmounts::ZERO
        } else {
            self.dividends.pending(to, to_balance)?
        };
        let mut transfers = Vec::with_capacity(4);
        transfers.extend(self.payout_transfers(from, from_payout));
        transfers.extend(self.payout_transfers(to, to_payout));
        check_payers(ledger, &transfers)?;

        self.dividends.settle(from, from_balance)?;
        if from != to {
            self.dividends.settle(to, to_balance)?;
        }
        if let Some(spender) = spender {
            self.shares.spend_allowance(from, spender, amount)?;
        }
        self.shares.transfer(from, to, amount)?;
        execute_transfers(ledger, &transfers)?;

        debug!(from = %from, to = %to, amount = %amount, "shares transferred");
        Ok(())
    }
}

impl FromConfig<PoolConfig> for BondPool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config: *config,
            reserves: AssetAmounts::ZERO,
            shares: ShareLedger::new(),
            oracle: RateOracle::new(config.oracle()),
            dividends: DividendLedger::new(),
            inception: None,
        })
    }
}

impl SwapPool for BondPool {
    fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        trader: &Address,
        spec: SwapSpec,
        now: Timestamp,
    ) -> Result<SwapResult, AmmError> {
        match spec {
            SwapSpec::ExactIn {
                side_in,
                amount_in,
                min_amount_out,
            } => self.swap_exact_in(ledger, trader, side_in, amount_in, min_amount_out, now),
            SwapSpec::ExactOut {
                side_out,
                amount_out,
                max_amount_in,
            } => self.swap_exact_out(ledger, trader, side_out, amount_out, max_amount_in, now),
        }
    }

    fn quote(&self, spec: SwapSpec, now: Timestamp) -> Result<SwapResult, AmmError> {
        match spec {
            SwapSpec::ExactIn {
                side_in, amount_in, ..
            } => self.quote_exact_in(side_in, amount_in, now),
            SwapSpec::ExactOut {
                side_out,
                amount_out,
                ..
            } => self.quote_exact_out(side_out, amount_out, now),
        }
    }

    /// Mid-curve marginal price of one bond in side-B units:
    /// `(b / a)^(1 − t)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::InvalidConfiguration`] if the mid exponent is not
    ///   positive at `now`.
    fn spot_price(&self, now: Timestamp) -> Result<Price, AmmError> {
        self.ensure_initialized()?;
        let t = self.mid_exponent(now)?;
        Price::new(math::spot_price(self.reserves.a, self.reserves.b, &t)?)
    }

    fn token_pair(&self) -> &TokenPair {
        self.config.token_pair()
    }

    fn reserves(&self) -> AssetAmounts {
        self.reserves
    }
}

impl LiquidityPool for BondPool {
    /// Seeds the pool, minting `amount_a` shares and taking the first
    /// oracle sample.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyInitialized`] if shares exist.
    /// - [`AmmError::InvalidQuantity`] if either amount is zero.
    /// - [`AmmError::InvalidConfiguration`] if the curve has no positive
    ///   exponent at `now`.
    /// - [`AmmError::InsufficientBalance`] if `provider` cannot pay.
    fn first_deposit<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        amount_a: Amount,
        amount_b: Amount,
        now: Timestamp,
    ) -> Result<Shares, AmmError> {
        if self.is_initialized() {
            return Err(AmmError::AlreadyInitialized);
        }
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidQuantity(
                "first deposit requires both sides",
            ));
        }
        for side in Side::BOTH {
            self.curve_exponent(now, side)?;
        }
        let pool = self.address();
        let transfers = [
            Transfer::new(self.asset(Side::A), *provider, pool, amount_a),
            Transfer::new(self.asset(Side::B), *provider, pool, amount_b),
        ];
        check_payers(ledger, &transfers)?;

        let minted = Shares::from(amount_a);
        self.dividends.settle(provider, Shares::ZERO)?;
        self.shares.mint(provider, minted)?;
        self.reserves = AssetAmounts::new(amount_a, amount_b);
        self.inception = Some(now);
        self.sample_if_due(now);
        execute_transfers(ledger, &transfers)?;

        info!(
            provider = %provider,
            amount_a = %amount_a,
            amount_b = %amount_b,
            shares = %minted,
            "pool seeded"
        );
        Ok(minted)
    }

    /// Deposits at the current reserve ratio.  Side A drives the share
    /// count; both required amounts round up.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::InvalidQuantity`] if `max_a` mints no shares.
    /// - [`AmmError::SlippageExceeded`] if side B required exceeds `max_b`.
    /// - [`AmmError::InsufficientBalance`] if `provider` cannot pay.
    fn deposit<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        max_a: Amount,
        max_b: Amount,
        now: Timestamp,
    ) -> Result<Shares, AmmError> {
        self.ensure_initialized()?;
        let supply = self.shares.total_supply();
        let minted = Shares::from(max_a.safe_mul_div(supply.get(), self.reserves.a.get(), Rounding::Down)?);
        if minted.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit too small to mint shares"));
        }
        let required = |reserve: Amount| {
            minted
                .as_amount()
                .safe_mul_div(reserve.get(), supply.get(), Rounding::Up)
        };
        let amount_a = required(self.reserves.a)?;
        let amount_b = required(self.reserves.b)?;
        if amount_b > max_b {
            return Err(AmmError::SlippageExceeded);
        }

        let balance = self.shares.balance_of(provider);
        let payout = self.dividends.pending(provider, balance)?;
        let pool = self.address();
        let mut transfers = vec![
            Transfer::new(self.asset(Side::A), *provider, pool, amount_a),
            Transfer::new(self.asset(Side::B), *provider, pool, amount_b),
        ];
        transfers.extend(self.payout_transfers(provider, payout));
        check_payers(ledger, &transfers)?;

        let reserves = AssetAmounts::new(
            self.reserves.a.safe_add(&amount_a)?,
            self.reserves.b.safe_add(&amount_b)?,
        );
        let total_supply = supply.safe_add(&minted)?;

        self.sample_if_due(now);
        self.dividends.settle(provider, balance)?;
        self.shares.mint(provider, minted)?;
        self.reserves = reserves;
        execute_transfers(ledger, &transfers)?;

        info!(
            provider = %provider,
            amount_a = %amount_a,
            amount_b = %amount_b,
            shares = %minted,
            total_supply = %total_supply,
            "liquidity deposited"
        );
        Ok(minted)
    }

    /// Burns `shares` for the proportional reserves, rounded down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] for an empty pool.
    /// - [`AmmError::InvalidQuantity`] if `shares` is zero or redeems
    ///   nothing.
    /// - [`AmmError::InsufficientBalance`] if `provider` holds fewer.
    fn withdraw<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        provider: &Address,
        shares: Shares,
        now: Timestamp,
    ) -> Result<AssetAmounts, AmmError> {
        self.ensure_initialized()?;
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("cannot withdraw zero shares"));
        }
        let balance = self.shares.balance_of(provider);
        if balance < shares {
            return Err(AmmError::InsufficientBalance);
        }
        let supply = self.shares.total_supply();
        let redeemed = |reserve: Amount| {
            shares
                .as_amount()
                .safe_mul_div(reserve.get(), supply.get(), Rounding::Down)
        };
        let out = AssetAmounts::new(redeemed(self.reserves.a)?, redeemed(self.reserves.b)?);
        if out.is_zero() {
            return Err(AmmError::InvalidQuantity("withdrawal too small"));
        }

        let payout = self.dividends.pending(provider, balance)?;
        let mut transfers = self.payout_transfers(provider, out).to_vec();
        transfers.extend(self.payout_transfers(provider, payout));
        check_payers(ledger, &transfers)?;

        let reserves = AssetAmounts::new(
            self.reserves.a.safe_sub(&out.a)?,
            self.reserves.b.safe_sub(&out.b)?,
        );

        self.sample_if_due(now);
        self.dividends.settle(provider, balance)?;
        self.shares.burn(provider, shares)?;
        self.reserves = reserves;
        execute_transfers(ledger, &transfers)?;

        info!(
            provider = %provider,
            shares = %shares,
            amount_a = %out.a,
            amount_b = %out.b,
            "liquidity withdrawn"
        );
        Ok(out)
    }

    fn total_supply(&self) -> Shares {
        self.shares.total_supply()
    }

    fn share_balance(&self, account: &Address) -> Shares {
        self.shares.balance_of(account)
    }
}
