use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::SaleError;

/// Sale window boundaries (unix timestamps)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct SaleTimings {
    /// Stage one opens
    pub opening: i64,
    /// Stage two opens, stage one ends
    pub stage_two_start: i64,
    /// Sale closes
    pub closing: i64,
}

impl SaleTimings {
    pub const LEN: usize = 8 + 8 + 8;

    pub fn validate(&self, now: i64) -> Result<()> {
        require!(
            self.opening >= now
                && self.opening < self.stage_two_start
                && self.stage_two_start < self.closing,
            SaleError::InvalidTimings
        );
        Ok(())
    }
}

/// Pricing and limits of a single sale stage
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct StageConfig {
    /// Whole tokens per whole SOL
    pub rate: u64,
    /// Extra tokens on top of the base amount, in percent
    pub bonus_percent: u8,
    /// Smallest accepted payment in lamports (inclusive)
    pub min_investment: u64,
    /// Largest accepted payment in lamports (inclusive)
    pub max_investment: u64,
}

impl StageConfig {
    pub const LEN: usize = 8 + 1 + 8 + 8;

    pub fn validate(&self) -> Result<()> {
        require!(self.rate > 0, SaleError::InvalidStageConfig);
        require!(
            self.min_investment > 0 && self.min_investment <= self.max_investment,
            SaleError::InvalidStageConfig
        );
        Ok(())
    }

    pub fn accepts(&self, amount: u64) -> bool {
        amount >= self.min_investment && amount <= self.max_investment
    }

    /// Token units for `lamports` before bonus
    pub fn base_units(&self, lamports: u64) -> Result<u64> {
        let units = (lamports as u128)
            .checked_mul(self.rate as u128)
            .and_then(|v| v.checked_mul(TOKEN_UNIT as u128))
            .ok_or(SaleError::Overflow)?
            / LAMPORTS_PER_SOL as u128;
        u64::try_from(units).map_err(|_| error!(SaleError::Overflow))
    }

    /// Base units plus the truncated stage bonus
    pub fn units_for(&self, lamports: u64) -> Result<u64> {
        let base = self.base_units(lamports)?;
        let bonus = base as u128 * self.bonus_percent as u128 / PERCENT_DENOMINATOR as u128;
        u64::try_from(base as u128 + bonus).map_err(|_| error!(SaleError::Overflow))
    }
}

/// Reserved token allocations distributed by the administrator
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReservationCategory {
    Team,
    Bounty,
    Development,
    SaleCost,
}

impl ReservationCategory {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            ReservationCategory::Team => 0,
            ReservationCategory::Bounty => 1,
            ReservationCategory::Development => 2,
            ReservationCategory::SaleCost => 3,
        }
    }
}

/// Lifecycle phase, always derived from timings and flags
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SalePhase {
    PreOpen,
    StageOne,
    StageTwo,
    /// Closed but not finalized
    Closed,
    FinalizedSuccess,
    FinalizedRefundable,
}

/// Result of an accepted purchase
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PurchaseOutcome {
    /// 1 or 2
    pub stage: u8,
    /// Token units to issue
    pub units: u64,
    /// Deposits moved out of custody to the beneficiary (0 if no sweep)
    pub swept: u64,
}

/// Read-only snapshot returned by the `sale_status` view
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct SaleStatus {
    pub phase: SalePhase,
    pub has_opened: bool,
    pub has_closed: bool,
    pub goal_reached: bool,
    pub current_rate: u64,
    pub current_bonus_percent: u8,
    pub amount_raised: u64,
    pub held_balance: u64,
    pub total_swept: u64,
    pub investor_count: u32,
}

/// Sale engine state - one per asset registry
#[account]
#[derive(Default)]
pub struct SaleState {
    // ============================================================
    // IDENTIFICATION
    // ============================================================

    /// Asset registry this sale issues through
    pub registry: Pubkey,

    /// Token mint of the registry
    pub mint: Pubkey,

    /// Single privileged account
    pub administrator: Pubkey,

    /// Receives released funds
    pub beneficiary: Pubkey,

    // ============================================================
    // CONFIGURATION
    // ============================================================

    pub timings: SaleTimings,

    /// [stage one, stage two]
    pub stages: [StageConfig; 2],

    /// Maximum aggregate raise in lamports
    pub hard_cap: u64,

    /// Soft cap: minimum raise to release funds instead of refunding
    pub goal: u64,

    /// Remaining reserved tokens, indexed by ReservationCategory
    pub reservations: [u64; ReservationCategory::COUNT],

    // ============================================================
    // ACCOUNTING
    // ============================================================

    /// Sum of all accepted purchases
    pub amount_raised: u64,

    /// Deposits currently custodied in the SOL vault
    pub held_balance: u64,

    /// Deposits already forwarded to the beneficiary
    pub total_swept: u64,

    /// Number of unique investors
    pub investor_count: u32,

    // ============================================================
    // FINALIZATION
    // ============================================================

    pub finalized: bool,

    /// Fixed at finalize; false arms refunds
    pub goal_reached_at_finalize: bool,

    // ============================================================
    // TIMESTAMPS / PDA
    // ============================================================

    pub created_at: i64,

    pub finalized_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// SOL vault PDA bump seed
    pub vault_bump: u8,
}

impl SaleState {
    pub const LEN: usize = 8  // discriminator
        + 32  // registry
        + 32  // mint
        + 32  // administrator
        + 32  // beneficiary
        + SaleTimings::LEN
        + 2 * StageConfig::LEN
        + 8   // hard_cap
        + 8   // goal
        + 8 * ReservationCategory::COUNT
        + 8   // amount_raised
        + 8   // held_balance
        + 8   // total_swept
        + 4   // investor_count
        + 1   // finalized
        + 1   // goal_reached_at_finalize
        + 8   // created_at
        + 8   // finalized_at
        + 1   // bump
        + 1   // vault_bump
        + 64; // padding

    pub fn validate_caps(hard_cap: u64, goal: u64) -> Result<()> {
        require!(goal > 0 && goal <= hard_cap, SaleError::InvalidCaps);
        Ok(())
    }

    // ============================================================
    // TIME-DERIVED QUERIES
    // ============================================================

    pub fn has_opened(&self, now: i64) -> bool {
        now >= self.timings.opening
    }

    pub fn has_closed(&self, now: i64) -> bool {
        now >= self.timings.closing
    }

    pub fn stage_two_started(&self, now: i64) -> bool {
        now >= self.timings.stage_two_start
    }

    /// Start timestamp of stage `index` (0 or 1)
    pub fn stage_start(&self, index: usize) -> i64 {
        if index == 0 {
            self.timings.opening
        } else {
            self.timings.stage_two_start
        }
    }

    /// Index of the stage accepting purchases at `now`
    pub fn active_stage_index(&self, now: i64) -> Result<usize> {
        require!(self.has_opened(now), SaleError::NotOpenYet);
        require!(!self.has_closed(now), SaleError::AlreadyClosed);
        Ok(if self.stage_two_started(now) { 1 } else { 0 })
    }

    pub fn phase(&self, now: i64) -> SalePhase {
        if self.finalized {
            return if self.goal_reached_at_finalize {
                SalePhase::FinalizedSuccess
            } else {
                SalePhase::FinalizedRefundable
            };
        }
        match self.active_stage_index(now) {
            Ok(0) => SalePhase::StageOne,
            Ok(_) => SalePhase::StageTwo,
            Err(_) if !self.has_opened(now) => SalePhase::PreOpen,
            Err(_) => SalePhase::Closed,
        }
    }

    /// Rate of the active stage, 0 outside the sale window
    pub fn current_rate(&self, now: i64) -> u64 {
        self.active_stage_index(now)
            .map(|i| self.stages[i].rate)
            .unwrap_or(0)
    }

    /// Bonus of the active stage, 0 outside the sale window
    pub fn current_bonus_percent(&self, now: i64) -> u8 {
        self.active_stage_index(now)
            .map(|i| self.stages[i].bonus_percent)
            .unwrap_or(0)
    }

    pub fn goal_reached(&self) -> bool {
        self.amount_raised >= self.goal
    }

    pub fn status(&self, now: i64) -> SaleStatus {
        SaleStatus {
            phase: self.phase(now),
            has_opened: self.has_opened(now),
            has_closed: self.has_closed(now),
            goal_reached: self.goal_reached(),
            current_rate: self.current_rate(now),
            current_bonus_percent: self.current_bonus_percent(now),
            amount_raised: self.amount_raised,
            held_balance: self.held_balance,
            total_swept: self.total_swept,
            investor_count: self.investor_count,
        }
    }

    // ============================================================
    // STATE TRANSITIONS
    // ============================================================

    /// Validate a purchase and apply it to the ledger.
    /// Nothing is mutated unless every check passes.
    pub fn record_purchase(&mut self, amount: u64, now: i64) -> Result<PurchaseOutcome> {
        require!(!self.finalized, SaleError::AlreadyFinalized);
        let index = self.active_stage_index(now)?;
        let stage = self.stages[index];

        require!(stage.accepts(amount), SaleError::InvestmentOutOfRange);

        let amount_raised = self
            .amount_raised
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;
        require!(amount_raised <= self.hard_cap, SaleError::CapExceeded);

        let units = stage.units_for(amount)?;
        let held = self
            .held_balance
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;

        // Funds never sit idle once custody reaches the goal
        let swept = if held >= self.goal { held } else { 0 };
        let total_swept = self
            .total_swept
            .checked_add(swept)
            .ok_or(SaleError::Overflow)?;

        self.amount_raised = amount_raised;
        self.held_balance = held - swept;
        self.total_swept = total_swept;

        Ok(PurchaseOutcome {
            stage: index as u8 + 1,
            units,
            swept,
        })
    }

    /// Close the sale for good. Returns the deposits to sweep to the
    /// beneficiary (0 when refunds are armed).
    pub fn finalize(&mut self, now: i64) -> Result<u64> {
        require!(self.has_closed(now), SaleError::NotClosedYet);
        require!(!self.finalized, SaleError::AlreadyFinalized);

        let collected = self
            .held_balance
            .checked_add(self.total_swept)
            .ok_or(SaleError::Overflow)?;
        let goal_reached = collected >= self.goal;
        let swept = if goal_reached { self.held_balance } else { 0 };

        self.goal_reached_at_finalize = goal_reached;
        self.held_balance -= swept;
        self.total_swept = collected - self.held_balance;
        self.finalized = true;
        self.finalized_at = now;

        Ok(swept)
    }

    pub fn require_refundable(&self) -> Result<()> {
        require!(
            self.finalized && !self.goal_reached_at_finalize,
            SaleError::RefundNotAvailable
        );
        Ok(())
    }

    /// Account for `amount` lamports leaving custody as a refund
    pub fn record_refund(&mut self, amount: u64) -> Result<()> {
        self.require_refundable()?;
        self.held_balance = self
            .held_balance
            .checked_sub(amount)
            .ok_or(SaleError::Overflow)?;
        Ok(())
    }

    pub fn reservation(&self, category: ReservationCategory) -> u64 {
        self.reservations[category.index()]
    }

    /// Zero a reservation and return what it held
    pub fn take_reservation(&mut self, category: ReservationCategory) -> u64 {
        std::mem::take(&mut self.reservations[category.index()])
    }

    pub fn update_timings(&mut self, timings: SaleTimings, now: i64) -> Result<()> {
        require!(!self.has_opened(now), SaleError::SaleAlreadyOpened);
        timings.validate(now)?;
        self.timings = timings;
        Ok(())
    }

    pub fn update_stage(&mut self, index: usize, config: StageConfig, now: i64) -> Result<()> {
        require!(index < self.stages.len(), SaleError::InvalidStageConfig);
        require!(now < self.stage_start(index), SaleError::StageAlreadyActive);
        config.validate()?;
        self.stages[index] = config;
        Ok(())
    }
}

/// Default stage configuration: [pre-sale, main sale]
pub fn default_stages() -> [StageConfig; 2] {
    [
        StageConfig {
            rate: DEFAULT_RATE,
            bonus_percent: DEFAULT_STAGE_ONE_BONUS_PERCENT,
            min_investment: DEFAULT_STAGE_ONE_MIN_INVESTMENT,
            max_investment: DEFAULT_STAGE_ONE_MAX_INVESTMENT,
        },
        StageConfig {
            rate: DEFAULT_RATE,
            bonus_percent: DEFAULT_STAGE_TWO_BONUS_PERCENT,
            min_investment: DEFAULT_STAGE_TWO_MIN_INVESTMENT,
            max_investment: DEFAULT_STAGE_TWO_MAX_INVESTMENT,
        },
    ]
}

/// Default reservations indexed by ReservationCategory
pub fn default_reservations() -> [u64; ReservationCategory::COUNT] {
    [
        TEAM_RESERVATION,
        BOUNTY_RESERVATION,
        DEVELOPMENT_RESERVATION,
        SALE_COST_RESERVATION,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_sale_error;

    const HOUR: i64 = 3600;
    const OPENING: i64 = 1_700_000_000;
    const STAGE_TWO: i64 = OPENING + HOUR;
    const CLOSING: i64 = STAGE_TWO + HOUR;

    fn sol(amount: f64) -> u64 {
        (amount * LAMPORTS_PER_SOL as f64) as u64
    }

    fn sale() -> SaleState {
        SaleState {
            registry: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            administrator: Pubkey::new_unique(),
            beneficiary: Pubkey::new_unique(),
            timings: SaleTimings {
                opening: OPENING,
                stage_two_start: STAGE_TWO,
                closing: CLOSING,
            },
            stages: default_stages(),
            hard_cap: DEFAULT_HARD_CAP,
            goal: DEFAULT_GOAL,
            reservations: default_reservations(),
            ..Default::default()
        }
    }

    #[test]
    fn phase_follows_the_clock() {
        let sale = sale();
        assert_eq!(sale.phase(OPENING - 1), SalePhase::PreOpen);
        assert_eq!(sale.phase(OPENING), SalePhase::StageOne);
        assert_eq!(sale.phase(STAGE_TWO - 1), SalePhase::StageOne);
        assert_eq!(sale.phase(STAGE_TWO), SalePhase::StageTwo);
        assert_eq!(sale.phase(CLOSING - 1), SalePhase::StageTwo);
        assert_eq!(sale.phase(CLOSING), SalePhase::Closed);
    }

    #[test]
    fn has_opened_and_closed() {
        let sale = sale();
        assert!(!sale.has_opened(OPENING - 1));
        assert!(sale.has_opened(OPENING + HOUR));
        assert!(!sale.has_closed(CLOSING - 1));
        assert!(sale.has_closed(CLOSING));
        assert!(!sale.stage_two_started(OPENING + 60));
        assert!(sale.stage_two_started(STAGE_TWO));
    }

    #[test]
    fn bonus_follows_stage() {
        let sale = sale();
        assert_eq!(sale.current_bonus_percent(OPENING + 60), DEFAULT_STAGE_ONE_BONUS_PERCENT);
        assert_eq!(sale.current_bonus_percent(STAGE_TWO), DEFAULT_STAGE_TWO_BONUS_PERCENT);
        assert_eq!(sale.current_bonus_percent(CLOSING), 0);
        assert_eq!(sale.current_rate(OPENING - 1), 0);
        assert_eq!(sale.current_rate(OPENING), DEFAULT_RATE);
    }

    #[test]
    fn stage_one_purchase_gets_forty_percent_bonus() {
        let mut sale = sale();
        let outcome = sale.record_purchase(sol(2.0), OPENING + 60).unwrap();

        // base 1500 * 2 SOL = 3000 tokens, bonus 1200 tokens
        assert_eq!(outcome.stage, 1);
        assert_eq!(outcome.units, 420_000_000_000);
    }

    #[test]
    fn stage_two_purchase_gets_twenty_percent_bonus() {
        let mut sale = sale();
        let outcome = sale.record_purchase(sol(2.0), STAGE_TWO).unwrap();

        assert_eq!(outcome.stage, 2);
        assert_eq!(outcome.units, 360_000_000_000);
    }

    #[test]
    fn bonus_truncates() {
        let stage = StageConfig {
            rate: 1,
            bonus_percent: 33,
            min_investment: 1,
            max_investment: u64::MAX,
        };
        // 0.00000003 SOL -> 3 base units, 33% of 3 = 0.99 -> 0
        assert_eq!(stage.units_for(30).unwrap(), 3);
    }

    #[test]
    fn purchase_outside_window_fails() {
        let mut sale = sale();
        assert_sale_error(sale.record_purchase(sol(2.0), OPENING - 1), SaleError::NotOpenYet);
        assert_sale_error(sale.record_purchase(sol(2.0), CLOSING), SaleError::AlreadyClosed);
        assert_eq!(sale.amount_raised, 0);
    }

    #[test]
    fn stage_one_investment_bounds() {
        let mut sale = sale();
        sale.hard_cap = 100 * LAMPORTS_PER_SOL;
        sale.goal = 100 * LAMPORTS_PER_SOL;
        let now = OPENING + 60;

        assert_sale_error(sale.record_purchase(sol(1.0), now), SaleError::InvestmentOutOfRange);
        assert_sale_error(sale.record_purchase(sol(35.5), now), SaleError::InvestmentOutOfRange);
        sale.record_purchase(sol(1.5), now).unwrap();
        sale.record_purchase(sol(35.0), now).unwrap();
        assert_eq!(sale.amount_raised, sol(36.5));
    }

    #[test]
    fn stage_two_investment_bounds() {
        let mut sale = sale();
        sale.hard_cap = 100 * LAMPORTS_PER_SOL;
        sale.goal = 100 * LAMPORTS_PER_SOL;

        assert_sale_error(sale.record_purchase(sol(0.4), STAGE_TWO), SaleError::InvestmentOutOfRange);
        assert_sale_error(sale.record_purchase(sol(20.5), STAGE_TWO), SaleError::InvestmentOutOfRange);
        sale.record_purchase(sol(2.0), STAGE_TWO).unwrap();
    }

    #[test]
    fn single_purchase_above_hard_cap_fails() {
        let mut sale = sale();
        assert_sale_error(sale.record_purchase(sol(8.0), OPENING), SaleError::CapExceeded);
        assert_eq!(sale.amount_raised, 0);
        assert_eq!(sale.held_balance, 0);
    }

    #[test]
    fn cumulative_purchases_above_hard_cap_fail() {
        let mut sale = sale();
        sale.record_purchase(sol(6.0), OPENING).unwrap();

        let held = sale.held_balance;
        let swept = sale.total_swept;
        assert_sale_error(sale.record_purchase(sol(3.0), OPENING), SaleError::CapExceeded);
        assert_eq!(sale.amount_raised, sol(6.0));
        assert_eq!(sale.held_balance, held);
        assert_eq!(sale.total_swept, swept);

        // filling exactly to the cap is fine
        sale.record_purchase(sol(1.0), STAGE_TWO).unwrap();
        assert_eq!(sale.amount_raised, DEFAULT_HARD_CAP);
    }

    #[test]
    fn funds_stay_in_custody_below_goal() {
        let mut sale = sale();
        let outcome = sale.record_purchase(DEFAULT_GOAL / 2, OPENING).unwrap();

        assert_eq!(outcome.swept, 0);
        assert_eq!(sale.held_balance, DEFAULT_GOAL / 2);
        assert!(!sale.goal_reached());
    }

    #[test]
    fn custody_is_swept_once_goal_is_crossed() {
        let mut sale = sale();
        sale.record_purchase(DEFAULT_GOAL / 2, OPENING).unwrap();
        let outcome = sale.record_purchase(DEFAULT_GOAL / 2, OPENING).unwrap();

        assert_eq!(outcome.swept, DEFAULT_GOAL);
        assert_eq!(sale.held_balance, 0);
        assert_eq!(sale.total_swept, DEFAULT_GOAL);
        assert!(sale.goal_reached());

        // later purchases are held until custody reaches the goal again
        let outcome = sale.record_purchase(sol(1.5), OPENING).unwrap();
        assert_eq!(outcome.swept, 0);
        assert_eq!(sale.held_balance, sol(1.5));
        assert_eq!(sale.amount_raised, DEFAULT_GOAL + sol(1.5));
    }

    #[test]
    fn finalize_only_after_closing() {
        let mut sale = sale();
        assert_sale_error(sale.finalize(OPENING - 1), SaleError::NotClosedYet);
        assert_sale_error(sale.finalize(OPENING + 60), SaleError::NotClosedYet);
        assert_sale_error(sale.finalize(STAGE_TWO + 60), SaleError::NotClosedYet);
        assert!(!sale.finalized);

        sale.finalize(CLOSING + 60).unwrap();
        assert!(sale.finalized);
        assert_eq!(sale.finalized_at, CLOSING + 60);
    }

    #[test]
    fn finalize_succeeds_at_most_once() {
        let mut sale = sale();
        sale.finalize(CLOSING).unwrap();
        assert_sale_error(sale.finalize(CLOSING + 1), SaleError::AlreadyFinalized);
        assert_sale_error(sale.finalize(CLOSING + HOUR), SaleError::AlreadyFinalized);
    }

    #[test]
    fn finalize_with_goal_sweeps_remaining_custody() {
        let mut sale = sale();
        sale.record_purchase(DEFAULT_GOAL, OPENING).unwrap();
        sale.record_purchase(sol(1.5), OPENING).unwrap();

        let swept = sale.finalize(CLOSING).unwrap();
        assert_eq!(swept, sol(1.5));
        assert!(sale.goal_reached_at_finalize);
        assert_eq!(sale.held_balance, 0);
        assert_eq!(sale.total_swept, sale.amount_raised);
        assert_eq!(sale.phase(CLOSING), SalePhase::FinalizedSuccess);
        assert_sale_error(sale.require_refundable(), SaleError::RefundNotAvailable);
    }

    #[test]
    fn finalize_below_goal_arms_refunds() {
        let mut sale = sale();
        sale.record_purchase(sol(2.0), OPENING).unwrap();

        assert_sale_error(sale.require_refundable(), SaleError::RefundNotAvailable);

        let swept = sale.finalize(CLOSING).unwrap();
        assert_eq!(swept, 0);
        assert!(!sale.goal_reached_at_finalize);
        assert_eq!(sale.held_balance, sol(2.0));
        assert_eq!(sale.phase(CLOSING + HOUR), SalePhase::FinalizedRefundable);
        sale.require_refundable().unwrap();
    }

    #[test]
    fn amount_raised_is_frozen_after_finalize() {
        let mut sale = sale();
        sale.record_purchase(sol(2.0), OPENING).unwrap();
        sale.finalize(CLOSING).unwrap();

        assert_sale_error(sale.record_purchase(sol(2.0), CLOSING), SaleError::AlreadyFinalized);
        assert_eq!(sale.amount_raised, sol(2.0));
    }

    #[test]
    fn refunds_drain_custody_exactly() {
        let mut sale = sale();
        sale.record_purchase(sol(2.0), OPENING).unwrap();
        sale.record_purchase(sol(1.5), STAGE_TWO).unwrap();
        let held_before = sale.held_balance;
        sale.finalize(CLOSING).unwrap();

        sale.record_refund(sol(2.0)).unwrap();
        sale.record_refund(sol(1.5)).unwrap();
        assert_eq!(sol(2.0) + sol(1.5), held_before);
        assert_eq!(sale.held_balance, 0);

        assert_sale_error(sale.record_refund(1), SaleError::Overflow);
    }

    #[test]
    fn reservations_are_taken_once() {
        let mut sale = sale();
        assert_eq!(sale.reservation(ReservationCategory::Team), 140_000_000 * TOKEN_UNIT);
        assert_eq!(sale.reservation(ReservationCategory::Bounty), 50_000_000 * TOKEN_UNIT);
        assert_eq!(sale.reservation(ReservationCategory::Development), 150_000_000 * TOKEN_UNIT);
        assert_eq!(sale.reservation(ReservationCategory::SaleCost), 10_000_000 * TOKEN_UNIT);

        assert_eq!(sale.take_reservation(ReservationCategory::Team), TEAM_RESERVATION);
        assert_eq!(sale.reservation(ReservationCategory::Team), 0);
        assert_eq!(sale.take_reservation(ReservationCategory::Team), 0);
        assert_eq!(sale.reservation(ReservationCategory::Team), 0);

        // other categories are untouched
        assert_eq!(sale.reservation(ReservationCategory::Bounty), BOUNTY_RESERVATION);
    }

    #[test]
    fn timings_must_be_increasing_and_in_the_future() {
        let now = OPENING - HOUR;
        let valid = SaleTimings { opening: OPENING, stage_two_start: STAGE_TWO, closing: CLOSING };
        valid.validate(now).unwrap();

        let past = SaleTimings { opening: now - 1, ..valid };
        assert_sale_error(past.validate(now), SaleError::InvalidTimings);

        let unordered = SaleTimings { stage_two_start: CLOSING, closing: STAGE_TWO, ..valid };
        assert_sale_error(unordered.validate(now), SaleError::InvalidTimings);

        let flat = SaleTimings { stage_two_start: OPENING, ..valid };
        assert_sale_error(flat.validate(now), SaleError::InvalidTimings);
    }

    #[test]
    fn timings_can_only_move_before_opening() {
        let mut sale = sale();
        let shifted = SaleTimings {
            opening: OPENING + HOUR,
            stage_two_start: STAGE_TWO + HOUR,
            closing: CLOSING + HOUR,
        };

        sale.update_timings(shifted, OPENING - 60).unwrap();
        assert_eq!(sale.timings, shifted);

        assert_sale_error(
            sale.update_timings(shifted, shifted.opening),
            SaleError::SaleAlreadyOpened,
        );
    }

    #[test]
    fn stage_config_is_editable_until_the_stage_starts() {
        let mut sale = sale();
        let config = StageConfig { rate: 2000, ..sale.stages[1] };

        sale.update_stage(1, config, OPENING + 60).unwrap();
        assert_eq!(sale.stages[1].rate, 2000);

        assert_sale_error(sale.update_stage(0, config, OPENING), SaleError::StageAlreadyActive);
        assert_sale_error(sale.update_stage(1, config, STAGE_TWO), SaleError::StageAlreadyActive);
        assert_sale_error(sale.update_stage(2, config, OPENING - 1), SaleError::InvalidStageConfig);

        let zero_rate = StageConfig { rate: 0, ..config };
        assert_sale_error(sale.update_stage(1, zero_rate, OPENING), SaleError::InvalidStageConfig);

        let inverted = StageConfig { min_investment: 10, max_investment: 5, ..config };
        assert_sale_error(inverted.validate(), SaleError::InvalidStageConfig);
    }

    #[test]
    fn caps_validation() {
        SaleState::validate_caps(DEFAULT_HARD_CAP, DEFAULT_GOAL).unwrap();
        SaleState::validate_caps(DEFAULT_HARD_CAP, DEFAULT_HARD_CAP).unwrap();
        assert_sale_error(SaleState::validate_caps(DEFAULT_HARD_CAP, 0), SaleError::InvalidCaps);
        assert_sale_error(
            SaleState::validate_caps(DEFAULT_GOAL, DEFAULT_HARD_CAP),
            SaleError::InvalidCaps,
        );
    }

    #[test]
    fn status_snapshot() {
        let mut sale = sale();
        sale.record_purchase(sol(2.0), OPENING).unwrap();
        sale.investor_count = 1;
        let status = sale.status(OPENING + 60);

        assert_eq!(status.phase, SalePhase::StageOne);
        assert!(status.has_opened);
        assert!(!status.has_closed);
        assert!(!status.goal_reached);
        assert_eq!(status.current_rate, DEFAULT_RATE);
        assert_eq!(status.current_bonus_percent, 40);
        assert_eq!(status.amount_raised, sol(2.0));
        assert_eq!(status.held_balance, sol(2.0));
        assert_eq!(status.investor_count, 1);
    }
}
