use anchor_lang::prelude::*;
use crate::constants::VESTING_MILESTONES;
use crate::errors::SaleError;

/// Time-locked holder of one reservation category.
/// Releases are bounded by a minimum-retained-balance curve indexed by milestone.
#[account]
#[derive(Default)]
pub struct VestingGuard {
    /// Asset registry whose tokens are vested
    pub registry: Pubkey,

    /// Token mint
    pub mint: Pubkey,

    /// Only identity allowed to configure and release
    pub administrator: Pubkey,

    /// Milestone timestamps, strictly increasing
    pub vesting_times: [i64; VESTING_MILESTONES],

    /// Balance that must stay in the vault once milestone `i` has passed
    pub minimum_retained: [u64; VESTING_MILESTONES],

    /// Set by calculate_vesting_portions
    pub portions_calculated: bool,

    /// Vault balance the curve was computed from
    pub vested_total: u64,

    /// Units released so far
    pub released_total: u64,

    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl VestingGuard {
    pub const LEN: usize = 8  // discriminator
        + 32  // registry
        + 32  // mint
        + 32  // administrator
        + 8 * VESTING_MILESTONES  // vesting_times
        + 8 * VESTING_MILESTONES  // minimum_retained
        + 1   // portions_calculated
        + 8   // vested_total
        + 8   // released_total
        + 8   // created_at
        + 1   // bump
        + 32; // padding

    pub fn validate_times(times: &[i64; VESTING_MILESTONES]) -> Result<()> {
        require!(
            times.windows(2).all(|pair| pair[0] < pair[1]),
            SaleError::InvalidVestingTimes
        );
        Ok(())
    }

    /// Compute the curve from the balance `held` right now.
    /// One quarter becomes releasable per milestone; the last floor is zero.
    pub fn calculate_portions(&mut self, held: u64) -> Result<()> {
        require!(held > 0, SaleError::NothingToVest);

        let milestones = VESTING_MILESTONES as u128;
        for (i, floor) in self.minimum_retained.iter_mut().enumerate() {
            let released = held as u128 * (i as u128 + 1) / milestones;
            *floor = held - released as u64;
        }
        self.vested_total = held;
        self.portions_calculated = true;
        Ok(())
    }

    /// Replace the time axis; floors stay attached to their index
    pub fn update_times(&mut self, times: [i64; VESTING_MILESTONES]) -> Result<()> {
        Self::validate_times(&times)?;
        self.vesting_times = times;
        Ok(())
    }

    /// Index of the latest milestone at or before `now`
    pub fn active_milestone(&self, now: i64) -> Option<usize> {
        self.vesting_times
            .iter()
            .filter(|&&time| time <= now)
            .count()
            .checked_sub(1)
    }

    /// Floor recorded for the milestone scheduled at exactly `timestamp`
    #[cfg(test)]
    pub fn minimum_retained_at(&self, timestamp: i64) -> Option<u64> {
        self.vesting_times
            .iter()
            .position(|&time| time == timestamp)
            .map(|i| self.minimum_retained[i])
    }

    /// Validate a release of `amount` out of a vault holding `held`,
    /// then record it
    pub fn record_release(&mut self, held: u64, amount: u64, now: i64) -> Result<()> {
        require!(self.portions_calculated, SaleError::PortionsNotCalculated);
        require!(amount > 0, SaleError::ZeroAmount);

        let milestone = self
            .active_milestone(now)
            .ok_or(SaleError::BeforeFirstMilestone)?;
        let remaining = held
            .checked_sub(amount)
            .ok_or(SaleError::BelowMinimumRetainedBalance)?;
        require!(
            remaining >= self.minimum_retained[milestone],
            SaleError::BelowMinimumRetainedBalance
        );

        self.released_total = self
            .released_total
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TEAM_RESERVATION;
    use crate::test_utils::assert_sale_error;

    const T0: i64 = 1_800_000_000;
    const MINUTE: i64 = 60;

    fn times(start: i64) -> [i64; VESTING_MILESTONES] {
        [start, start + MINUTE, start + 2 * MINUTE, start + 3 * MINUTE]
    }

    fn funded_guard() -> VestingGuard {
        let mut guard = VestingGuard {
            registry: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            administrator: Pubkey::new_unique(),
            vesting_times: times(T0),
            ..Default::default()
        };
        guard.calculate_portions(TEAM_RESERVATION).unwrap();
        guard
    }

    #[test]
    fn curve_releases_a_quarter_per_milestone() {
        let guard = funded_guard();
        let quarter = TEAM_RESERVATION / 4;

        assert_eq!(guard.minimum_retained[0], 3 * quarter);
        assert_eq!(guard.minimum_retained[1], 2 * quarter);
        assert_eq!(guard.minimum_retained[2], quarter);
        assert_eq!(guard.minimum_retained[3], 0);
        assert_eq!(guard.vested_total, TEAM_RESERVATION);
    }

    #[test]
    fn curve_is_non_increasing_for_odd_balances() {
        let mut guard = VestingGuard::default();
        guard.calculate_portions(7).unwrap();

        assert_eq!(guard.minimum_retained, [6, 4, 2, 0]);
        assert!(guard.minimum_retained.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn empty_vault_cannot_be_vested() {
        let mut guard = VestingGuard::default();
        assert_sale_error(guard.calculate_portions(0), SaleError::NothingToVest);
        assert!(!guard.portions_calculated);
    }

    #[test]
    fn recalculation_uses_current_balance() {
        let mut guard = funded_guard();
        guard.calculate_portions(400).unwrap();
        assert_eq!(guard.minimum_retained, [300, 200, 100, 0]);
        assert_eq!(guard.vested_total, 400);
    }

    #[test]
    fn vesting_times_must_increase() {
        VestingGuard::validate_times(&times(T0)).unwrap();
        assert_sale_error(
            VestingGuard::validate_times(&[T0, T0, T0 + 1, T0 + 2]),
            SaleError::InvalidVestingTimes,
        );
        assert_sale_error(
            VestingGuard::validate_times(&[T0 + 3, T0 + 2, T0 + 1, T0]),
            SaleError::InvalidVestingTimes,
        );
    }

    #[test]
    fn re_keying_keeps_floors_by_index() {
        let mut guard = funded_guard();
        let old = guard.vesting_times;
        let before: Vec<_> = old.iter().map(|&t| guard.minimum_retained_at(t)).collect();

        let new = times(T0 + 1_000);
        guard.update_times(new).unwrap();
        assert_eq!(guard.vesting_times, new);

        let after: Vec<_> = new.iter().map(|&t| guard.minimum_retained_at(t)).collect();
        assert_eq!(before, after);
        assert_eq!(guard.minimum_retained_at(old[0]), None);
    }

    #[test]
    fn invalid_re_keying_leaves_times_untouched() {
        let mut guard = funded_guard();
        assert_sale_error(
            guard.update_times([T0, T0 - 1, T0 + 5, T0 + 6]),
            SaleError::InvalidVestingTimes,
        );
        assert_eq!(guard.vesting_times, times(T0));
    }

    #[test]
    fn active_milestone_counts_passed_times() {
        let guard = funded_guard();
        assert_eq!(guard.active_milestone(T0 - 1), None);
        assert_eq!(guard.active_milestone(T0), Some(0));
        assert_eq!(guard.active_milestone(T0 + MINUTE + 1), Some(1));
        assert_eq!(guard.active_milestone(T0 + 3 * MINUTE), Some(3));
        assert_eq!(guard.active_milestone(i64::MAX), Some(3));
    }

    #[test]
    fn release_requires_calculated_portions() {
        let mut guard = VestingGuard {
            vesting_times: times(T0),
            ..Default::default()
        };
        assert_sale_error(
            guard.record_release(100, 1, T0 + 1),
            SaleError::PortionsNotCalculated,
        );
    }

    #[test]
    fn release_before_first_milestone_fails() {
        let mut guard = funded_guard();
        assert_sale_error(
            guard.record_release(TEAM_RESERVATION, 1, T0 - 1),
            SaleError::BeforeFirstMilestone,
        );
    }

    #[test]
    fn zero_release_is_rejected() {
        let mut guard = funded_guard();
        assert_sale_error(
            guard.record_release(TEAM_RESERVATION, 0, T0 + 1),
            SaleError::ZeroAmount,
        );
    }

    #[test]
    fn floor_is_enforced_per_milestone() {
        for milestone in 0..VESTING_MILESTONES {
            let mut guard = funded_guard();
            let now = guard.vesting_times[milestone] + 1;
            let max = TEAM_RESERVATION - guard.minimum_retained[milestone];

            assert_sale_error(
                guard.record_release(TEAM_RESERVATION, max + 1, now),
                SaleError::BelowMinimumRetainedBalance,
            );
            assert_eq!(guard.released_total, 0);

            // landing exactly on the floor is allowed
            guard.record_release(TEAM_RESERVATION, max, now).unwrap();
            assert_eq!(guard.released_total, max);
        }
    }

    #[test]
    fn floor_applies_to_cumulative_releases() {
        let mut guard = funded_guard();
        let quarter = TEAM_RESERVATION / 4;
        let now = T0 + 1;

        guard.record_release(TEAM_RESERVATION, quarter / 2, now).unwrap();
        let held = TEAM_RESERVATION - quarter / 2;
        assert_sale_error(
            guard.record_release(held, quarter, now),
            SaleError::BelowMinimumRetainedBalance,
        );
        guard.record_release(held, quarter - quarter / 2, now).unwrap();
        assert_eq!(guard.released_total, quarter);
    }

    #[test]
    fn release_above_held_balance_fails() {
        let mut guard = funded_guard();
        assert_sale_error(
            guard.record_release(10, 11, T0 + 3 * MINUTE),
            SaleError::BelowMinimumRetainedBalance,
        );
    }
}
