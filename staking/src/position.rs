//! Per-account stake positions and reward accrual.

use serde::{Deserialize, Serialize};
use x1_types::{Amount, TokenParams, Timestamp};

/// Reward rate and period length shared by every position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Reward per period as a share of principal (100 = 1%).
    pub reward_bps: u32,
    /// Length of one reward period in seconds.
    pub period_secs: u64,
}

impl RewardSchedule {
    pub fn new(reward_bps: u32, period_secs: u64) -> Self {
        Self {
            reward_bps,
            period_secs,
        }
    }

    pub fn from_params(params: &TokenParams) -> Self {
        Self::new(params.reward_bps, params.reward_period_secs)
    }

    /// Reward earned by `principal` in one full period.
    pub fn per_period(&self, principal: Amount) -> Option<Amount> {
        principal.checked_bps(self.reward_bps)
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self::from_params(&TokenParams::default())
    }
}

/// Reward accrued by a position up to some instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrual {
    /// Whole periods elapsed since the last claim.
    pub periods: u64,
    /// Reward for those periods.
    pub reward: Amount,
    /// `last_claim_at` advanced by exactly `periods` whole periods.
    ///
    /// The partial period left over carries into the next claim.
    pub settled_until: Timestamp,
}

impl Accrual {
    pub fn is_empty(&self) -> bool {
        self.periods == 0
    }
}

/// An active stake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Balance currently locked.
    pub principal: Amount,
    /// When the position was opened.
    pub staked_at: Timestamp,
    /// Reward is accrued from here.
    pub last_claim_at: Timestamp,
    /// Total reward paid out to this position (cumulative, never decreases).
    #[serde(default)]
    pub rewards_claimed: Amount,
}

impl StakePosition {
    pub fn open(principal: Amount, now: Timestamp) -> Self {
        Self {
            principal,
            staked_at: now,
            last_claim_at: now,
            rewards_claimed: Amount::ZERO,
        }
    }

    /// Whole periods elapsed since `last_claim_at`; a clock that went
    /// backwards counts as zero.
    pub fn elapsed_periods(&self, schedule: &RewardSchedule, now: Timestamp) -> u64 {
        if schedule.period_secs == 0 {
            return 0;
        }
        self.last_claim_at.elapsed_since(now) / schedule.period_secs
    }

    /// Compute the reward accrued up to `now`. `None` on overflow.
    pub fn accrued_checked(&self, schedule: &RewardSchedule, now: Timestamp) -> Option<Accrual> {
        let periods = self.elapsed_periods(schedule, now);
        if periods == 0 {
            return Some(Accrual {
                periods: 0,
                reward: Amount::ZERO,
                settled_until: self.last_claim_at,
            });
        }
        let reward = schedule
            .per_period(self.principal)?
            .checked_mul(periods as u128)?;
        let settled_until = self
            .last_claim_at
            .checked_add_secs(periods.checked_mul(schedule.period_secs)?)?;
        Some(Accrual {
            periods,
            reward,
            settled_until,
        })
    }
}

/// Principal and last claim time, as reported to clients.
///
/// An account without a position reports zero principal at the epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeInfo {
    pub principal: Amount,
    pub last_claim_at: Timestamp,
}

impl From<&StakePosition> for StakeInfo {
    fn from(p: &StakePosition) -> Self {
        Self {
            principal: p.principal,
            last_claim_at: p.last_claim_at,
        }
    }
}
