//! Core staking engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use x1_ledger::{BalanceLedger, LedgerBatch, LedgerEvent};
use x1_types::{Address, Amount, TokenParams, Timestamp};

use crate::error::StakingError;
use crate::position::{Accrual, RewardSchedule, StakeInfo, StakePosition};

/// The staking engine: owns every stake position and settles rewards.
///
/// Each operation stages its ledger effects in one batch and only writes the
/// position after the batch commits, so a failure changes nothing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StakingEngine {
    schedule: RewardSchedule,
    positions: BTreeMap<Address, StakePosition>,
}

impl StakingEngine {
    pub fn new(schedule: RewardSchedule) -> Self {
        Self {
            schedule,
            positions: BTreeMap::new(),
        }
    }

    pub fn from_params(params: &TokenParams) -> Self {
        Self::new(RewardSchedule::from_params(params))
    }

    /// Rebuild an engine from persisted positions.
    pub fn with_positions(
        schedule: RewardSchedule,
        positions: impl IntoIterator<Item = (Address, StakePosition)>,
    ) -> Self {
        Self {
            schedule,
            positions: positions.into_iter().collect(),
        }
    }

    pub fn position(&self, account: &Address) -> Option<&StakePosition> {
        self.positions.get(account)
    }

    pub fn positions(&self) -> impl Iterator<Item = (&Address, &StakePosition)> {
        self.positions.iter()
    }

    /// Principal and last claim time; zeros when no position exists.
    pub fn stake_info(&self, account: &Address) -> StakeInfo {
        self.positions
            .get(account)
            .map(StakeInfo::from)
            .unwrap_or_default()
    }

    /// Sum of principal over all positions.
    pub fn total_staked(&self) -> Amount {
        self.positions.values().map(|p| p.principal).sum()
    }

    /// Reward a claim at `now` would pay, without changing anything.
    pub fn pending_rewards(&self, account: &Address, now: Timestamp) -> Result<Amount, StakingError> {
        match self.positions.get(account) {
            Some(position) => Ok(self.accrue(position, now)?.reward),
            None => Ok(Amount::ZERO),
        }
    }

    /// Lock `amount` of `account`'s free balance.
    ///
    /// Topping up an existing position first pays out its accrued reward and
    /// then restarts the reward clock at `now` for the combined principal. A
    /// clock reading behind the last claim keeps the old claim time.
    /// Returns the new principal.
    pub fn stake(
        &mut self,
        ledger: &mut BalanceLedger,
        account: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        if amount.is_zero() {
            return Err(StakingError::ZeroAmount);
        }
        let available = ledger.balance_of(account);
        if available < amount {
            return Err(StakingError::InsufficientBalance {
                needed: amount,
                available,
            });
        }

        let mut batch = LedgerBatch::new();
        batch.debit(account, amount).emit(LedgerEvent::Locked {
            account: account.clone(),
            amount,
        });

        let updated = match self.positions.get(account) {
            Some(existing) => {
                let accrual = self.accrue(existing, now)?;
                Self::stage_reward(&mut batch, account, &accrual);
                StakePosition {
                    principal: existing
                        .principal
                        .checked_add(amount)
                        .ok_or(StakingError::Overflow)?,
                    staked_at: existing.staked_at,
                    // A clock reading behind the last claim must not reopen
                    // an interval that was already paid.
                    last_claim_at: now.max(existing.last_claim_at),
                    rewards_claimed: existing
                        .rewards_claimed
                        .checked_add(accrual.reward)
                        .ok_or(StakingError::Overflow)?,
                }
            }
            None => StakePosition::open(amount, now),
        };

        ledger.apply(batch)?;
        let principal = updated.principal;
        self.positions.insert(account.clone(), updated);

        tracing::debug!(%account, %amount, %principal, "staked");
        Ok(principal)
    }

    /// Return `amount` of staked principal to the free balance.
    ///
    /// Accrued reward is settled first. Unstaking everything closes the
    /// position. Returns the remaining principal.
    pub fn unstake(
        &mut self,
        ledger: &mut BalanceLedger,
        account: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        let existing = self
            .positions
            .get(account)
            .ok_or(StakingError::NoActivePosition)?;
        if amount.is_zero() {
            return Err(StakingError::ZeroAmount);
        }
        if amount > existing.principal {
            return Err(StakingError::ExceedsPrincipal {
                requested: amount,
                principal: existing.principal,
            });
        }

        let accrual = self.accrue(existing, now)?;
        let mut batch = LedgerBatch::new();
        Self::stage_reward(&mut batch, account, &accrual);
        batch.credit(account, amount).emit(LedgerEvent::Unlocked {
            account: account.clone(),
            amount,
        });

        let remaining = existing.principal - amount;
        let updated = StakePosition {
            principal: remaining,
            staked_at: existing.staked_at,
            last_claim_at: accrual.settled_until,
            rewards_claimed: existing
                .rewards_claimed
                .checked_add(accrual.reward)
                .ok_or(StakingError::Overflow)?,
        };

        ledger.apply(batch)?;
        if remaining.is_zero() {
            self.positions.remove(account);
        } else {
            self.positions.insert(account.clone(), updated);
        }

        tracing::debug!(%account, %amount, %remaining, reward = %accrual.reward, "unstaked");
        Ok(remaining)
    }

    /// Pay out the reward for every whole period since the last claim.
    ///
    /// Returns zero, changing nothing, if no full period has elapsed. The
    /// claim clock advances by whole periods only, so leftover time counts
    /// toward the next claim.
    pub fn claim_rewards(
        &mut self,
        ledger: &mut BalanceLedger,
        account: &Address,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        let existing = match self.positions.get(account) {
            Some(p) if !p.principal.is_zero() => p,
            _ => return Err(StakingError::NoActivePosition),
        };

        let accrual = self.accrue(existing, now)?;
        if accrual.is_empty() {
            return Ok(Amount::ZERO);
        }

        let mut batch = LedgerBatch::new();
        Self::stage_reward(&mut batch, account, &accrual);
        let updated = StakePosition {
            last_claim_at: accrual.settled_until,
            rewards_claimed: existing
                .rewards_claimed
                .checked_add(accrual.reward)
                .ok_or(StakingError::Overflow)?,
            ..existing.clone()
        };

        ledger.apply(batch)?;
        self.positions.insert(account.clone(), updated);

        tracing::debug!(%account, periods = accrual.periods, reward = %accrual.reward, "rewards claimed");
        Ok(accrual.reward)
    }

    fn accrue(&self, position: &StakePosition, now: Timestamp) -> Result<Accrual, StakingError> {
        position
            .accrued_checked(&self.schedule, now)
            .ok_or(StakingError::Overflow)
    }

    /// Rewards are newly minted supply, not drawn from a reserve.
    fn stage_reward(batch: &mut LedgerBatch, account: &Address, accrual: &Accrual) {
        if accrual.reward.is_zero() {
            return;
        }
        batch.mint(account, accrual.reward).emit(LedgerEvent::Mint {
            to: account.clone(),
            amount: accrual.reward,
        });
    }
}
