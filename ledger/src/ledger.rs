//! The balance ledger: free balances plus supply accounting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use x1_types::{Address, Amount};

use crate::batch::{LedgerBatch, LedgerOp};
use crate::error::LedgerError;
use crate::event::LedgerEvent;

/// Free balances of every account and the running supply totals.
///
/// Balances are kept in a `BTreeMap` so iteration (and anything hashed from
/// it) is deterministic. An entry is created on first credit and never
/// removed; a zero balance is a valid steady state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: BTreeMap<Address, Amount>,
    total_supply: Amount,
    total_burned: Amount,
    total_minted: Amount,
    /// Events of committed batches, oldest first. Not persisted.
    #[serde(skip)]
    events: Vec<LedgerEvent>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free balance of `account`; unknown accounts hold zero.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Cumulative amount ever burned.
    pub fn total_burned(&self) -> Amount {
        self.total_burned
    }

    /// Cumulative amount ever minted, genesis included.
    pub fn total_minted(&self) -> Amount {
        self.total_minted
    }

    /// Sum of all free balances.
    pub fn circulating(&self) -> Amount {
        self.balances.values().sum()
    }

    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, Amount)> {
        self.balances.iter().map(|(a, b)| (a, *b))
    }

    /// Events of every committed batch, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Increase a balance without changing total supply.
    pub fn credit(&mut self, account: &Address, amount: Amount) -> Result<(), LedgerError> {
        let mut batch = LedgerBatch::new();
        batch.credit(account, amount);
        self.apply(batch)
    }

    /// Increase a balance and the total supply.
    pub fn mint(&mut self, account: &Address, amount: Amount) -> Result<(), LedgerError> {
        let mut batch = LedgerBatch::new();
        batch.mint(account, amount).emit(LedgerEvent::Mint {
            to: account.clone(),
            amount,
        });
        self.apply(batch)
    }

    /// Decrease a balance; fails if it holds less than `amount`.
    pub fn debit(&mut self, account: &Address, amount: Amount) -> Result<(), LedgerError> {
        let mut batch = LedgerBatch::new();
        batch.debit(account, amount);
        self.apply(batch)
    }

    /// Remove `amount` from circulation. The caller has already debited it.
    pub fn burn(&mut self, amount: Amount) -> Result<(), LedgerError> {
        let mut batch = LedgerBatch::new();
        batch.burn(amount);
        self.apply(batch)
    }

    /// Validate every op of `batch`, then commit all of them.
    ///
    /// On error nothing is written: neither balances, totals nor events.
    pub fn apply(&mut self, batch: LedgerBatch) -> Result<(), LedgerError> {
        let mut touched: BTreeMap<&Address, Amount> = BTreeMap::new();
        let mut supply = self.total_supply;
        let mut burned = self.total_burned;
        let mut minted = self.total_minted;

        for op in batch.ops() {
            match op {
                LedgerOp::Credit { account, amount } => {
                    let balance = self.staged_balance(&touched, account);
                    let updated = balance.checked_add(*amount).ok_or(LedgerError::Overflow)?;
                    touched.insert(account, updated);
                }
                LedgerOp::Mint { account, amount } => {
                    let balance = self.staged_balance(&touched, account);
                    let updated = balance.checked_add(*amount).ok_or(LedgerError::Overflow)?;
                    supply = supply.checked_add(*amount).ok_or(LedgerError::Overflow)?;
                    minted = minted.checked_add(*amount).ok_or(LedgerError::Overflow)?;
                    touched.insert(account, updated);
                }
                LedgerOp::Debit { account, amount } => {
                    let balance = self.staged_balance(&touched, account);
                    let updated =
                        balance
                            .checked_sub(*amount)
                            .ok_or(LedgerError::InsufficientBalance {
                                needed: *amount,
                                available: balance,
                            })?;
                    touched.insert(account, updated);
                }
                LedgerOp::Burn { amount } => {
                    supply = supply
                        .checked_sub(*amount)
                        .ok_or(LedgerError::BurnExceedsSupply {
                            amount: *amount,
                            supply,
                        })?;
                    burned = burned.checked_add(*amount).ok_or(LedgerError::Overflow)?;
                }
            }
        }

        let staged: Vec<(Address, Amount)> = touched
            .into_iter()
            .map(|(account, balance)| (account.clone(), balance))
            .collect();
        for (account, balance) in staged {
            self.balances.insert(account, balance);
        }
        self.total_supply = supply;
        self.total_burned = burned;
        self.total_minted = minted;

        let events = batch.into_events();
        for event in &events {
            tracing::trace!(kind = event.kind(), ?event, "ledger event");
        }
        self.events.extend(events);
        Ok(())
    }

    fn staged_balance(&self, touched: &BTreeMap<&Address, Amount>, account: &Address) -> Amount {
        touched
            .get(account)
            .copied()
            .unwrap_or_else(|| self.balance_of(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(name: &str) -> Address {
        Address::new(name)
    }

    fn funded(account: &Address, amount: u128) -> BalanceLedger {
        let mut ledger = BalanceLedger::new();
        ledger.mint(account, Amount::new(amount)).unwrap();
        ledger
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = BalanceLedger::new();
        assert_eq!(ledger.balance_of(&addr("nobody")), Amount::ZERO);
        assert_eq!(ledger.account_count(), 0);
    }

    #[test]
    fn mint_raises_supply_credit_does_not() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, 1_000);
        assert_eq!(ledger.total_supply(), Amount::new(1_000));
        assert_eq!(ledger.total_minted(), Amount::new(1_000));

        ledger.credit(&alice, Amount::new(50)).unwrap();
        assert_eq!(ledger.balance_of(&alice), Amount::new(1_050));
        assert_eq!(ledger.total_supply(), Amount::new(1_000));
    }

    #[test]
    fn debit_beyond_balance_fails_without_change() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, 100);
        let err = ledger.debit(&alice, Amount::new(101)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                needed: Amount::new(101),
                available: Amount::new(100),
            }
        );
        assert_eq!(ledger.balance_of(&alice), Amount::new(100));
    }

    #[test]
    fn burn_lowers_supply_and_tracks_total() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, 100);
        let mut batch = LedgerBatch::new();
        batch.debit(&alice, Amount::new(30)).burn(Amount::new(30));
        ledger.apply(batch).unwrap();

        assert_eq!(ledger.balance_of(&alice), Amount::new(70));
        assert_eq!(ledger.total_supply(), Amount::new(70));
        assert_eq!(ledger.total_burned(), Amount::new(30));
        assert_eq!(ledger.circulating(), ledger.total_supply());
    }

    #[test]
    fn burn_beyond_supply_is_rejected() {
        let mut ledger = funded(&addr("alice"), 10);
        assert!(matches!(
            ledger.burn(Amount::new(11)),
            Err(LedgerError::BurnExceedsSupply { .. })
        ));
        assert_eq!(ledger.total_supply(), Amount::new(10));
    }

    #[test]
    fn failed_batch_commits_nothing() {
        let alice = addr("alice");
        let bob = addr("bob");
        let mut ledger = funded(&alice, 100);
        let events_before = ledger.events().len();

        let mut batch = LedgerBatch::new();
        batch
            .debit(&alice, Amount::new(60))
            .credit(&bob, Amount::new(60))
            .debit(&alice, Amount::new(60))
            .emit(LedgerEvent::Transfer {
                from: alice.clone(),
                to: bob.clone(),
                amount: Amount::new(60),
            });
        assert!(ledger.apply(batch).is_err());

        assert_eq!(ledger.balance_of(&alice), Amount::new(100));
        assert_eq!(ledger.balance_of(&bob), Amount::ZERO);
        assert_eq!(ledger.account_count(), 1);
        assert_eq!(ledger.events().len(), events_before);
    }

    #[test]
    fn batch_ops_see_earlier_ops_on_same_account() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, 10);
        let mut batch = LedgerBatch::new();
        batch
            .debit(&alice, Amount::new(10))
            .credit(&alice, Amount::new(8))
            .burn(Amount::new(2));
        ledger.apply(batch).unwrap();
        assert_eq!(ledger.balance_of(&alice), Amount::new(8));
        assert_eq!(ledger.total_supply(), Amount::new(8));
    }

    #[test]
    fn credit_overflow_is_an_error() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, u128::MAX);
        assert_eq!(
            ledger.credit(&alice, Amount::new(1)),
            Err(LedgerError::Overflow)
        );
    }

    #[test]
    fn zero_balance_entries_persist() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, 5);
        ledger.debit(&alice, Amount::new(5)).unwrap();
        assert_eq!(ledger.account_count(), 1);
        assert_eq!(ledger.balance_of(&alice), Amount::ZERO);
    }

    #[test]
    fn events_are_recorded_and_drained() {
        let alice = addr("alice");
        let mut ledger = funded(&alice, 5);
        assert_eq!(
            ledger.events(),
            &[LedgerEvent::Mint {
                to: alice.clone(),
                amount: Amount::new(5)
            }]
        );
        assert_eq!(ledger.drain_events().len(), 1);
        assert!(ledger.events().is_empty());
    }
}
