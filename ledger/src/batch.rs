//! Ledger batches: an ordered set of balance operations applied atomically.

use crate::event::LedgerEvent;
use x1_types::{Address, Amount};

/// A single balance operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerOp {
    /// Increase a balance without touching total supply (internal moves).
    Credit { account: Address, amount: Amount },
    /// Increase a balance and the total supply by the same amount.
    Mint { account: Address, amount: Amount },
    /// Decrease a balance; fails if the balance is too small.
    Debit { account: Address, amount: Amount },
    /// Remove value from circulation. The source must be debited in the same batch.
    Burn { amount: Amount },
}

/// Operations and events that commit together or not at all.
///
/// Ops are validated in order, so a `Debit` sees the effect of an earlier
/// `Credit` to the same account within the batch.
#[derive(Clone, Debug, Default)]
pub struct LedgerBatch {
    ops: Vec<LedgerOp>,
    events: Vec<LedgerEvent>,
}

impl LedgerBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, account: &Address, amount: Amount) -> &mut Self {
        self.push(LedgerOp::Credit {
            account: account.clone(),
            amount,
        })
    }

    pub fn mint(&mut self, account: &Address, amount: Amount) -> &mut Self {
        self.push(LedgerOp::Mint {
            account: account.clone(),
            amount,
        })
    }

    pub fn debit(&mut self, account: &Address, amount: Amount) -> &mut Self {
        self.push(LedgerOp::Debit {
            account: account.clone(),
            amount,
        })
    }

    pub fn burn(&mut self, amount: Amount) -> &mut Self {
        self.push(LedgerOp::Burn { amount })
    }

    /// Record an event to publish if the batch commits.
    pub fn emit(&mut self, event: LedgerEvent) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn ops(&self) -> &[LedgerOp] {
        &self.ops
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn into_events(self) -> Vec<LedgerEvent> {
        self.events
    }

    /// Zero-amount ops are no-ops and are dropped.
    fn push(&mut self, op: LedgerOp) -> &mut Self {
        let amount = match &op {
            LedgerOp::Credit { amount, .. }
            | LedgerOp::Mint { amount, .. }
            | LedgerOp::Debit { amount, .. }
            | LedgerOp::Burn { amount } => *amount,
        };
        if !amount.is_zero() {
            self.ops.push(op);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_ops_are_dropped() {
        let alice = Address::new("alice");
        let mut batch = LedgerBatch::new();
        batch
            .debit(&alice, Amount::new(10))
            .burn(Amount::ZERO)
            .credit(&alice, Amount::ZERO);
        assert_eq!(batch.ops().len(), 1);
        assert!(!batch.is_empty());
    }
}
