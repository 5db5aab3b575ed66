//! Administrative penalty burns.
//!
//! A penalty burns a share of an account's free balance. Staked principal is
//! held outside the ledger and is therefore never touched. Deciding who may
//! issue a penalty is the caller's job.

use x1_ledger::{BalanceLedger, LedgerBatch, LedgerEvent};
use x1_types::{Address, Amount, TokenParams};

use crate::error::TransferError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenaltyAuthority {
    penalty_bps: u32,
}

impl PenaltyAuthority {
    pub fn new(penalty_bps: u32) -> Self {
        Self { penalty_bps }
    }

    pub fn from_params(params: &TokenParams) -> Self {
        Self::new(params.penalty_bps)
    }

    /// Burn `floor(balance * penalty_bps / 10_000)` of `account`'s free balance.
    ///
    /// Fails with `InsufficientBalance` when the account holds nothing. A
    /// balance too small to yield a nonzero share burns zero.
    pub fn penalize(
        &self,
        ledger: &mut BalanceLedger,
        account: &Address,
    ) -> Result<Amount, TransferError> {
        let balance = ledger.balance_of(account);
        if balance.is_zero() {
            return Err(TransferError::InsufficientBalance {
                needed: Amount::new(1),
                available: Amount::ZERO,
            });
        }
        let burned = balance
            .checked_bps(self.penalty_bps)
            .ok_or(TransferError::Overflow)?;

        let mut batch = LedgerBatch::new();
        batch.debit(account, burned).burn(burned);
        if !burned.is_zero() {
            batch.emit(LedgerEvent::Burn {
                burner: account.clone(),
                amount: burned,
            });
        }
        ledger.apply(batch)?;

        tracing::debug!(%account, %balance, %burned, "penalty applied");
        Ok(burned)
    }
}

impl Default for PenaltyAuthority {
    fn default() -> Self {
        Self::from_params(&TokenParams::default())
    }
}
