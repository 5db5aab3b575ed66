//! Burn-on-transfer processing.

use serde::{Deserialize, Serialize};
use x1_ledger::{BalanceLedger, LedgerBatch, LedgerEvent};
use x1_types::{Address, Amount, TokenParams};

use crate::error::TransferError;

/// Outcome of a transfer, so callers can reconcile without recomputing the burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Amount credited to the recipient.
    pub delivered: Amount,
    /// Amount removed from circulation.
    pub burned: Amount,
}

/// Moves value between accounts, burning a fixed share of every transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferProcessor {
    burn_bps: u32,
}

impl TransferProcessor {
    pub fn new(burn_bps: u32) -> Self {
        Self { burn_bps }
    }

    pub fn from_params(params: &TokenParams) -> Self {
        Self::new(params.transfer_burn_bps)
    }

    /// The burn a transfer of `amount` would incur: `floor(amount * bps / 10_000)`.
    ///
    /// Below 20 raw units at the default 5% this is zero.
    pub fn burn_amount(&self, amount: Amount) -> Result<Amount, TransferError> {
        amount
            .checked_bps(self.burn_bps)
            .ok_or(TransferError::Overflow)
    }

    /// Split `amount` into what the recipient receives and what is burned.
    pub fn quote(&self, amount: Amount) -> Result<TransferReceipt, TransferError> {
        let burned = self.burn_amount(amount)?;
        let delivered = amount.checked_sub(burned).ok_or(TransferError::Overflow)?;
        Ok(TransferReceipt { delivered, burned })
    }

    /// Transfer `amount` from `from` to `to`.
    ///
    /// `from` is debited the full amount, `to` is credited the amount net of
    /// the burn, and the burn leaves circulation. This holds when `from == to`
    /// too: a self-transfer still burns.
    pub fn transfer(
        &self,
        ledger: &mut BalanceLedger,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TransferReceipt, TransferError> {
        if amount.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        let available = ledger.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                needed: amount,
                available,
            });
        }

        let receipt = self.quote(amount)?;
        let mut batch = LedgerBatch::new();
        batch
            .debit(from, amount)
            .credit(to, receipt.delivered)
            .burn(receipt.burned)
            .emit(LedgerEvent::Transfer {
                from: from.clone(),
                to: to.clone(),
                amount: receipt.delivered,
            });
        if !receipt.burned.is_zero() {
            batch.emit(LedgerEvent::Burn {
                burner: from.clone(),
                amount: receipt.burned,
            });
        }
        ledger.apply(batch)?;

        tracing::debug!(
            %from,
            %to,
            amount = %amount,
            delivered = %receipt.delivered,
            burned = %receipt.burned,
            "transfer applied"
        );
        Ok(receipt)
    }
}

impl Default for TransferProcessor {
    fn default() -> Self {
        Self::from_params(&TokenParams::default())
    }
}
