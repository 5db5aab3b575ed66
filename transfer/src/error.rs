//! Transfer-specific errors.

use thiserror::Error;
use x1_ledger::LedgerError;
use x1_types::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("arithmetic overflow in transfer computation")]
    Overflow,

    #[error("ledger rejected update: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for TransferError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            LedgerError::Overflow => Self::Overflow,
            other => Self::Ledger(other),
        }
    }
}
