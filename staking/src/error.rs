//! Staking-specific errors.

use thiserror::Error;
use x1_ledger::LedgerError;
use x1_types::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("cannot unstake {requested}: only {principal} is staked")]
    ExceedsPrincipal { requested: Amount, principal: Amount },

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("account has no active stake position")]
    NoActivePosition,

    #[error("arithmetic overflow in staking computation")]
    Overflow,

    #[error("ledger rejected update: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for StakingError {
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
