//! Engine errors: one taxonomy for every public operation.

use thiserror::Error;
use x1_ledger::LedgerError;
use x1_staking::StakingError;
use x1_transfer::TransferError;
use x1_types::{Amount, ClockError, ParamsError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Zero or out-of-range input. A caller bug; not retried.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Business-rule violation surfaced to the end user.
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("account has no active stake position")]
    NoActivePosition,

    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("engine lock poisoned by a panicked writer")]
    Poisoned,
}

impl From<LedgerError> for EngineError {
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

impl From<TransferError> for EngineError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::ZeroAmount => Self::InvalidAmount("amount must be non-zero".into()),
            TransferError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            TransferError::Overflow => Self::Overflow,
            TransferError::Ledger(inner) => inner.into(),
        }
    }
}

impl From<StakingError> for EngineError {
    fn from(e: StakingError) -> Self {
        match e {
            StakingError::ZeroAmount => Self::InvalidAmount("amount must be non-zero".into()),
            StakingError::ExceedsPrincipal {
                requested,
                principal,
            } => Self::InvalidAmount(format!(
                "cannot unstake {requested}, only {principal} is staked"
            )),
            StakingError::InsufficientBalance { needed, available } => {
                Self::InsufficientBalance { needed, available }
            }
            StakingError::NoActivePosition => Self::NoActivePosition,
            StakingError::Overflow => Self::Overflow,
            StakingError::Ledger(inner) => inner.into(),
        }
    }
}

impl From<ParamsError> for EngineError {
    fn from(e: ParamsError) -> Self {
        Self::Config(e.to_string())
    }
}
