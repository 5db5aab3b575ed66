use thiserror::Error;
use x1_types::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("burn of {amount} exceeds total supply {supply}")]
    BurnExceedsSupply { amount: Amount, supply: Amount },

    #[error("arithmetic overflow in ledger update")]
    Overflow,
}
