//! X1 balance ledger.
//!
//! Tracks the free balance of every account and the running total supply.
//! Every mutation goes through a [`LedgerBatch`] that is validated in full
//! before anything is written, so a failed operation leaves no trace.
//! Staked principal lives outside the ledger (see `x1-staking`).

pub mod batch;
pub mod error;
pub mod event;
pub mod genesis;
pub mod ledger;

pub use batch::{LedgerBatch, LedgerOp};
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use genesis::GenesisConfig;
pub use ledger::BalanceLedger;
