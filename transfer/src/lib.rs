//! X1 value movement rules on top of the balance ledger.
//!
//! This crate handles:
//! - Transfers with a proportional burn (default 5%)
//! - Administrative penalty burns of free balance (default 20%)
//! - Administrative minting and voluntary self-burns
//!
//! Every operation builds one [`x1_ledger::LedgerBatch`], so it either
//! applies in full or not at all.

pub mod error;
pub mod penalty;
pub mod processor;
pub mod supply;

pub use error::TransferError;
pub use penalty::PenaltyAuthority;
pub use processor::{TransferProcessor, TransferReceipt};
pub use supply::SupplyAuthority;
