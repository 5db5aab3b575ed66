//! Ledger events, recorded in commit order.

use serde::{Deserialize, Serialize};
use x1_types::{Address, Amount};

/// An observable effect of a committed batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Value moved between accounts (`amount` is what the recipient received).
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// Value removed from circulation.
    Burn { burner: Address, amount: Amount },
    /// Newly created value credited to `to`.
    Mint { to: Address, amount: Amount },
    /// Free balance locked into a stake position.
    Locked { account: Address, amount: Amount },
    /// Staked principal returned to free balance.
    Unlocked { account: Address, amount: Amount },
}

impl LedgerEvent {
    /// Short name of the event kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Burn { .. } => "burn",
            Self::Mint { .. } => "mint",
            Self::Locked { .. } => "locked",
            Self::Unlocked { .. } => "unlocked",
        }
    }
}
