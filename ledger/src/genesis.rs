//! Genesis: the initial distribution of supply.
//!
//! At deployment the whole initial supply is minted to a single owner
//! account; every other balance derives from transfers out of it.

use serde::{Deserialize, Serialize};
use x1_types::{Address, Amount};

use crate::error::LedgerError;
use crate::ledger::BalanceLedger;

/// Configuration for creating a genesis ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The account that receives the initial supply (the deployer).
    pub owner: Address,
    /// Total supply minted at genesis.
    pub initial_supply: Amount,
}

impl GenesisConfig {
    /// Default supply: one million whole tokens.
    pub const DEFAULT_SUPPLY_TOKENS: u128 = 1_000_000;

    pub fn new(owner: Address, initial_supply: Amount) -> Self {
        Self {
            owner,
            initial_supply,
        }
    }
}

impl BalanceLedger {
    /// Create a ledger holding the initial supply in the owner's account.
    pub fn genesis(config: &GenesisConfig) -> Result<Self, LedgerError> {
        let mut ledger = BalanceLedger::new();
        ledger.mint(&config.owner, config.initial_supply)?;
        tracing::debug!(
            owner = %config.owner,
            supply = %config.initial_supply,
            "genesis supply minted"
        );
        Ok(ledger)
    }
}
