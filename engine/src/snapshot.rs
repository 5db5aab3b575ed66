//! Engine snapshots: the whole engine state at one instant.
//!
//! A snapshot is what the CLI persists between invocations. Its hash is
//! computed deterministically from the state, so a truncated or edited file
//! is rejected on load instead of silently restoring wrong balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use x1_ledger::BalanceLedger;
use x1_staking::StakePosition;
use x1_types::{Address, TokenParams};

use crate::EngineError;

/// Current on-disk format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialisable copy of an engine's state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Format version for compatibility.
    pub version: u32,
    /// Token parameters in force.
    pub params: TokenParams,
    /// Free balances and supply totals.
    pub ledger: BalanceLedger,
    /// Active stake positions.
    pub positions: BTreeMap<Address, StakePosition>,
    /// Blake2b-256 of everything above.
    pub hash: [u8; 32],
}

impl EngineSnapshot {
    /// Build a snapshot and seal it with its hash.
    pub fn create(
        params: TokenParams,
        ledger: BalanceLedger,
        positions: BTreeMap<Address, StakePosition>,
    ) -> Self {
        let mut snap = Self {
            version: SNAPSHOT_VERSION,
            params,
            ledger,
            positions,
            hash: [0u8; 32],
        };
        snap.hash = snap.compute_hash();
        snap
    }

    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());

        let p = &self.params;
        hasher.update(p.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(p.symbol.as_bytes());
        hasher.update([0u8, p.decimals]);
        hasher.update(p.transfer_burn_bps.to_le_bytes());
        hasher.update(p.penalty_bps.to_le_bytes());
        hasher.update(p.reward_bps.to_le_bytes());
        hasher.update(p.reward_period_secs.to_le_bytes());

        hasher.update(self.ledger.total_supply().raw().to_le_bytes());
        hasher.update(self.ledger.total_burned().raw().to_le_bytes());
        hasher.update(self.ledger.total_minted().raw().to_le_bytes());
        hasher.update((self.ledger.account_count() as u64).to_le_bytes());
        for (account, balance) in self.ledger.iter() {
            hasher.update(account.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(balance.raw().to_le_bytes());
        }

        hasher.update((self.positions.len() as u64).to_le_bytes());
        for (account, pos) in &self.positions {
            hasher.update(account.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(pos.principal.raw().to_le_bytes());
            hasher.update(pos.staked_at.as_secs().to_le_bytes());
            hasher.update(pos.last_claim_at.as_secs().to_le_bytes());
            hasher.update(pos.rewards_claimed.raw().to_le_bytes());
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the hash matches the state.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Reject snapshots that cannot be restored: wrong version, bad hash,
    /// invalid parameters, or balances that do not add up to the supply.
    pub fn check(&self) -> Result<(), EngineError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(EngineError::Snapshot(format!(
                "unsupported version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        if !self.verify() {
            return Err(EngineError::Snapshot("hash mismatch".into()));
        }
        self.params.validate()?;

        let staked = self
            .positions
            .values()
            .try_fold(x1_types::Amount::ZERO, |acc, p| acc.checked_add(p.principal))
            .ok_or(EngineError::Overflow)?;
        let held = self
            .ledger
            .iter()
            .try_fold(staked, |acc, (_, balance)| acc.checked_add(balance))
            .ok_or(EngineError::Overflow)?;
        if held != self.ledger.total_supply() {
            return Err(EngineError::Snapshot(format!(
                "balances plus principal ({held}) do not match total supply ({})",
                self.ledger.total_supply()
            )));
        }
        Ok(())
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        bincode::serialize(self).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Deserialize a snapshot from bytes. Does not verify it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Number of accounts with a ledger entry.
    pub fn account_count(&self) -> usize {
        self.ledger.account_count()
    }
}
