//! Thread-safe engine handle.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use x1_ledger::LedgerEvent;
use x1_staking::StakeInfo;
use x1_transfer::TransferReceipt;
use x1_types::{Address, Amount, Clock};

use crate::engine::TokenEngine;
use crate::error::EngineError;
use crate::snapshot::EngineSnapshot;

/// A cloneable handle to one engine shared between threads.
///
/// Mutations take the write lock, so they are applied one at a time in lock
/// order. Reads take the read lock and never observe a half-applied
/// operation. A writer that panicked poisons the lock; every later call then
/// fails with [`EngineError::Poisoned`].
pub struct SharedEngine<C> {
    inner: Arc<RwLock<TokenEngine<C>>>,
}

impl<C> Clone for SharedEngine<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedEngine<C> {
    pub fn new(engine: TokenEngine<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TokenEngine<C>>, EngineError> {
        self.inner.read().map_err(|_| EngineError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TokenEngine<C>>, EngineError> {
        self.inner.write().map_err(|_| EngineError::Poisoned)
    }

    /// Run `f` against a consistent view of the engine.
    pub fn with_read<T>(&self, f: impl FnOnce(&TokenEngine<C>) -> T) -> Result<T, EngineError> {
        Ok(f(&*self.read()?))
    }

    /// Run `f` with exclusive access, e.g. to apply several operations as one
    /// unit. Each operation inside `f` is still individually atomic.
    pub fn with_write<T>(
        &self,
        f: impl FnOnce(&mut TokenEngine<C>) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        f(&mut *self.write()?)
    }

    pub fn transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TransferReceipt, EngineError> {
        self.write()?.transfer(from, to, amount)
    }

    pub fn stake(&self, account: &Address, amount: Amount) -> Result<Amount, EngineError> {
        self.write()?.stake(account, amount)
    }

    pub fn unstake(&self, account: &Address, amount: Amount) -> Result<Amount, EngineError> {
        self.write()?.unstake(account, amount)
    }

    pub fn claim_rewards(&self, account: &Address) -> Result<Amount, EngineError> {
        self.write()?.claim_rewards(account)
    }

    pub fn penalize(&self, account: &Address) -> Result<Amount, EngineError> {
        self.write()?.penalize(account)
    }

    pub fn mint(&self, to: &Address, amount: Amount) -> Result<(), EngineError> {
        self.write()?.mint(to, amount)
    }

    pub fn burn(&self, account: &Address, amount: Amount) -> Result<(), EngineError> {
        self.write()?.burn(account, amount)
    }

    pub fn drain_events(&self) -> Result<Vec<LedgerEvent>, EngineError> {
        Ok(self.write()?.drain_events())
    }

    pub fn balance_of(&self, account: &Address) -> Result<Amount, EngineError> {
        Ok(self.read()?.balance_of(account))
    }

    pub fn stake_info(&self, account: &Address) -> Result<StakeInfo, EngineError> {
        Ok(self.read()?.stake_info(account))
    }

    pub fn pending_rewards(&self, account: &Address) -> Result<Amount, EngineError> {
        self.read()?.pending_rewards(account)
    }

    pub fn total_supply(&self) -> Result<Amount, EngineError> {
        Ok(self.read()?.total_supply())
    }

    pub fn total_staked(&self) -> Result<Amount, EngineError> {
        Ok(self.read()?.total_staked())
    }

    pub fn snapshot(&self) -> Result<EngineSnapshot, EngineError> {
        Ok(self.read()?.snapshot())
    }
}
