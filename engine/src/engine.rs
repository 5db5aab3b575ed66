//! The token engine: every public X1 operation over one ledger.

use serde::{Deserialize, Serialize};

use x1_ledger::{BalanceLedger, GenesisConfig, LedgerEvent};
use x1_staking::{RewardSchedule, StakeInfo, StakePosition, StakingEngine};
use x1_transfer::{PenaltyAuthority, SupplyAuthority, TransferProcessor, TransferReceipt};
use x1_types::{Address, Amount, Clock, TokenParams, Timestamp};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::snapshot::EngineSnapshot;
use crate::spans::operation_span;

/// Descriptive token metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Owns the ledger, the stake positions and the clock.
///
/// Every mutating operation takes `&mut self` and either applies completely
/// or returns an error with no state changed. Only staking operations read
/// the clock.
#[derive(Debug)]
pub struct TokenEngine<C> {
    params: TokenParams,
    ledger: BalanceLedger,
    staking: StakingEngine,
    transfers: TransferProcessor,
    penalties: PenaltyAuthority,
    supply: SupplyAuthority,
    clock: C,
}

/// Map an operation's error into the engine taxonomy and log the rejection.
fn rejected<E: Into<EngineError>>(e: E) -> EngineError {
    let e = e.into();
    tracing::debug!(error = %e, "operation rejected");
    e
}

impl<C: Clock> TokenEngine<C> {
    /// Create an engine whose ledger starts from `genesis`.
    pub fn new(params: TokenParams, genesis: &GenesisConfig, clock: C) -> Result<Self, EngineError> {
        params.validate()?;
        let ledger = BalanceLedger::genesis(genesis)?;
        tracing::info!(
            name = %params.name,
            symbol = %params.symbol,
            owner = %genesis.owner,
            supply = %genesis.initial_supply,
            "token engine created"
        );
        let staking = StakingEngine::from_params(&params);
        Ok(Self::assemble(params, ledger, staking, clock))
    }

    /// Create an engine from a loaded configuration.
    pub fn from_config(config: &EngineConfig, clock: C) -> Result<Self, EngineError> {
        config.validate()?;
        Self::new(config.params(), &config.genesis()?, clock)
    }

    /// Rebuild an engine from a snapshot. The snapshot is checked first.
    pub fn restore(snapshot: EngineSnapshot, clock: C) -> Result<Self, EngineError> {
        snapshot.check()?;
        let EngineSnapshot {
            params,
            ledger,
            positions,
            ..
        } = snapshot;
        let staking = StakingEngine::with_positions(RewardSchedule::from_params(&params), positions);
        tracing::debug!(
            accounts = ledger.account_count(),
            supply = %ledger.total_supply(),
            "engine restored from snapshot"
        );
        Ok(Self::assemble(params, ledger, staking, clock))
    }

    fn assemble(params: TokenParams, ledger: BalanceLedger, staking: StakingEngine, clock: C) -> Self {
        Self {
            transfers: TransferProcessor::from_params(&params),
            penalties: PenaltyAuthority::from_params(&params),
            supply: SupplyAuthority,
            params,
            ledger,
            staking,
            clock,
        }
    }

    /// Seal the current state into a snapshot.
    pub fn snapshot(&self) -> EngineSnapshot {
        let positions = self
            .staking
            .positions()
            .map(|(a, p)| (a.clone(), p.clone()))
            .collect();
        EngineSnapshot::create(self.params.clone(), self.ledger.clone(), positions)
    }

    fn now(&self) -> Result<Timestamp, EngineError> {
        self.clock.now().map_err(rejected)
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Move `amount` from `from` to `to`, burning the transfer share.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TransferReceipt, EngineError> {
        let _span = operation_span("transfer", from).entered();
        let receipt = self
            .transfers
            .transfer(&mut self.ledger, from, to, amount)
            .map_err(rejected)?;
        tracing::info!(
            %to,
            %amount,
            delivered = %receipt.delivered,
            burned = %receipt.burned,
            "transfer"
        );
        Ok(receipt)
    }

    /// Lock `amount` of free balance. Returns the new principal.
    pub fn stake(&mut self, account: &Address, amount: Amount) -> Result<Amount, EngineError> {
        let _span = operation_span("stake", account).entered();
        let now = self.now()?;
        let principal = self
            .staking
            .stake(&mut self.ledger, account, amount, now)
            .map_err(rejected)?;
        tracing::info!(%amount, %principal, at = %now, "stake");
        Ok(principal)
    }

    /// Release `amount` of principal. Returns the remaining principal.
    pub fn unstake(&mut self, account: &Address, amount: Amount) -> Result<Amount, EngineError> {
        let _span = operation_span("unstake", account).entered();
        let now = self.now()?;
        let remaining = self
            .staking
            .unstake(&mut self.ledger, account, amount, now)
            .map_err(rejected)?;
        tracing::info!(%amount, %remaining, at = %now, "unstake");
        Ok(remaining)
    }

    /// Pay out the reward for every whole period since the last claim.
    pub fn claim_rewards(&mut self, account: &Address) -> Result<Amount, EngineError> {
        let _span = operation_span("claim_rewards", account).entered();
        let now = self.now()?;
        let reward = self
            .staking
            .claim_rewards(&mut self.ledger, account, now)
            .map_err(rejected)?;
        tracing::info!(%reward, at = %now, "claim_rewards");
        Ok(reward)
    }

    /// Burn the penalty share of `account`'s free balance.
    pub fn penalize(&mut self, account: &Address) -> Result<Amount, EngineError> {
        let _span = operation_span("penalize", account).entered();
        let burned = self
            .penalties
            .penalize(&mut self.ledger, account)
            .map_err(rejected)?;
        tracing::info!(%burned, "penalize");
        Ok(burned)
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<(), EngineError> {
        let _span = operation_span("mint", to).entered();
        self.supply
            .mint(&mut self.ledger, to, amount)
            .map_err(rejected)?;
        tracing::info!(%amount, "mint");
        Ok(())
    }

    /// Destroy `amount` of `account`'s own free balance.
    pub fn burn(&mut self, account: &Address, amount: Amount) -> Result<(), EngineError> {
        let _span = operation_span("burn", account).entered();
        self.supply
            .burn(&mut self.ledger, account, amount)
            .map_err(rejected)?;
        tracing::info!(%amount, "burn");
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// Free balance; staked principal is not included.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }

    pub fn stake_info(&self, account: &Address) -> StakeInfo {
        self.staking.stake_info(account)
    }

    pub fn position(&self, account: &Address) -> Option<&StakePosition> {
        self.staking.position(account)
    }

    /// Reward a claim right now would pay.
    pub fn pending_rewards(&self, account: &Address) -> Result<Amount, EngineError> {
        let now = self.now()?;
        self.pending_rewards_at(account, now)
    }

    /// Reward a claim at `now` would pay, for callers that already read the
    /// clock and need other values from the same instant.
    pub fn pending_rewards_at(&self, account: &Address, now: Timestamp) -> Result<Amount, EngineError> {
        Ok(self.staking.pending_rewards(account, now)?)
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    pub fn total_burned(&self) -> Amount {
        self.ledger.total_burned()
    }

    pub fn total_minted(&self) -> Amount {
        self.ledger.total_minted()
    }

    pub fn total_staked(&self) -> Amount {
        self.staking.total_staked()
    }

    /// Sum of free balances.
    pub fn circulating(&self) -> Amount {
        self.ledger.circulating()
    }

    /// The burn a transfer of `amount` would incur.
    pub fn burn_amount(&self, amount: Amount) -> Result<Amount, EngineError> {
        Ok(self.transfers.burn_amount(amount)?)
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.params.name.clone(),
            symbol: self.params.symbol.clone(),
            decimals: self.params.decimals,
        }
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Events of every committed operation since the last drain, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        self.ledger.events()
    }

    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.ledger.drain_events()
    }
}
