//! End-to-end behaviour of the token engine driven by a deterministic clock.

use x1_engine::{EngineConfig, EngineError, LedgerEvent, TokenEngine};
use x1_ledger::GenesisConfig;
use x1_nullables::NullClock;
use x1_types::{Address, Amount, TokenParams, Timestamp, SECS_PER_DAY, UNIT};

fn owner() -> Address {
    Address::new("0x00000000000000000000000000000000000000a1")
}

fn alice() -> Address {
    Address::new("0x00000000000000000000000000000000000a11ce")
}

fn bob() -> Address {
    Address::new("0x0000000000000000000000000000000000000b0b")
}

fn engine_at(secs: u64) -> TokenEngine<NullClock> {
    let genesis = GenesisConfig::new(owner(), Amount::tokens(1_000_000));
    TokenEngine::new(TokenParams::default(), &genesis, NullClock::new(secs)).unwrap()
}

fn assert_conserved(engine: &TokenEngine<NullClock>) {
    assert_eq!(
        engine.circulating() + engine.total_staked(),
        engine.total_supply(),
        "free balances plus principal must equal supply"
    );
}

#[test]
fn transfer_of_one_hundred_burns_five() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::new(1_000)).unwrap();
    let supply = engine.total_supply();

    let receipt = engine.transfer(&alice(), &bob(), Amount::new(100)).unwrap();

    assert_eq!(receipt.delivered, Amount::new(95));
    assert_eq!(receipt.burned, Amount::new(5));
    assert_eq!(engine.balance_of(&alice()), Amount::new(950 - 100));
    assert_eq!(engine.balance_of(&bob()), Amount::new(95));
    assert_eq!(engine.total_supply(), supply - Amount::new(5));
    assert_conserved(&engine);
}

#[test]
fn transfer_of_nineteen_burns_nothing() {
    let mut engine = engine_at(0);
    let supply = engine.total_supply();
    let receipt = engine.transfer(&owner(), &bob(), Amount::new(19)).unwrap();

    assert_eq!(receipt.burned, Amount::ZERO);
    assert_eq!(receipt.delivered, Amount::new(19));
    assert_eq!(engine.total_supply(), supply);
}

#[test]
fn over_balance_transfer_changes_nothing() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::new(100)).unwrap();
    engine.drain_events();
    let supply = engine.total_supply();

    let err = engine
        .transfer(&alice(), &bob(), Amount::new(96))
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InsufficientBalance {
            needed: Amount::new(96),
            available: Amount::new(95),
        }
    );
    assert_eq!(engine.balance_of(&alice()), Amount::new(95));
    assert_eq!(engine.balance_of(&bob()), Amount::ZERO);
    assert_eq!(engine.total_supply(), supply);
    assert!(engine.events().is_empty());
}

#[test]
fn zero_amounts_are_invalid() {
    let mut engine = engine_at(0);
    let zero = Amount::ZERO;
    assert!(matches!(
        engine.transfer(&owner(), &bob(), zero),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.stake(&owner(), zero),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.mint(&owner(), zero),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.burn(&owner(), zero),
        Err(EngineError::InvalidAmount(_))
    ));
}

#[test]
fn stake_nine_and_a_half_tokens_and_claim_after_a_day() {
    let mut engine = engine_at(1_700_000_000);
    // 10 tokens arrive as 9.5 after the transfer burn.
    engine.transfer(&owner(), &alice(), Amount::tokens(10)).unwrap();
    let received = engine.balance_of(&alice());
    assert_eq!(received, Amount::new(95 * UNIT / 10));

    let principal = engine.stake(&alice(), received).unwrap();
    assert_eq!(principal, received);
    assert_eq!(engine.balance_of(&alice()), Amount::ZERO);
    assert_conserved(&engine);

    engine.clock().advance_days(1);
    let supply = engine.total_supply();
    let reward = engine.claim_rewards(&alice()).unwrap();

    assert_eq!(reward, Amount::new(95 * UNIT / 1_000));
    assert_eq!(engine.balance_of(&alice()), reward);
    assert_eq!(engine.total_supply(), supply + reward);
    assert_conserved(&engine);

    // Claiming again within the same period pays nothing.
    assert_eq!(engine.claim_rewards(&alice()).unwrap(), Amount::ZERO);
    assert_eq!(engine.balance_of(&alice()), reward);
}

#[test]
fn penalty_spares_staked_principal() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::tokens(100)).unwrap();
    engine.stake(&alice(), Amount::tokens(45)).unwrap();
    assert_eq!(engine.balance_of(&alice()), Amount::tokens(50));
    let supply = engine.total_supply();

    let burned = engine.penalize(&alice()).unwrap();

    assert_eq!(burned, Amount::tokens(10));
    assert_eq!(engine.balance_of(&alice()), Amount::tokens(40));
    assert_eq!(engine.stake_info(&alice()).principal, Amount::tokens(45));
    assert_eq!(engine.total_supply(), supply - burned);
    assert_conserved(&engine);
}

#[test]
fn penalty_on_empty_balance_fails() {
    let mut engine = engine_at(0);
    assert!(matches!(
        engine.penalize(&bob()),
        Err(EngineError::InsufficientBalance { .. })
    ));
}

#[test]
fn daily_claims_equal_one_claim_after_n_days() {
    let stake = Amount::new(777_777_777_777_777_777);
    let mut daily = engine_at(0);
    let mut once = engine_at(0);
    for e in [&mut daily, &mut once] {
        e.transfer(&owner(), &alice(), Amount::tokens(10)).unwrap();
        e.stake(&alice(), stake).unwrap();
    }

    let mut total = Amount::ZERO;
    for _ in 0..10 {
        daily.clock().advance(SECS_PER_DAY / 2);
        total = total + daily.claim_rewards(&alice()).unwrap();
        daily.clock().advance(SECS_PER_DAY / 2);
        total = total + daily.claim_rewards(&alice()).unwrap();
    }
    once.clock().advance_days(10);
    let single = once.claim_rewards(&alice()).unwrap();

    assert_eq!(total, single);
    assert_eq!(daily.balance_of(&alice()), once.balance_of(&alice()));
    assert_eq!(daily.total_supply(), once.total_supply());
}

#[test]
fn backward_clock_yields_no_reward() {
    let mut engine = engine_at(10 * SECS_PER_DAY);
    engine.transfer(&owner(), &alice(), Amount::tokens(10)).unwrap();
    engine.stake(&alice(), Amount::tokens(5)).unwrap();

    engine.clock().set(SECS_PER_DAY);
    assert_eq!(engine.pending_rewards(&alice()).unwrap(), Amount::ZERO);
    assert_eq!(engine.claim_rewards(&alice()).unwrap(), Amount::ZERO);
    assert_eq!(
        engine.stake_info(&alice()).last_claim_at,
        Timestamp::new(10 * SECS_PER_DAY)
    );
}

#[test]
fn pending_rewards_at_uses_the_given_instant() {
    let mut engine = engine_at(0);
    engine.stake(&owner(), Amount::tokens(1_000)).unwrap();
    engine.clock().set(SECS_PER_DAY - 1);

    assert_eq!(engine.pending_rewards(&owner()).unwrap(), Amount::ZERO);
    assert_eq!(
        engine
            .pending_rewards_at(&owner(), Timestamp::new(2 * SECS_PER_DAY))
            .unwrap(),
        Amount::tokens(20)
    );
    assert_eq!(
        engine.pending_rewards_at(&alice(), Timestamp::new(2 * SECS_PER_DAY)),
        Ok(Amount::ZERO)
    );
}

#[test]
fn failing_clock_changes_nothing() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::tokens(10)).unwrap();
    engine.stake(&alice(), Amount::tokens(5)).unwrap();
    engine.clock().advance_days(3);
    engine.drain_events();

    let snapshot = engine.snapshot();
    for attempt in 0..3 {
        engine.clock().fail_next();
        let result = match attempt {
            0 => engine.stake(&alice(), Amount::tokens(1)).map(|_| ()),
            1 => engine.unstake(&alice(), Amount::tokens(1)).map(|_| ()),
            _ => engine.claim_rewards(&alice()).map(|_| ()),
        };
        assert!(matches!(result, Err(EngineError::Clock(_))));
    }

    assert_eq!(engine.snapshot().hash, snapshot.hash);
    assert!(engine.events().is_empty());

    // The clock works again and the accrued reward is intact.
    assert_eq!(
        engine.claim_rewards(&alice()).unwrap(),
        Amount::new(3 * 5 * UNIT / 100)
    );
}

#[test]
fn unstake_settles_and_returns_principal() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::tokens(100)).unwrap();
    engine.stake(&alice(), Amount::tokens(80)).unwrap();
    engine.clock().advance_days(2);

    let remaining = engine.unstake(&alice(), Amount::tokens(30)).unwrap();
    assert_eq!(remaining, Amount::tokens(50));
    // 15 free + 30 unstaked + 2 days at 1% of 80.
    assert_eq!(
        engine.balance_of(&alice()),
        Amount::tokens(45) + Amount::new(16 * UNIT / 10)
    );
    assert_conserved(&engine);

    assert_eq!(engine.unstake(&alice(), Amount::tokens(50)).unwrap(), Amount::ZERO);
    assert!(engine.position(&alice()).is_none());
    assert_eq!(
        engine.claim_rewards(&alice()),
        Err(EngineError::NoActivePosition)
    );
    assert!(matches!(
        engine.unstake(&alice(), Amount::tokens(1)),
        Err(EngineError::NoActivePosition)
    ));
}

#[test]
fn over_unstake_is_invalid() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::tokens(10)).unwrap();
    engine.stake(&alice(), Amount::tokens(5)).unwrap();
    assert!(matches!(
        engine.unstake(&alice(), Amount::tokens(6)),
        Err(EngineError::InvalidAmount(_))
    ));
    assert_eq!(engine.stake_info(&alice()).principal, Amount::tokens(5));
}

#[test]
fn mint_and_burn_adjust_supply() {
    let mut engine = engine_at(0);
    let supply = engine.total_supply();

    engine.mint(&bob(), Amount::tokens(7)).unwrap();
    assert_eq!(engine.total_supply(), supply + Amount::tokens(7));
    assert_eq!(engine.total_minted(), supply + Amount::tokens(7));

    engine.burn(&bob(), Amount::tokens(2)).unwrap();
    assert_eq!(engine.balance_of(&bob()), Amount::tokens(5));
    assert_eq!(engine.total_burned(), Amount::tokens(2));
    assert!(matches!(
        engine.burn(&bob(), Amount::tokens(6)),
        Err(EngineError::InsufficientBalance { .. })
    ));
    assert_conserved(&engine);
}

#[test]
fn operations_emit_events_in_order() {
    let mut engine = engine_at(0);
    engine.drain_events();

    engine.transfer(&owner(), &alice(), Amount::new(100)).unwrap();
    engine.stake(&alice(), Amount::new(50)).unwrap();
    engine.clock().advance_days(1);
    engine.unstake(&alice(), Amount::new(50)).unwrap();

    let kinds: Vec<_> = engine.events().iter().map(LedgerEvent::kind).collect();
    assert_eq!(
        kinds,
        vec!["transfer", "burn", "locked", "unlocked"],
        "reward on 50 raw units rounds to zero, so no mint event"
    );
}

#[test]
fn engine_from_default_config() {
    let config = EngineConfig::default();
    let engine = TokenEngine::from_config(&config, NullClock::new(0)).unwrap();
    let metadata = engine.metadata();

    assert_eq!(metadata.name, "X1TestCoin");
    assert_eq!(metadata.symbol, "X1TC");
    assert_eq!(metadata.decimals, 18);
    assert_eq!(
        engine.balance_of(&Address::new(config.owner.as_str())),
        Amount::tokens(1_000_000)
    );
}

#[test]
fn snapshot_survives_bytes_round_trip() {
    let mut engine = engine_at(0);
    engine.transfer(&owner(), &alice(), Amount::tokens(20)).unwrap();
    engine.stake(&alice(), Amount::tokens(10)).unwrap();

    let bytes = engine.snapshot().to_bytes().unwrap();
    let snapshot = x1_engine::EngineSnapshot::from_bytes(&bytes).unwrap();
    let restored = TokenEngine::restore(snapshot, NullClock::new(0)).unwrap();

    assert_eq!(restored.balance_of(&alice()), engine.balance_of(&alice()));
    assert_eq!(restored.stake_info(&alice()), engine.stake_info(&alice()));
    assert_eq!(restored.total_supply(), engine.total_supply());
    assert!(restored.events().is_empty());
}
