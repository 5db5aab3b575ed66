//! X1 token engine.
//!
//! [`TokenEngine`] owns the balance ledger, the stake positions, the token
//! parameters and an injected [`x1_types::Clock`]. It exposes the five
//! public operations (`transfer`, `stake`, `unstake`, `claim_rewards`,
//! `penalize`) plus administrative `mint` and voluntary `burn`, each applied
//! as one atomic step.
//!
//! [`SharedEngine`] wraps an engine for multi-threaded hosts: writers are
//! serialised, readers see a consistent snapshot.

pub mod config;
pub mod engine;
pub mod error;
pub mod shared;
pub mod snapshot;
pub mod spans;

pub use config::EngineConfig;
pub use engine::{TokenEngine, TokenMetadata};
pub use error::EngineError;
pub use shared::SharedEngine;
pub use snapshot::EngineSnapshot;

pub use x1_ledger::LedgerEvent;
pub use x1_staking::StakeInfo;
pub use x1_transfer::TransferReceipt;
