//! X1 staking subsystem.
//!
//! Holders lock free balance into a per-account stake position. Principal
//! is tracked here, outside the balance ledger, and earns a simple
//! (non-compounding) reward per elapsed period:
//! `reward = floor(principal × reward_bps / 10 000) × periods`.
//!
//! This crate handles:
//! - Opening and topping up positions (settling accrued reward first)
//! - Partial and full unstaking
//! - Reward claims, minted as new supply
//! - Read-only previews of pending reward

pub mod engine;
pub mod error;
pub mod position;

pub use engine::StakingEngine;
pub use error::StakingError;
pub use position::{Accrual, RewardSchedule, StakeInfo, StakePosition};
