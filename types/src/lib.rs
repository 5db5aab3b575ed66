//! Fundamental types for the X1 token engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, timestamps, the clock capability and token parameters.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod time;

pub use address::Address;
pub use amount::{Amount, ParseAmountError, BPS_DENOMINATOR, DECIMALS, UNIT};
pub use error::ParamsError;
pub use params::TokenParams;
pub use time::{Clock, ClockError, SystemClock, Timestamp, SECS_PER_DAY};
