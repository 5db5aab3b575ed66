//! Errors shared across crates.

use thiserror::Error;

/// Invalid token parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("unsupported decimals {0}, only 18 is supported")]
    UnsupportedDecimals(u8),

    #[error("{field} = {bps} exceeds 10000 basis points")]
    BpsOutOfRange { field: &'static str, bps: u32 },

    #[error("reward period must be non-zero")]
    ZeroRewardPeriod,
}
