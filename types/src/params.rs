//! Token parameters: metadata plus the economic constants of the engine.
//!
//! All percentages are basis points (10 000 = 100%) so burn and reward
//! arithmetic stays in integers.

use crate::amount::{BPS_DENOMINATOR, DECIMALS};
use crate::error::ParamsError;
use crate::time::SECS_PER_DAY;
use serde::{Deserialize, Serialize};

/// Parameters shared by every component of the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    // ── Metadata ─────────────────────────────────────────────────────────
    /// Human-readable token name.
    pub name: String,

    /// Ticker symbol.
    pub symbol: String,

    /// Fractional decimal digits. Only 18 is supported.
    pub decimals: u8,

    // ── Burns ────────────────────────────────────────────────────────────
    /// Share of every transfer removed from circulation. Default 5%.
    pub transfer_burn_bps: u32,

    /// Share of free balance burned by a penalty. Default 20%.
    pub penalty_bps: u32,

    // ── Staking ──────────────────────────────────────────────────────────
    /// Simple reward per elapsed period, as a share of principal. Default 1%.
    pub reward_bps: u32,

    /// Length of one reward period in seconds. Default one day.
    pub reward_period_secs: u64,
}

impl TokenParams {
    /// X1TestCoin defaults: 5% transfer burn, 20% penalty, 1% daily reward.
    pub fn x1_defaults() -> Self {
        Self {
            name: "X1TestCoin".to_string(),
            symbol: "X1TC".to_string(),
            decimals: DECIMALS,

            transfer_burn_bps: 500,
            penalty_bps: 2000,

            reward_bps: 100,
            reward_period_secs: SECS_PER_DAY,
        }
    }

    /// Check that every parameter is within range.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.name.trim().is_empty() {
            return Err(ParamsError::Empty("name"));
        }
        if self.symbol.trim().is_empty() {
            return Err(ParamsError::Empty("symbol"));
        }
        if self.decimals != DECIMALS {
            return Err(ParamsError::UnsupportedDecimals(self.decimals));
        }
        for (field, bps) in [
            ("transfer_burn_bps", self.transfer_burn_bps),
            ("penalty_bps", self.penalty_bps),
            ("reward_bps", self.reward_bps),
        ] {
            if bps as u128 > BPS_DENOMINATOR {
                return Err(ParamsError::BpsOutOfRange { field, bps });
            }
        }
        if self.reward_period_secs == 0 {
            return Err(ParamsError::ZeroRewardPeriod);
        }
        Ok(())
    }
}

/// Default is the X1TestCoin configuration.
impl Default for TokenParams {
    fn default() -> Self {
        Self::x1_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = TokenParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.transfer_burn_bps, 500);
        assert_eq!(params.penalty_bps, 2000);
        assert_eq!(params.reward_bps, 100);
        assert_eq!(params.reward_period_secs, 86_400);
    }

    #[test]
    fn rejects_bps_above_one_hundred_percent() {
        let params = TokenParams {
            penalty_bps: 10_001,
            ..TokenParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::BpsOutOfRange {
                field: "penalty_bps",
                bps: 10_001
            })
        );
    }

    #[test]
    fn rejects_zero_period_and_odd_decimals() {
        let zero_period = TokenParams {
            reward_period_secs: 0,
            ..TokenParams::default()
        };
        assert_eq!(zero_period.validate(), Err(ParamsError::ZeroRewardPeriod));

        let six_decimals = TokenParams {
            decimals: 6,
            ..TokenParams::default()
        };
        assert_eq!(six_decimals.validate(), Err(ParamsError::UnsupportedDecimals(6)));
    }
}
