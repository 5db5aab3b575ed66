//! Token amount type.
//!
//! Amounts are fixed-point integers (u128) with 18 fractional decimal digits,
//! so all burn and reward arithmetic is exact integer math. The smallest unit
//! is 1 raw; one whole token is [`UNIT`] raw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional decimal digits.
pub const DECIMALS: u8 = 18;

/// Raw units per whole token (10^18).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Denominator for basis-point percentages (100% = 10 000 bps).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// An X1 token amount in raw units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole tokens, e.g. `Amount::tokens(10)` is 10 * 10^18 raw.
    pub fn tokens(whole: u128) -> Self {
        Self(whole.saturating_mul(UNIT))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn checked_mul(self, factor: u128) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// `floor(self * bps / 10_000)`. Returns `None` on overflow.
    pub fn checked_bps(self, bps: u32) -> Option<Self> {
        self.0
            .checked_mul(bps as u128)
            .map(|scaled| Self(scaled / BPS_DENOMINATOR))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

/// Formats as a decimal token string with trailing zeros trimmed (`"95"`, `"0.5"`).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNIT;
        let frac = self.0 % UNIT;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{:0>width$}", frac, width = DECIMALS as usize);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Errors from parsing a decimal token string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid digit in amount: {0:?}")]
    InvalidDigit(String),

    #[error("more than 18 fractional digits")]
    TooPrecise,

    #[error("amount does not fit in 128 bits")]
    Overflow,
}

/// Parses decimal token strings such as `"100"`, `"9.5"` or `".25"`.
impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace('_', "");
        if s.is_empty() || s == "." {
            return Err(ParseAmountError::Empty);
        }
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s.as_str(), ""),
        };
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(whole) || !is_digits(frac) {
            return Err(ParseAmountError::InvalidDigit(s.clone()));
        }
        if frac.len() > DECIMALS as usize {
            return Err(ParseAmountError::TooPrecise);
        }

        let whole_raw = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| ParseAmountError::Overflow)?
        };
        let frac_raw = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = DECIMALS as usize);
            padded.parse::<u128>().map_err(|_| ParseAmountError::Overflow)?
        };

        whole_raw
            .checked_mul(UNIT)
            .and_then(|w| w.checked_add(frac_raw))
            .map(Self)
            .ok_or(ParseAmountError::Overflow)
    }
}
