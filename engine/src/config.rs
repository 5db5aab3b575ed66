//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use x1_ledger::GenesisConfig;
use x1_types::{Address, Amount, TokenParams, DECIMALS, SECS_PER_DAY};

use crate::EngineError;

/// Configuration for an X1 engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file yields the X1TestCoin setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Token name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Token symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Fractional digits (must be 18).
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Account receiving the initial supply.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Initial supply in whole tokens, as a decimal string (e.g. `"1000000"`).
    #[serde(default = "default_initial_supply")]
    pub initial_supply: String,

    /// Transfer burn in basis points.
    #[serde(default = "default_burn_bps")]
    pub burn_bps: u32,

    /// Penalty burn in basis points.
    #[serde(default = "default_penalty_bps")]
    pub penalty_bps: u32,

    /// Staking reward per period in basis points.
    #[serde(default = "default_reward_bps")]
    pub reward_bps: u32,

    /// Reward period length in seconds.
    #[serde(default = "default_reward_period_secs")]
    pub reward_period_secs: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_name() -> String {
    TokenParams::default().name
}

fn default_symbol() -> String {
    TokenParams::default().symbol
}

fn default_decimals() -> u8 {
    DECIMALS
}

fn default_owner() -> String {
    "0x00000000000000000000000000000000000000a1".to_string()
}

fn default_initial_supply() -> String {
    GenesisConfig::DEFAULT_SUPPLY_TOKENS.to_string()
}

fn default_burn_bps() -> u32 {
    500
}

fn default_penalty_bps() -> u32 {
    2000
}

fn default_reward_bps() -> u32 {
    100
}

fn default_reward_period_secs() -> u64 {
    SECS_PER_DAY
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Token parameters described by this config.
    pub fn params(&self) -> TokenParams {
        TokenParams {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            transfer_burn_bps: self.burn_bps,
            penalty_bps: self.penalty_bps,
            reward_bps: self.reward_bps,
            reward_period_secs: self.reward_period_secs,
        }
    }

    /// Genesis distribution described by this config.
    pub fn genesis(&self) -> Result<GenesisConfig, EngineError> {
        let owner = Address::new(self.owner.trim());
        if !owner.is_valid() {
            return Err(EngineError::Config("owner must not be empty".into()));
        }
        let initial_supply: Amount = self
            .initial_supply
            .parse()
            .map_err(|e| EngineError::Config(format!("initial_supply: {e}")))?;
        Ok(GenesisConfig::new(owner, initial_supply))
    }

    /// Check every field without building an engine.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.params().validate()?;
        self.genesis()?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            owner: default_owner(),
            initial_supply: default_initial_supply(),
            burn_bps: default_burn_bps(),
            penalty_bps: default_penalty_bps(),
            reward_bps: default_reward_bps(),
            reward_period_secs: default_reward_period_secs(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = EngineConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = EngineConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.params(), TokenParams::default());
        assert_eq!(config.log_format, "human");
        let genesis = config.genesis().unwrap();
        assert_eq!(genesis.initial_supply, Amount::tokens(1_000_000));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            symbol = "X1C"
            burn_bps = 250
            initial_supply = "42.5"
        "#;
        let config = EngineConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.symbol, "X1C");
        assert_eq!(config.params().transfer_burn_bps, 250);
        assert_eq!(config.penalty_bps, 2000); // default
        assert_eq!(
            config.genesis().unwrap().initial_supply,
            "42.5".parse::<Amount>().unwrap()
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = EngineConfig {
            reward_bps: 20_000,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));

        let config = EngineConfig {
            initial_supply: "lots".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));

        let config = EngineConfig {
            owner: " ".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "owner = \"0xfeed\"").unwrap();
        let config = EngineConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.owner, "0xfeed");
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = EngineConfig::from_toml_file("/nonexistent/x1.toml");
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
