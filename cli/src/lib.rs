//! The `x1` command line.
//!
//! Argument parsing and command execution live here so they can be driven
//! from tests with a deterministic clock; `main.rs` only wires up logging and
//! the system clock.

pub mod state;

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};
use serde_json::json;

use x1_engine::{EngineConfig, TokenEngine};
use x1_types::{Address, Amount, Clock};
use x1_utils::{format_elapsed, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "x1", version, about = "X1 token engine command line")]
pub struct Cli {
    /// Path to a TOML configuration file. Only `init` uses the token
    /// parameters; logging settings apply to every command.
    #[arg(long, env = "X1_CONFIG")]
    pub config: Option<PathBuf>,

    /// State file holding the engine snapshot.
    #[arg(long, default_value = "./x1_state.bin", env = "X1_STATE")]
    pub state: PathBuf,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to the config file value.
    #[arg(long, env = "X1_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json". Defaults to the config file value.
    #[arg(long, env = "X1_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a state file holding the genesis supply.
    Init {
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Free balance of an account.
    Balance { address: String },
    /// Token metadata and supply totals.
    Supply,
    /// Transfer tokens; 5% of the amount is burned by default.
    Transfer {
        from: String,
        to: String,
        amount: Amount,
    },
    /// Lock free balance into a stake position.
    Stake { address: String, amount: Amount },
    /// Release staked principal (settles pending reward first).
    Unstake { address: String, amount: Amount },
    /// Claim staking reward for every whole day since the last claim.
    Claim { address: String },
    /// Burn the penalty share of an account's free balance.
    Penalize { address: String },
    /// Create new tokens.
    Mint { to: String, amount: Amount },
    /// Destroy tokens from an account's own balance.
    Burn { address: String, amount: Amount },
    /// Stake principal, last claim time and pending reward.
    StakeInfo { address: String },
}

impl Command {
    /// Whether the command changes state and must be saved.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::Balance { .. } | Self::Supply | Self::StakeInfo { .. }
        )
    }
}

/// Load the config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_toml_file(path)?,
        None => EngineConfig::default(),
    };
    Ok(config)
}

/// Resolve logging settings: command line first, then config file.
pub fn log_settings(cli: &Cli, config: &EngineConfig) -> anyhow::Result<(LogFormat, String)> {
    let format = match cli.log_format {
        Some(format) => format,
        None => config.log_format.parse()?,
    };
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    Ok((format, level))
}

fn render(json: bool, value: serde_json::Value, human: String) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(human)
    }
}

fn address(raw: &str) -> anyhow::Result<Address> {
    let address = Address::new(raw);
    if !address.is_valid() {
        bail!("address must not be empty");
    }
    Ok(address)
}

/// Execute one command against the state file and return its output.
pub fn execute<C: Clock>(
    command: &Command,
    state_path: &Path,
    config: &EngineConfig,
    clock: C,
    json: bool,
) -> anyhow::Result<String> {
    if let Command::Init { force } = command {
        if state_path.exists() && !force {
            bail!(
                "state file {} already exists (use --force to overwrite)",
                state_path.display()
            );
        }
        let engine = TokenEngine::from_config(config, clock)?;
        state::save(&engine, state_path)?;
        let meta = engine.metadata();
        return render(
            json,
            json!({
                "name": meta.name,
                "symbol": meta.symbol,
                "owner": config.owner,
                "total_supply": engine.total_supply().to_string(),
            }),
            format!(
                "initialised {} ({}) with {} {} held by {}",
                meta.name,
                meta.symbol,
                engine.total_supply(),
                meta.symbol,
                config.owner
            ),
        );
    }

    let mut engine = state::load(state_path, clock)?;
    let symbol = engine.metadata().symbol;

    let output = match command {
        Command::Init { .. } => bail!("init cannot run against a loaded state"),
        Command::Balance { address: raw } => {
            let account = address(raw)?;
            let balance = engine.balance_of(&account);
            render(
                json,
                json!({ "address": raw, "balance": balance.to_string() }),
                format!("{balance} {symbol}"),
            )?
        }
        Command::Supply => {
            let meta = engine.metadata();
            render(
                json,
                json!({
                    "name": meta.name,
                    "symbol": meta.symbol,
                    "decimals": meta.decimals,
                    "total_supply": engine.total_supply().to_string(),
                    "circulating": engine.circulating().to_string(),
                    "total_staked": engine.total_staked().to_string(),
                    "total_burned": engine.total_burned().to_string(),
                    "total_minted": engine.total_minted().to_string(),
                }),
                format!(
                    "{} ({}), {} decimals\n\
                     total supply: {}\n\
                     circulating:  {}\n\
                     staked:       {}\n\
                     burned:       {}\n\
                     minted:       {}",
                    meta.name,
                    meta.symbol,
                    meta.decimals,
                    engine.total_supply(),
                    engine.circulating(),
                    engine.total_staked(),
                    engine.total_burned(),
                    engine.total_minted(),
                ),
            )?
        }
        Command::Transfer { from, to, amount } => {
            let receipt = engine.transfer(&address(from)?, &address(to)?, *amount)?;
            render(
                json,
                json!({
                    "delivered": receipt.delivered.to_string(),
                    "burned": receipt.burned.to_string(),
                }),
                format!(
                    "delivered {} {symbol} to {to}, burned {} {symbol}",
                    receipt.delivered, receipt.burned
                ),
            )?
        }
        Command::Stake { address: raw, amount } => {
            let principal = engine.stake(&address(raw)?, *amount)?;
            render(
                json,
                json!({ "principal": principal.to_string() }),
                format!("staked {amount} {symbol}, principal now {principal} {symbol}"),
            )?
        }
        Command::Unstake { address: raw, amount } => {
            let remaining = engine.unstake(&address(raw)?, *amount)?;
            render(
                json,
                json!({ "principal": remaining.to_string() }),
                format!("unstaked {amount} {symbol}, principal now {remaining} {symbol}"),
            )?
        }
        Command::Claim { address: raw } => {
            let reward = engine.claim_rewards(&address(raw)?)?;
            render(
                json,
                json!({ "reward": reward.to_string() }),
                format!("claimed {reward} {symbol}"),
            )?
        }
        Command::Penalize { address: raw } => {
            let burned = engine.penalize(&address(raw)?)?;
            render(
                json,
                json!({ "burned": burned.to_string() }),
                format!("penalty burned {burned} {symbol} from {raw}"),
            )?
        }
        Command::Mint { to, amount } => {
            engine.mint(&address(to)?, *amount)?;
            render(
                json,
                json!({ "minted": amount.to_string() }),
                format!("minted {amount} {symbol} to {to}"),
            )?
        }
        Command::Burn { address: raw, amount } => {
            engine.burn(&address(raw)?, *amount)?;
            render(
                json,
                json!({ "burned": amount.to_string() }),
                format!("burned {amount} {symbol} from {raw}"),
            )?
        }
        Command::StakeInfo { address: raw } => {
            let account = address(raw)?;
            let info = engine.stake_info(&account);
            // One reading, so the reward and the age describe the same instant.
            let now = engine.clock().now()?;
            let pending = engine.pending_rewards_at(&account, now)?;
            let staked_for = engine
                .position(&account)
                .map(|position| position.staked_at.elapsed_since(now));
            render(
                json,
                json!({
                    "principal": info.principal.to_string(),
                    "last_claim_at": info.last_claim_at.as_secs(),
                    "pending_rewards": pending.to_string(),
                    "staked_for_secs": staked_for,
                }),
                match staked_for {
                    Some(secs) => format!(
                        "principal {} {symbol}, staked for {}, last claim at {}, pending reward {} {symbol}",
                        info.principal,
                        format_elapsed(secs),
                        info.last_claim_at,
                        pending
                    ),
                    None => format!("{raw} has no active stake"),
                },
            )?
        }
    };

    if command.is_mutating() {
        state::save(&engine, state_path)?;
    }
    Ok(output)
}
