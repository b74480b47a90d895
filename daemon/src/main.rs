//! stakedao: deploy a ledger or replay a scenario against one.

mod scenario;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use stakedao_ledger::{Ledger, LedgerConfig};
use stakedao_types::AccountId;
use stakedao_utils::{format_duration, LogFormat};

use crate::scenario::{Replay, Scenario};

#[derive(Parser)]
#[command(name = "stakedao", about = "Staking and token-weighted governance ledger")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "STAKEDAO_CONFIG")]
    config: Option<PathBuf>,

    /// Seconds for a stake to earn reward equal to its principal.
    #[arg(long, global = true, env = "STAKEDAO_ACCRUAL_PERIOD_SECS")]
    accrual_period_secs: Option<u64>,

    /// Seconds a proposal accepts votes.
    #[arg(long, global = true, env = "STAKEDAO_VOTING_WINDOW_SECS")]
    voting_window_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, default_value = "info", env = "STAKEDAO_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, global = true, default_value = "human", env = "STAKEDAO_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy a ledger on the wall clock and print its wiring.
    Deploy {
        /// Account that deploys and receives the base asset supply.
        #[arg(long, default_value = "deployer")]
        deployer: String,
    },
    /// Replay a TOML scenario on a deterministic clock and print the final state as JSON.
    Replay {
        /// Scenario file.
        scenario: PathBuf,
        /// Abort on the first failing step.
        #[arg(long)]
        strict: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LedgerConfig> {
    match path {
        Some(path) => {
            let config = LedgerConfig::from_toml_file(path)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(LedgerConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stakedao_utils::init_logging(cli.log_format, &cli.log_level);

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(secs) = cli.accrual_period_secs {
        config.accrual_period_secs = secs;
    }
    if let Some(secs) = cli.voting_window_secs {
        config.voting_window_secs = secs;
    }
    config.validate()?;

    match cli.command {
        Command::Deploy { deployer } => {
            let deployer = AccountId::parse(deployer)?;
            let ledger = Ledger::deploy_live(&config, deployer)?;
            tracing::info!(
                accrual_period = %format_duration(config.accrual_period_secs),
                voting_window = %format_duration(config.voting_window_secs),
                "ledger deployed"
            );
            println!("deployer:      {}", ledger.deployer());
            println!(
                "base asset:    {} ({})",
                config.base_asset.name, config.base_asset.symbol
            );
            println!(
                "reward asset:  {} ({})",
                config.reward_asset.name, config.reward_asset.symbol
            );
            println!("staking:       {}", ledger.staking().custody());
            match ledger.reward().minter() {
                Some(minter) => println!("reward minter: {minter}"),
                None => println!("reward minter: (unset)"),
            }
            println!("{}", serde_json::to_string_pretty(&ledger.summary())?);
        }
        Command::Replay { scenario, strict } => {
            let text = std::fs::read_to_string(&scenario)
                .with_context(|| format!("reading scenario {}", scenario.display()))?;
            let parsed = Scenario::from_toml_str(&text)?;
            let mut replay = Replay::new(&config, &parsed)?;
            replay.run(&parsed.steps, strict)?;
            println!("{}", serde_json::to_string_pretty(&replay.report())?);
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}
