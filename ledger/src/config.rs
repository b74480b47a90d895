//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use stakedao_governance::DEFAULT_VOTING_WINDOW_SECS;
use stakedao_staking::DEFAULT_ACCRUAL_PERIOD_SECS;
use stakedao_types::{AccountId, Amount};

use crate::LedgerError;

/// Name, symbol and genesis supply of one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub name: String,
    pub symbol: String,
    /// Whole tokens credited to the deployer at deployment.
    #[serde(default)]
    pub initial_supply_tokens: u64,
}

impl AssetConfig {
    /// Initial supply in raw units, or `None` if it does not fit.
    pub fn initial_supply(&self) -> Option<Amount> {
        Amount::from_tokens(self.initial_supply_tokens as u128)
    }
}

/// Configuration for a stakedao deployment.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Seconds over which a stake earns reward equal to its principal.
    #[serde(default = "default_accrual_period")]
    pub accrual_period_secs: u64,

    /// Seconds a proposal accepts votes after creation.
    #[serde(default = "default_voting_window")]
    pub voting_window_secs: u64,

    /// Custody account of the staking engine (also the reward minter).
    #[serde(default = "default_staking_account")]
    pub staking_account: AccountId,

    #[serde(default = "default_base_asset")]
    pub base_asset: AssetConfig,

    #[serde(default = "default_reward_asset")]
    pub reward_asset: AssetConfig,
}

fn default_accrual_period() -> u64 {
    DEFAULT_ACCRUAL_PERIOD_SECS
}

fn default_voting_window() -> u64 {
    DEFAULT_VOTING_WINDOW_SECS
}

fn default_staking_account() -> AccountId {
    AccountId::new("staking")
}

fn default_base_asset() -> AssetConfig {
    AssetConfig {
        name: "StakeToken".into(),
        symbol: "STK".into(),
        initial_supply_tokens: 1_000_000,
    }
}

fn default_reward_asset() -> AssetConfig {
    AssetConfig {
        name: "GovToken".into(),
        symbol: "GOV".into(),
        initial_supply_tokens: 0,
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Reject configurations that cannot be deployed.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.accrual_period_secs == 0 {
            return Err(LedgerError::Config("accrual_period_secs must be non-zero".into()));
        }
        if self.voting_window_secs == 0 {
            return Err(LedgerError::Config("voting_window_secs must be non-zero".into()));
        }
        for asset in [&self.base_asset, &self.reward_asset] {
            if asset.symbol.trim().is_empty() {
                return Err(LedgerError::Config(format!(
                    "asset {:?} needs a symbol",
                    asset.name
                )));
            }
        }
        if self.reward_asset.initial_supply_tokens != 0 {
            return Err(LedgerError::Config(
                "reward asset supply is minted by staking only".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            accrual_period_secs: default_accrual_period(),
            voting_window_secs: default_voting_window(),
            staking_account: default_staking_account(),
            base_asset: default_base_asset(),
            reward_asset: default_reward_asset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LedgerConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = LedgerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.accrual_period_secs, 86_400);
        assert_eq!(config.voting_window_secs, 3_600);
        assert_eq!(config.staking_account, AccountId::new("staking"));
        assert_eq!(config.base_asset.symbol, "STK");
        assert_eq!(config.reward_asset.symbol, "GOV");
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            voting_window_secs = 600

            [base_asset]
            name = "Dai"
            symbol = "DAI"
            initial_supply_tokens = 5000
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.voting_window_secs, 600);
        assert_eq!(config.accrual_period_secs, 86_400);
        assert_eq!(config.base_asset.symbol, "DAI");
        assert_eq!(
            config.base_asset.initial_supply(),
            Amount::from_tokens(5_000)
        );
    }

    #[test]
    fn invalid_staking_account_rejected() {
        let err = LedgerConfig::from_toml_str(r#"staking_account = """#).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn validate_rejects_zero_periods_and_reward_supply() {
        let mut config = LedgerConfig::default();
        config.accrual_period_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.voting_window_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.reward_asset.initial_supply_tokens = 1;
        assert!(config.validate().is_err());
    }
}
