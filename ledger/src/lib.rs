//! The composed stakedao ledger.
//!
//! Wires the base asset, the reward asset, the staking engine and the
//! governance engine together, the same way for every deployment:
//!
//! 1. Base asset, initial supply credited to the deployer
//! 2. Reward asset, no supply
//! 3. Staking engine with its own custody account
//! 4. Staking engine set as the reward asset's only minter
//! 5. Governance engine reading reward balances as voting weight
//!
//! Every operation reads the current time once from the injected [`Clock`].
//!
//! [`Clock`]: stakedao_types::Clock

pub mod config;
pub mod error;
pub mod ledger;

pub use config::{AssetConfig, LedgerConfig};
pub use error::LedgerError;
pub use ledger::{Ledger, LedgerSummary};
