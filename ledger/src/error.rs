use stakedao_asset::AssetError;
use stakedao_governance::GovernanceError;
use stakedao_staking::StakingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("staking error: {0}")]
    Staking(#[from] StakingError),

    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("configuration error: {0}")]
    Config(String),
}
