//! Staking-specific errors.

use stakedao_asset::AssetError;
use stakedao_types::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    #[error("stake amount must be non-zero")]
    InvalidAmount,

    #[error("custody account {0} cannot hold a staking position")]
    CustodyAccount(AccountId),

    #[error("base asset transfer failed: {0}")]
    TransferFailed(#[source] AssetError),

    #[error("account {0} has no active staking position")]
    NoActivePosition(AccountId),

    #[error("reward mint failed: {0}")]
    MintFailed(#[source] AssetError),

    #[error("accrual period must be non-zero")]
    InvalidAccrualPeriod,

    #[error("arithmetic overflow in reward accrual")]
    Overflow,
}
