//! Asset ledger errors.

use stakedao_types::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("{0} is not authorized to mint")]
    Unauthorized(AccountId),

    #[error("minter has already been configured")]
    MinterAlreadySet,

    #[error("{0} is not the asset owner")]
    NotOwner(AccountId),

    #[error("arithmetic overflow in asset supply")]
    Overflow,
}
