//! The fungible asset interface consumed by the engines.

use crate::error::AssetError;
use stakedao_types::{AccountId, Amount};

/// Balance ledger for one fungible asset.
///
/// The `check_*` methods validate an operation without applying it. Engines
/// call them before mutating anything so that a multi-step operation either
/// applies completely or not at all.
pub trait FungibleAsset {
    fn name(&self) -> &str;

    fn symbol(&self) -> &str;

    fn total_supply(&self) -> Amount;

    fn balance_of(&self, account: &AccountId) -> Amount;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Validate a transfer out of `from` without applying it.
    fn check_transfer(&self, from: &AccountId, amount: Amount) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to`.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount)
        -> Result<(), AssetError>;

    /// Set the amount `spender` may pull from `owner`, replacing any previous approval.
    fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount);

    /// Validate a delegated transfer without applying it.
    fn check_transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        amount: Amount,
    ) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AssetError>;

    /// Validate a mint without applying it.
    fn check_mint(&self, caller: &AccountId, amount: Amount) -> Result<(), AssetError>;

    /// Create `amount` new units for `to`. Only the configured minter may call this.
    fn mint(&mut self, caller: &AccountId, to: &AccountId, amount: Amount)
        -> Result<(), AssetError>;
}
