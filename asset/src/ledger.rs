//! In-memory asset ledger.

use std::collections::HashMap;

use stakedao_types::{AccountId, Amount};

use crate::asset::FungibleAsset;
use crate::error::AssetError;

/// An in-memory fungible asset with ERC-20 style allowances.
///
/// Invariant: `total_supply` equals the sum of all balances.
#[derive(Clone, Debug)]
pub struct AssetLedger {
    name: String,
    symbol: String,
    owner: AccountId,
    minter: Option<AccountId>,
    total_supply: Amount,
    balances: HashMap<AccountId, Amount>,
    /// (owner, spender) → remaining approved amount.
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl AssetLedger {
    /// Create an empty asset administered by `owner`. No minter is configured.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, owner: AccountId) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            owner,
            minter: None,
            total_supply: Amount::ZERO,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Create an asset whose entire initial supply is credited to `owner`.
    pub fn with_supply(
        name: impl Into<String>,
        symbol: impl Into<String>,
        owner: AccountId,
        initial_supply: Amount,
    ) -> Self {
        let mut ledger = Self::new(name, symbol, owner.clone());
        if !initial_supply.is_zero() {
            ledger.balances.insert(owner, initial_supply);
            ledger.total_supply = initial_supply;
        }
        ledger
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// The account authorized to mint, if one has been configured.
    pub fn minter(&self) -> Option<&AccountId> {
        self.minter.as_ref()
    }

    /// Authorize `minter` as the sole minter of this asset.
    ///
    /// Setup-time only: callable by the owner, exactly once.
    pub fn set_minter(&mut self, caller: &AccountId, minter: AccountId) -> Result<(), AssetError> {
        if caller != &self.owner {
            return Err(AssetError::NotOwner(caller.clone()));
        }
        if self.minter.is_some() {
            return Err(AssetError::MinterAlreadySet);
        }
        tracing::info!(asset = %self.symbol, minter = %minter, "minter configured");
        self.minter = Some(minter);
        Ok(())
    }

    /// Number of accounts holding a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    fn check_debit(&self, from: &AccountId, amount: Amount) -> Result<Amount, AssetError> {
        let available = self.balance_of(from);
        available
            .checked_sub(amount)
            .ok_or(AssetError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })
    }

    /// Apply a validated move. Callers must have checked the debit.
    fn apply_move(&mut self, from: &AccountId, to: &AccountId, amount: Amount) {
        if amount.is_zero() || from == to {
            return;
        }
        let from_balance = self.balance_of(from);
        self.balances
            .insert(from.clone(), from_balance.saturating_sub(amount));
        let to_balance = self.balance_of(to);
        // Cannot overflow: the sum of balances is bounded by total_supply.
        self.balances.insert(to.clone(), to_balance + amount);
    }
}

impl FungibleAsset for AssetLedger {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn check_transfer(&self, from: &AccountId, amount: Amount) -> Result<(), AssetError> {
        self.check_debit(from, amount).map(|_| ())
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AssetError> {
        self.check_debit(from, amount)?;
        self.apply_move(from, to, amount);
        tracing::debug!(asset = %self.symbol, %from, %to, %amount, "transfer");
        Ok(())
    }

    fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        let key = (owner.clone(), spender.clone());
        if amount.is_zero() {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
        tracing::debug!(asset = %self.symbol, %owner, %spender, %amount, "approve");
    }

    fn check_transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        amount: Amount,
    ) -> Result<(), AssetError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(AssetError::InsufficientAllowance {
                needed: amount.raw(),
                available: approved.raw(),
            });
        }
        self.check_debit(from, amount)?;
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AssetError> {
        self.check_transfer_from(spender, from, amount)?;
        let remaining = self.allowance(from, spender).saturating_sub(amount);
        self.approve(from, spender, remaining);
        self.apply_move(from, to, amount);
        tracing::debug!(asset = %self.symbol, %spender, %from, %to, %amount, "transfer_from");
        Ok(())
    }

    fn check_mint(&self, caller: &AccountId, amount: Amount) -> Result<(), AssetError> {
        if self.minter.as_ref() != Some(caller) {
            return Err(AssetError::Unauthorized(caller.clone()));
        }
        self.total_supply
            .checked_add(amount)
            .ok_or(AssetError::Overflow)?;
        Ok(())
    }

    fn mint(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AssetError> {
        self.check_mint(caller, amount)?;
        if amount.is_zero() {
            return Ok(());
        }
        self.total_supply = self.total_supply + amount;
        let balance = self.balance_of(to);
        self.balances.insert(to.clone(), balance + amount);
        tracing::debug!(asset = %self.symbol, %to, %amount, "mint");
        Ok(())
    }
}
