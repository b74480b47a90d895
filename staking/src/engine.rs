//! Core staking engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stakedao_asset::FungibleAsset;
use stakedao_types::{AccountId, Amount, Timestamp, SECS_PER_DAY};

use crate::error::StakingError;
use crate::position::StakePosition;

/// Default accrual period: one day for a full 1:1 reward.
pub const DEFAULT_ACCRUAL_PERIOD_SECS: u64 = SECS_PER_DAY;

/// Outcome of an operation that settled accrued reward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub account: AccountId,
    /// Reward asset minted to the account.
    pub reward: Amount,
    /// Principal after a stake, or the principal returned by an unstake.
    pub principal: Amount,
    pub at: Timestamp,
}

/// The staking engine: owns every staking position and the base-asset custody account.
pub struct StakingEngine {
    /// Account that holds staked base asset and mints the reward asset.
    custody: AccountId,
    accrual_period_secs: u64,
    positions: HashMap<AccountId, StakePosition>,
    total_staked: Amount,
}

impl StakingEngine {
    pub fn new(custody: AccountId, accrual_period_secs: u64) -> Result<Self, StakingError> {
        if accrual_period_secs == 0 {
            return Err(StakingError::InvalidAccrualPeriod);
        }
        Ok(Self {
            custody,
            accrual_period_secs,
            positions: HashMap::new(),
            total_staked: Amount::ZERO,
        })
    }

    /// Create an engine with the default one-day accrual period.
    pub fn with_default_period(custody: AccountId) -> Self {
        Self {
            custody,
            accrual_period_secs: DEFAULT_ACCRUAL_PERIOD_SECS,
            positions: HashMap::new(),
            total_staked: Amount::ZERO,
        }
    }

    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    pub fn accrual_period_secs(&self) -> u64 {
        self.accrual_period_secs
    }

    /// Sum of all principals currently locked.
    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    /// Number of accounts with a non-zero principal.
    pub fn active_positions(&self) -> usize {
        self.positions.values().filter(|p| p.is_active()).count()
    }

    /// The position of `account`; the zero position if it never staked.
    pub fn position(&self, account: &AccountId) -> StakePosition {
        self.positions.get(account).copied().unwrap_or_default()
    }

    /// Reward that `claim` would mint for `account` at `now`.
    pub fn pending_reward(&self, account: &AccountId, now: Timestamp) -> Result<Amount, StakingError> {
        self.position(account)
            .accrued_checked(self.accrual_period_secs, now)
            .ok_or(StakingError::Overflow)
    }

    /// Lock `amount` of base asset for `account`.
    ///
    /// Reward accrued under the previous principal is minted first, then the
    /// base asset is pulled via the account's allowance to the custody account
    /// and the accrual clock restarts at `now`.
    pub fn stake<B, R>(
        &mut self,
        base: &mut B,
        reward: &mut R,
        account: &AccountId,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Settlement, StakingError>
    where
        B: FungibleAsset + ?Sized,
        R: FungibleAsset + ?Sized,
    {
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }
        if account == &self.custody {
            return Err(StakingError::CustodyAccount(account.clone()));
        }
        let position = self.position(account);
        let owed = self.pending_reward(account, now)?;
        let principal = position
            .principal
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        base.check_transfer_from(&self.custody, account, amount)
            .map_err(StakingError::TransferFailed)?;
        self.check_reward(reward, owed)?;

        self.mint_reward(reward, account, owed)?;
        base.transfer_from(&self.custody, account, &self.custody, amount)
            .map_err(StakingError::TransferFailed)?;
        self.positions.insert(
            account.clone(),
            StakePosition {
                principal,
                accruing_since: Some(now),
            },
        );
        self.total_staked = total_staked;

        tracing::info!(%account, %amount, %principal, reward = %owed, "staked");
        Ok(Settlement {
            account: account.clone(),
            reward: owed,
            principal,
            at: now,
        })
    }

    /// Mint the reward accrued by `account` up to `now`, keeping the principal locked.
    ///
    /// Calling this twice at the same instant mints nothing the second time.
    pub fn claim<R>(
        &mut self,
        reward: &mut R,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<Amount, StakingError>
    where
        R: FungibleAsset + ?Sized,
    {
        let position = self.active_position(account)?;
        let owed = self.pending_reward(account, now)?;
        self.check_reward(reward, owed)?;

        self.mint_reward(reward, account, owed)?;
        self.positions.insert(
            account.clone(),
            StakePosition {
                principal: position.principal,
                accruing_since: Some(now),
            },
        );

        tracing::info!(%account, reward = %owed, principal = %position.principal, "claimed");
        Ok(owed)
    }

    /// Settle accrued reward and return the full principal to `account`.
    pub fn unstake<B, R>(
        &mut self,
        base: &mut B,
        reward: &mut R,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<Settlement, StakingError>
    where
        B: FungibleAsset + ?Sized,
        R: FungibleAsset + ?Sized,
    {
        let position = self.active_position(account)?;
        let owed = self.pending_reward(account, now)?;
        let total_staked = self
            .total_staked
            .checked_sub(position.principal)
            .ok_or(StakingError::Overflow)?;
        base.check_transfer(&self.custody, position.principal)
            .map_err(StakingError::TransferFailed)?;
        self.check_reward(reward, owed)?;

        self.mint_reward(reward, account, owed)?;
        base.transfer(&self.custody, account, position.principal)
            .map_err(StakingError::TransferFailed)?;
        self.positions.insert(account.clone(), StakePosition::default());
        self.total_staked = total_staked;

        tracing::info!(%account, returned = %position.principal, reward = %owed, "unstaked");
        Ok(Settlement {
            account: account.clone(),
            reward: owed,
            principal: position.principal,
            at: now,
        })
    }

    fn active_position(&self, account: &AccountId) -> Result<StakePosition, StakingError> {
        let position = self.position(account);
        if !position.is_active() {
            return Err(StakingError::NoActivePosition(account.clone()));
        }
        Ok(position)
    }

    /// Zero rewards never touch the reward asset, so they need no mint authority.
    fn check_reward<R>(&self, reward: &R, owed: Amount) -> Result<(), StakingError>
    where
        R: FungibleAsset + ?Sized,
    {
        if owed.is_zero() {
            return Ok(());
        }
        reward
            .check_mint(&self.custody, owed)
            .map_err(StakingError::MintFailed)
    }

    fn mint_reward<R>(&self, reward: &mut R, account: &AccountId, owed: Amount) -> Result<(), StakingError>
    where
        R: FungibleAsset + ?Sized,
    {
        if owed.is_zero() {
            tracing::debug!(%account, "nothing accrued");
            return Ok(());
        }
        reward
            .mint(&self.custody, account, owed)
            .map_err(StakingError::MintFailed)
    }
}
