//! The ledger: one serialized state machine over both assets and both engines.

use serde::{Deserialize, Serialize};

use stakedao_asset::{AssetError, AssetLedger, FungibleAsset};
use stakedao_governance::{GovernanceEngine, Proposal, ProposalStatus, Vote};
use stakedao_staking::{Settlement, StakePosition, StakingEngine};
use stakedao_types::{AccountId, Amount, Clock, ProposalId, SystemClock, Timestamp};

use crate::config::LedgerConfig;
use crate::error::LedgerError;

/// Summary statistics for the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub now: Timestamp,
    pub base_supply: Amount,
    pub reward_supply: Amount,
    pub total_staked: Amount,
    pub active_positions: u64,
    pub proposals: u64,
}

/// A deployed stakedao ledger.
///
/// Every mutating operation takes `&mut self`, reads `now` once from the
/// clock, and either applies completely or returns an error with no effect.
pub struct Ledger<C: Clock = SystemClock> {
    deployer: AccountId,
    base: AssetLedger,
    reward: AssetLedger,
    staking: StakingEngine,
    governance: GovernanceEngine,
    clock: C,
}

impl<C: Clock> Ledger<C> {
    /// Deploy a fresh ledger owned by `deployer`.
    pub fn deploy(config: &LedgerConfig, deployer: AccountId, clock: C) -> Result<Self, LedgerError> {
        config.validate()?;
        if config.staking_account == deployer {
            return Err(LedgerError::Config(
                "staking account must differ from the deployer".into(),
            ));
        }
        let supply = config
            .base_asset
            .initial_supply()
            .ok_or_else(|| LedgerError::Config("base asset initial supply overflows".into()))?;

        let base = AssetLedger::with_supply(
            config.base_asset.name.clone(),
            config.base_asset.symbol.clone(),
            deployer.clone(),
            supply,
        );
        tracing::info!(symbol = %config.base_asset.symbol, %supply, "base asset deployed");

        let mut reward = AssetLedger::new(
            config.reward_asset.name.clone(),
            config.reward_asset.symbol.clone(),
            deployer.clone(),
        );
        tracing::info!(symbol = %config.reward_asset.symbol, "reward asset deployed");

        let staking = StakingEngine::new(config.staking_account.clone(), config.accrual_period_secs)?;
        tracing::info!(
            custody = %staking.custody(),
            accrual_period_secs = config.accrual_period_secs,
            "staking engine deployed"
        );

        reward.set_minter(&deployer, staking.custody().clone())?;

        let governance = GovernanceEngine::new(config.voting_window_secs)?;
        tracing::info!(
            voting_window_secs = config.voting_window_secs,
            "governance engine deployed"
        );

        Ok(Self {
            deployer,
            base,
            reward,
            staking,
            governance,
            clock,
        })
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn deployer(&self) -> &AccountId {
        &self.deployer
    }

    pub fn base(&self) -> &AssetLedger {
        &self.base
    }

    pub fn reward(&self) -> &AssetLedger {
        &self.reward
    }

    pub fn staking(&self) -> &StakingEngine {
        &self.staking
    }

    pub fn governance(&self) -> &GovernanceEngine {
        &self.governance
    }

    // ── Assets ───────────────────────────────────────────────────────────

    pub fn base_balance(&self, account: &AccountId) -> Amount {
        self.base.balance_of(account)
    }

    pub fn reward_balance(&self, account: &AccountId) -> Amount {
        self.reward.balance_of(account)
    }

    pub fn transfer_base(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.reject_custody(from)?;
        self.reject_custody(to)?;
        Ok(self.base.transfer(from, to, amount)?)
    }

    /// Transfer reward asset. Voting weight moves with it.
    pub fn transfer_reward(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.reject_custody(from)?;
        self.reject_custody(to)?;
        Ok(self.reward.transfer(from, to, amount)?)
    }

    /// Approve the staking engine to pull `amount` of `owner`'s base asset.
    pub fn approve_stake(&mut self, owner: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.reject_custody(owner)?;
        let custody = self.staking.custody().clone();
        self.base.approve(owner, &custody, amount);
        Ok(())
    }

    /// Mint reward asset as `caller`.
    ///
    /// Reward supply only grows through staking settlement, so every caller
    /// is refused here, the custody account included.
    pub fn mint_reward(&mut self, caller: &AccountId, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.reject_custody(caller)?;
        Ok(self.reward.mint(caller, to, amount)?)
    }

    /// The custody account belongs to the staking engine; no external
    /// operation may act as it or credit it directly.
    fn reject_custody(&self, account: &AccountId) -> Result<(), LedgerError> {
        if account == self.staking.custody() {
            tracing::warn!(%account, "operation on behalf of the custody account refused");
            return Err(AssetError::Unauthorized(account.clone()).into());
        }
        Ok(())
    }

    // ── Staking ──────────────────────────────────────────────────────────

    pub fn stake(&mut self, account: &AccountId, amount: Amount) -> Result<Settlement, LedgerError> {
        self.reject_custody(account)?;
        let now = self.clock.now();
        Ok(self
            .staking
            .stake(&mut self.base, &mut self.reward, account, amount, now)?)
    }

    /// Settle accrued reward without touching the principal (`claimGovToken`).
    pub fn claim(&mut self, account: &AccountId) -> Result<Amount, LedgerError> {
        let now = self.clock.now();
        Ok(self.staking.claim(&mut self.reward, account, now)?)
    }

    pub fn unstake(&mut self, account: &AccountId) -> Result<Settlement, LedgerError> {
        let now = self.clock.now();
        Ok(self
            .staking
            .unstake(&mut self.base, &mut self.reward, account, now)?)
    }

    pub fn position(&self, account: &AccountId) -> StakePosition {
        self.staking.position(account)
    }

    pub fn pending_reward(&self, account: &AccountId) -> Result<Amount, LedgerError> {
        Ok(self.staking.pending_reward(account, self.clock.now())?)
    }

    // ── Governance ───────────────────────────────────────────────────────

    pub fn create_proposal(&mut self, proposer: &AccountId, description: &str) -> Result<ProposalId, LedgerError> {
        let now = self.clock.now();
        Ok(self.governance.create_proposal(proposer, description, now)?)
    }

    pub fn vote(&mut self, voter: &AccountId, id: ProposalId, support: bool) -> Result<Vote, LedgerError> {
        let now = self.clock.now();
        Ok(self.governance.vote(&self.reward, voter, id, support, now)?)
    }

    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, LedgerError> {
        Ok(self.governance.proposal(id)?)
    }

    /// `getProposalStatus`: computed from the clock on every call.
    pub fn proposal_status(&self, id: ProposalId) -> Result<ProposalStatus, LedgerError> {
        Ok(self.governance.status(id, self.clock.now())?)
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            now: self.clock.now(),
            base_supply: self.base.total_supply(),
            reward_supply: self.reward.total_supply(),
            total_staked: self.staking.total_staked(),
            active_positions: self.staking.active_positions() as u64,
            proposals: self.governance.proposal_count() as u64,
        }
    }
}

impl Ledger<SystemClock> {
    /// Deploy against the wall clock.
    pub fn deploy_live(config: &LedgerConfig, deployer: AccountId) -> Result<Self, LedgerError> {
        Self::deploy(config, deployer, SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakedao_nullables::NullClock;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn deploy() -> Ledger<NullClock> {
        Ledger::deploy(&LedgerConfig::default(), acct("deployer"), NullClock::new(1_700_000_000)).unwrap()
    }

    #[test]
    fn deploy_wires_minter_and_supply() {
        let ledger = deploy();
        assert_eq!(ledger.reward().minter(), Some(&acct("staking")));
        assert_eq!(
            ledger.base_balance(&acct("deployer")),
            Amount::from_tokens(1_000_000).unwrap()
        );
        assert_eq!(ledger.reward().total_supply(), Amount::ZERO);
        assert_eq!(ledger.staking().accrual_period_secs(), 86_400);
        assert_eq!(ledger.governance().voting_window_secs(), 3_600);
    }

    #[test]
    fn deploy_rejects_staking_as_deployer() {
        let result = Ledger::deploy(&LedgerConfig::default(), acct("staking"), NullClock::new(0));
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn deployer_cannot_mint_reward() {
        let mut ledger = deploy();
        let err = ledger
            .mint_reward(&acct("deployer"), &acct("deployer"), Amount::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Asset(AssetError::Unauthorized(_))
        ));
    }

    #[test]
    fn operations_read_the_injected_clock() {
        let mut ledger = deploy();
        ledger
            .transfer_base(&acct("deployer"), &acct("user"), Amount::new(500))
            .unwrap();
        ledger.approve_stake(&acct("user"), Amount::new(500)).unwrap();
        let s = ledger.stake(&acct("user"), Amount::new(500)).unwrap();
        assert_eq!(s.at, Timestamp::new(1_700_000_000));

        ledger.clock().advance(43_200);
        assert_eq!(ledger.pending_reward(&acct("user")).unwrap(), Amount::new(250));

        let summary = ledger.summary();
        assert_eq!(summary.now, Timestamp::new(1_700_043_200));
        assert_eq!(summary.total_staked, Amount::new(500));
        assert_eq!(summary.active_positions, 1);
        assert_eq!(summary.proposals, 0);
    }
}
