//! Core governance engine: proposal registry, voting and resolution.

use stakedao_asset::FungibleAsset;
use stakedao_types::{AccountId, ProposalId, Timestamp, SECS_PER_HOUR};

use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalStatus, Vote};

/// Default voting window: one hour from creation.
pub const DEFAULT_VOTING_WINDOW_SECS: u64 = SECS_PER_HOUR;

/// Owns the append-only proposal registry.
///
/// Proposal ids are the registry index, starting at 0.
pub struct GovernanceEngine {
    voting_window_secs: u64,
    proposals: Vec<Proposal>,
}

impl GovernanceEngine {
    pub fn new(voting_window_secs: u64) -> Result<Self, GovernanceError> {
        if voting_window_secs == 0 {
            return Err(GovernanceError::InvalidVotingWindow);
        }
        Ok(Self {
            voting_window_secs,
            proposals: Vec::new(),
        })
    }

    pub fn voting_window_secs(&self) -> u64 {
        self.voting_window_secs
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.proposals.get(idx))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    /// Register a new proposal open for voting until `now + voting_window`.
    ///
    /// Creation is permissionless. Descriptions that are empty or only
    /// whitespace are rejected.
    pub fn create_proposal(
        &mut self,
        proposer: &AccountId,
        description: impl Into<String>,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(GovernanceError::EmptyDescription);
        }
        let id = self.proposals.len() as ProposalId;
        let proposal = Proposal::new(
            id,
            proposer.clone(),
            description,
            now,
            self.voting_window_secs,
        );
        tracing::info!(id, %proposer, deadline = %proposal.deadline, "proposal created");
        self.proposals.push(proposal);
        Ok(id)
    }

    /// Cast `voter`'s vote, weighted by their reward-asset balance right now.
    ///
    /// The weight is read live, not snapshotted at creation: balance acquired
    /// after the proposal was created counts in full.
    pub fn vote<R>(
        &mut self,
        reward: &R,
        voter: &AccountId,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<Vote, GovernanceError>
    where
        R: FungibleAsset + ?Sized,
    {
        let proposal = self.proposal_mut(id)?;
        if !proposal.is_open(now) {
            return Err(GovernanceError::VotingClosed {
                id,
                deadline: proposal.deadline,
            });
        }
        if proposal.has_voted(voter) {
            return Err(GovernanceError::AlreadyVoted(voter.clone()));
        }
        let weight = reward.balance_of(voter);
        proposal
            .record(voter.clone(), support, weight)
            .ok_or(GovernanceError::Overflow)?;

        tracing::info!(id, %voter, support, %weight, "vote cast");
        Ok(Vote {
            proposal: id,
            voter: voter.clone(),
            support,
            weight,
            at: now,
        })
    }

    /// Status of proposal `id` as of `now`.
    pub fn status(&self, id: ProposalId, now: Timestamp) -> Result<ProposalStatus, GovernanceError> {
        Ok(self.proposal(id)?.status(now))
    }

    pub fn has_voted(&self, id: ProposalId, account: &AccountId) -> Result<bool, GovernanceError> {
        Ok(self.proposal(id)?.has_voted(account))
    }

    fn proposal_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.proposals.get_mut(idx))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }
}

impl Default for GovernanceEngine {
    fn default() -> Self {
        Self {
            voting_window_secs: DEFAULT_VOTING_WINDOW_SECS,
            proposals: Vec::new(),
        }
    }
}
