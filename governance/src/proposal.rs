//! Governance proposals and their status.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use stakedao_types::{AccountId, Amount, ProposalId, Timestamp};

/// Resolved status of a proposal, computed from time and tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// The voting window is open.
    Active,
    /// The window closed with strictly more yes weight than no weight.
    Passed,
    /// The window closed without a strict yes majority (ties fail).
    Failed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal: ProposalId,
    pub voter: AccountId,
    pub support: bool,
    /// Reward-asset balance of the voter when the vote was cast.
    pub weight: Amount,
    pub at: Timestamp,
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Who created it. Informational only; creation is permissionless.
    pub proposer: AccountId,
    pub description: String,
    pub yes_weight: Amount,
    pub no_weight: Amount,
    pub created_at: Timestamp,
    /// First instant at which votes are refused.
    pub deadline: Timestamp,
    /// Accounts that have voted.
    voters: HashSet<AccountId>,
}

impl Proposal {
    pub(crate) fn new(
        id: ProposalId,
        proposer: AccountId,
        description: String,
        created_at: Timestamp,
        voting_window_secs: u64,
    ) -> Self {
        Self {
            id,
            proposer,
            description,
            yes_weight: Amount::ZERO,
            no_weight: Amount::ZERO,
            created_at,
            deadline: created_at.saturating_add_secs(voting_window_secs),
            voters: HashSet::new(),
        }
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.deadline
    }

    pub fn has_voted(&self, account: &AccountId) -> bool {
        self.voters.contains(account)
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Total weight cast, or `None` if it does not fit in u128.
    pub fn total_weight(&self) -> Option<Amount> {
        self.yes_weight.checked_add(self.no_weight)
    }

    pub fn status(&self, now: Timestamp) -> ProposalStatus {
        if self.is_open(now) {
            ProposalStatus::Active
        } else if self.yes_weight > self.no_weight {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Failed
        }
    }

    /// Add a validated vote to the tallies. Callers check the window and voter set.
    pub(crate) fn record(&mut self, voter: AccountId, support: bool, weight: Amount) -> Option<()> {
        if support {
            self.yes_weight = self.yes_weight.checked_add(weight)?;
        } else {
            self.no_weight = self.no_weight.checked_add(weight)?;
        }
        self.voters.insert(voter);
        Some(())
    }
}
