use stakedao_types::{AccountId, ProposalId, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting on proposal {id} closed at {deadline}")]
    VotingClosed { id: ProposalId, deadline: Timestamp },

    #[error("account {0} has already voted on this proposal")]
    AlreadyVoted(AccountId),

    #[error("proposal description must not be empty")]
    EmptyDescription,

    #[error("voting window must be non-zero")]
    InvalidVotingWindow,

    #[error("arithmetic overflow in vote tally")]
    Overflow,
}
