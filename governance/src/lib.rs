//! Token-weighted governance for stakedao.
//!
//! Lifecycle: a proposal is created with a fixed deadline, accepts votes while
//! `now < deadline`, and from the deadline onward resolves to `Passed`
//! (`yes > no`) or `Failed` (`yes <= no`). No finalize step exists; status is
//! computed on every read and is stable once the tallies freeze.
//!
//! Key principle: one account = one vote per proposal, weighted by the
//! account's reward-asset balance at the moment it votes.

pub mod engine;
pub mod error;
pub mod proposal;

pub use engine::{GovernanceEngine, DEFAULT_VOTING_WINDOW_SECS};
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalStatus, Vote};
