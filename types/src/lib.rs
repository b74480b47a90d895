//! Fundamental types for stakedao.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, amounts, timestamps and the clock abstraction.

pub mod account;
pub mod amount;
pub mod error;
pub mod time;

pub use account::AccountId;
pub use amount::Amount;
pub use error::StakedaoError;
pub use time::{Clock, SystemClock, Timestamp};

/// Sequential, 0-based identifier of a governance proposal.
pub type ProposalId = u64;

/// Seconds in one day.
pub const SECS_PER_DAY: u64 = 86_400;

/// Seconds in one hour.
pub const SECS_PER_HOUR: u64 = 3_600;
