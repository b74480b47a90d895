//! Staking engine: lock the base asset, accrue the reward asset.
//!
//! Accrual is linear and proportional:
//! `reward = principal × (t_now − accruing_since) / accrual_period`
//!
//! A full accrual period earns reward equal to the principal. Every change of
//! principal, and every explicit claim, first settles what has accrued so far
//! (mints it) and restarts the accrual clock at that instant.
//!
//! The engine is the sole minter of the reward asset. It never holds a
//! reference to either asset; callers pass them into each operation.

pub mod engine;
pub mod error;
pub mod position;

pub use engine::{Settlement, StakingEngine, DEFAULT_ACCRUAL_PERIOD_SECS};
pub use error::StakingError;
pub use position::{accrue, StakePosition};
