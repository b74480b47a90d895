//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for stakedao value types.
#[derive(Debug, Error)]
pub enum StakedaoError {
    #[error("invalid account identifier: {0:?}")]
    InvalidAccount(String),
}
