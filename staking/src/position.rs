//! Per-account staking position and the accrual formula.

use serde::{Deserialize, Serialize};
use stakedao_types::{Amount, Timestamp};

/// Reward accrued by `principal` over `elapsed_secs`, truncated toward zero.
///
/// Returns `None` if `principal × elapsed` overflows u128, or if
/// `accrual_period_secs` is zero.
pub fn accrue(principal: Amount, elapsed_secs: u64, accrual_period_secs: u64) -> Option<Amount> {
    if accrual_period_secs == 0 {
        return None;
    }
    let numerator = principal.raw().checked_mul(elapsed_secs as u128)?;
    Some(Amount::new(numerator / accrual_period_secs as u128))
}

/// The staking position of one account.
///
/// `accruing_since` is `Some` exactly when `principal` is non-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Base asset currently locked.
    pub principal: Amount,
    /// When the current principal started accruing.
    pub accruing_since: Option<Timestamp>,
}

impl StakePosition {
    pub fn is_active(&self) -> bool {
        !self.principal.is_zero()
    }

    /// Reward accrued and not yet settled, as of `now`.
    pub fn accrued_checked(&self, accrual_period_secs: u64, now: Timestamp) -> Option<Amount> {
        match self.accruing_since {
            Some(since) if self.is_active() => {
                accrue(self.principal, since.elapsed_since(now), accrual_period_secs)
            }
            _ => Some(Amount::ZERO),
        }
    }
}
