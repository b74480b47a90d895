#![no_main]

use libfuzzer_sys::fuzz_target;

use stakedao_staking::accrue;
use stakedao_types::Amount;

// Accrual must never panic, and when it succeeds it must truncate, never round up.
fuzz_target!(|input: (u128, u64, u64)| {
    let (principal, elapsed, period) = input;
    match accrue(Amount::new(principal), elapsed, period) {
        Some(reward) => {
            assert!(period != 0);
            let product = principal * elapsed as u128;
            assert_eq!(reward.raw(), product / period as u128);
            assert!(reward.raw() <= product);
        }
        None => {
            assert!(period == 0 || principal.checked_mul(elapsed as u128).is_none());
        }
    }
});
