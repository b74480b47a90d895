use proptest::prelude::*;

use stakedao_types::{AccountId, Amount, Timestamp};

proptest! {
    /// Amount checked_add agrees with u128 checked_add.
    #[test]
    fn amount_checked_add_matches_raw(a in any::<u128>(), b in any::<u128>()) {
        let sum = Amount::new(a).checked_add(Amount::new(b)).map(|s| s.raw());
        prop_assert_eq!(sum, a.checked_add(b));
    }

    /// saturating_sub never underflows and never exceeds the minuend.
    #[test]
    fn amount_saturating_sub_bounded(a in any::<u128>(), b in any::<u128>()) {
        let diff = Amount::new(a).saturating_sub(Amount::new(b));
        prop_assert!(diff.raw() <= a);
    }

    /// elapsed_since is the forward distance between two timestamps, or zero.
    #[test]
    fn elapsed_since_forward_distance(start in 0u64..1_000_000_000, delta in 0u64..1_000_000_000) {
        let t0 = Timestamp::new(start);
        let t1 = Timestamp::new(start + delta);
        prop_assert_eq!(t0.elapsed_since(t1), delta);
        prop_assert_eq!(t1.elapsed_since(t0), 0);
    }

    /// Any non-empty identifier without surrounding whitespace parses.
    #[test]
    fn account_parse_plain(name in "[a-z][a-z0-9_]{0,31}") {
        let id = AccountId::parse(name.clone()).unwrap();
        prop_assert_eq!(id.as_str(), name.as_str());
    }
}
