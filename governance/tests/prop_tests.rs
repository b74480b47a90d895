use proptest::prelude::*;

use stakedao_asset::{AssetLedger, FungibleAsset};
use stakedao_governance::{GovernanceEngine, ProposalStatus};
use stakedao_types::{AccountId, Amount, Timestamp};

const WINDOW: u64 = 3_600;

/// (voter index, support, vote time offset)
fn ballots() -> impl Strategy<Value = Vec<(usize, bool, u64)>> {
    prop::collection::vec((0usize..8, any::<bool>(), 0u64..(2 * WINDOW)), 0..40)
}

fn gov_token(weights: &[u128]) -> (AssetLedger, Vec<AccountId>) {
    let deployer = AccountId::new("deployer");
    let mut gov = AssetLedger::new("GovToken", "GOV", deployer.clone());
    gov.set_minter(&deployer, deployer.clone()).unwrap();
    let voters: Vec<AccountId> = (0..weights.len())
        .map(|i| AccountId::new(format!("voter{i}")))
        .collect();
    for (voter, w) in voters.iter().zip(weights) {
        gov.mint(&deployer, voter, Amount::new(*w)).unwrap();
    }
    (gov, voters)
}

proptest! {
    /// Tallies never decrease and never change at or after the deadline.
    #[test]
    fn tallies_monotone_and_frozen(
        weights in prop::collection::vec(0u128..1_000_000, 8),
        ballots in ballots(),
    ) {
        let mut ballots = ballots;
        ballots.sort_by_key(|b| b.2);
        let (gov, voters) = gov_token(&weights);
        let mut dao = GovernanceEngine::new(WINDOW).unwrap();
        let id = dao.create_proposal(&voters[0], "tally", Timestamp::new(0)).unwrap();

        let mut last_total = Amount::ZERO;
        for (who, support, at) in ballots {
            let before = dao.proposal(id).unwrap().clone();
            let result = dao.vote(&gov, &voters[who], id, support, Timestamp::new(at));
            let after = dao.proposal(id).unwrap();
            let total = after.total_weight().unwrap();
            prop_assert!(total >= last_total);
            prop_assert!(after.yes_weight >= before.yes_weight);
            prop_assert!(after.no_weight >= before.no_weight);
            if at >= WINDOW {
                prop_assert!(result.is_err());
                prop_assert_eq!(total, last_total);
            }
            last_total = total;
        }
    }

    /// Each account contributes at most once: total weight ≤ sum of balances.
    #[test]
    fn each_account_counts_once(
        weights in prop::collection::vec(0u128..1_000_000, 8),
        ballots in ballots(),
    ) {
        let (gov, voters) = gov_token(&weights);
        let mut dao = GovernanceEngine::new(WINDOW).unwrap();
        let id = dao.create_proposal(&voters[0], "once", Timestamp::new(0)).unwrap();
        for (who, support, _) in ballots {
            let _ = dao.vote(&gov, &voters[who], id, support, Timestamp::new(1));
        }
        let supply = gov.total_supply();
        prop_assert!(dao.proposal(id).unwrap().total_weight().unwrap() <= supply);
    }

    /// Once past the deadline the status is the same at every later instant.
    #[test]
    fn status_stable_after_deadline(
        weights in prop::collection::vec(0u128..1_000_000, 8),
        ballots in ballots(),
        t1 in WINDOW..(100 * WINDOW),
        t2 in WINDOW..(100 * WINDOW),
    ) {
        let (gov, voters) = gov_token(&weights);
        let mut dao = GovernanceEngine::new(WINDOW).unwrap();
        let id = dao.create_proposal(&voters[0], "stable", Timestamp::new(0)).unwrap();
        for (who, support, at) in ballots {
            let _ = dao.vote(&gov, &voters[who], id, support, Timestamp::new(at));
        }
        let s1 = dao.status(id, Timestamp::new(t1)).unwrap();
        let s2 = dao.status(id, Timestamp::new(t2)).unwrap();
        prop_assert_eq!(s1, s2);
        prop_assert_ne!(s1, ProposalStatus::Active);
        let p = dao.proposal(id).unwrap();
        prop_assert_eq!(s1 == ProposalStatus::Passed, p.yes_weight > p.no_weight);
    }
}
