#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stakedao_asset::FungibleAsset;
use stakedao_governance::ProposalStatus;
use stakedao_ledger::{Ledger, LedgerConfig};
use stakedao_nullables::NullClock;
use stakedao_types::{AccountId, Amount};

const HOLDERS: [&str; 3] = ["alice", "bob", "carol"];

#[derive(Arbitrary, Debug)]
enum Op {
    Advance(u32),
    Approve { who: u8, amount: u64 },
    Stake { who: u8, amount: u64 },
    Claim { who: u8 },
    Unstake { who: u8 },
    Propose { who: u8 },
    Vote { who: u8, proposal: u8, support: bool },
    SendReward { from: u8, to: u8, amount: u64 },
}

fn holder(i: u8) -> AccountId {
    AccountId::new(HOLDERS[i as usize % HOLDERS.len()])
}

// Arbitrary operation sequences must never panic, must conserve the base asset,
// and must never change a proposal's tallies or status after its deadline.
fuzz_target!(|ops: Vec<Op>| {
    let deployer = AccountId::new("deployer");
    let custody = AccountId::new("staking");
    let mut ledger = Ledger::deploy(&LedgerConfig::default(), deployer.clone(), NullClock::new(0))
        .expect("default config deploys");
    let base_supply = ledger.base().total_supply();
    for name in HOLDERS {
        ledger
            .transfer_base(&deployer, &AccountId::new(name), Amount::new(1_000_000))
            .expect("deployer holds the supply");
    }

    let mut closed: Vec<(u64, Amount, Amount, ProposalStatus)> = Vec::new();

    for op in ops {
        match op {
            Op::Advance(secs) => ledger.clock().advance(secs as u64),
            Op::Approve { who, amount } => {
                let _ = ledger.approve_stake(&holder(who), Amount::new(amount as u128));
            }
            Op::Stake { who, amount } => {
                let _ = ledger.stake(&holder(who), Amount::new(amount as u128));
            }
            Op::Claim { who } => {
                let _ = ledger.claim(&holder(who));
            }
            Op::Unstake { who } => {
                let _ = ledger.unstake(&holder(who));
            }
            Op::Propose { who } => {
                let _ = ledger.create_proposal(&holder(who), "fuzzed");
            }
            Op::Vote { who, proposal, support } => {
                let _ = ledger.vote(&holder(who), proposal as u64, support);
            }
            Op::SendReward { from, to, amount } => {
                let _ = ledger.transfer_reward(&holder(from), &holder(to), Amount::new(amount as u128));
            }
        }

        let held: Amount = HOLDERS
            .iter()
            .map(|name| ledger.base_balance(&AccountId::new(*name)))
            .fold(ledger.base_balance(&deployer), |acc, b| acc + b);
        assert_eq!(held + ledger.base_balance(&custody), base_supply);
        assert_eq!(ledger.base_balance(&custody), ledger.staking().total_staked());

        for (id, yes, no, status) in &closed {
            let p = ledger.proposal(*id).expect("proposals are never removed");
            assert_eq!((p.yes_weight, p.no_weight), (*yes, *no));
            assert_eq!(ledger.proposal_status(*id).expect("exists"), *status);
        }
        let now = ledger.now();
        for p in ledger.governance().proposals() {
            if !p.is_open(now) && !closed.iter().any(|c| c.0 == p.id) {
                closed.push((p.id, p.yes_weight, p.no_weight, p.status(now)));
            }
        }
    }
});
