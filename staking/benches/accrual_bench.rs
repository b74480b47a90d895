use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stakedao_asset::{AssetLedger, FungibleAsset};
use stakedao_staking::{accrue, StakingEngine};
use stakedao_types::{AccountId, Amount, Timestamp};

fn bench_accrue(c: &mut Criterion) {
    let mut group = c.benchmark_group("accrue");
    for elapsed in [1u64, 3_600, 86_400, 31_536_000] {
        group.bench_with_input(BenchmarkId::new("accrue", elapsed), &elapsed, |b, &elapsed| {
            b.iter(|| {
                black_box(accrue(
                    black_box(Amount::new(1_000_000_000_000_000_000)),
                    black_box(elapsed),
                    black_box(86_400),
                ))
            });
        });
    }
    group.finish();
}

fn bench_claim_many_accounts(c: &mut Criterion) {
    let mut group = c.benchmark_group("claim");

    for account_count in [10usize, 100, 1_000] {
        let deployer = AccountId::new("deployer");
        let staking = AccountId::new("staking");
        let mut base = AssetLedger::with_supply(
            "StakeToken",
            "STK",
            deployer.clone(),
            Amount::new(account_count as u128 * 1_000),
        );
        let mut reward = AssetLedger::new("GovToken", "GOV", deployer.clone());
        reward.set_minter(&deployer, staking.clone()).unwrap();
        let mut engine = StakingEngine::with_default_period(staking.clone());

        let accounts: Vec<AccountId> = (0..account_count)
            .map(|i| AccountId::new(format!("holder{i}")))
            .collect();
        for account in &accounts {
            base.transfer(&deployer, account, Amount::new(1_000)).unwrap();
            base.approve(account, &staking, Amount::new(1_000));
            engine
                .stake(&mut base, &mut reward, account, Amount::new(1_000), Timestamp::new(0))
                .unwrap();
        }

        let mut now = 0u64;
        group.bench_with_input(
            BenchmarkId::new("claim_all", account_count),
            &account_count,
            |b, _| {
                b.iter(|| {
                    now += 60;
                    for account in &accounts {
                        black_box(engine.claim(&mut reward, account, Timestamp::new(now)).unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_accrue, bench_claim_many_accounts);
criterion_main!(benches);
