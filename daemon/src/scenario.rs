//! Scenario replay: apply a scripted list of operations to a fresh ledger.
//!
//! Scenarios run on a [`NullClock`], so time only moves on `advance` steps and
//! a replay is fully reproducible.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use stakedao_ledger::{Ledger, LedgerConfig, LedgerError, LedgerSummary};
use stakedao_nullables::NullClock;
use stakedao_types::{AccountId, Amount, ProposalId};

fn default_deployer() -> AccountId {
    AccountId::new("deployer")
}

/// A scripted sequence of ledger operations.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    /// Clock value when the ledger is deployed.
    #[serde(default)]
    pub start_time: u64,
    #[serde(default = "default_deployer")]
    pub deployer: AccountId,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }
}

/// One operation. Token quantities are whole tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Advance { secs: u64 },
    Transfer { from: AccountId, to: AccountId, tokens: u64 },
    TransferReward { from: AccountId, to: AccountId, tokens: u64 },
    /// Approve the staking engine to pull `owner`'s base asset.
    Approve { owner: AccountId, tokens: u64 },
    Stake { account: AccountId, tokens: u64 },
    Claim { account: AccountId },
    Unstake { account: AccountId },
    Propose { account: AccountId, description: String },
    Vote { account: AccountId, proposal: ProposalId, support: bool },
    Status { proposal: ProposalId },
}

#[derive(Clone, Debug, Serialize)]
pub struct AccountReport {
    pub account: AccountId,
    pub base: Amount,
    pub reward: Amount,
    pub staked: Amount,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProposalReport {
    pub id: ProposalId,
    pub description: String,
    pub yes: Amount,
    pub no: Amount,
    pub status: String,
}

/// Final state after a replay.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub summary: LedgerSummary,
    pub accounts: Vec<AccountReport>,
    pub proposals: Vec<ProposalReport>,
    /// Steps that returned an error.
    pub failed_steps: Vec<usize>,
}

/// A ledger being driven by a scenario.
pub struct Replay {
    ledger: Ledger<NullClock>,
    accounts: BTreeSet<AccountId>,
    failed_steps: Vec<usize>,
}

fn tokens(n: u64) -> Result<Amount, LedgerError> {
    Amount::from_tokens(n as u128)
        .ok_or_else(|| LedgerError::Config(format!("{n} tokens overflows")))
}

impl Replay {
    pub fn new(config: &LedgerConfig, scenario: &Scenario) -> Result<Self, LedgerError> {
        let ledger = Ledger::deploy(
            config,
            scenario.deployer.clone(),
            NullClock::new(scenario.start_time),
        )?;
        let mut accounts = BTreeSet::new();
        accounts.insert(scenario.deployer.clone());
        Ok(Self {
            ledger,
            accounts,
            failed_steps: Vec::new(),
        })
    }

    pub fn ledger(&self) -> &Ledger<NullClock> {
        &self.ledger
    }

    /// Apply one step, returning a short description of what happened.
    pub fn apply(&mut self, step: &Step) -> Result<String, LedgerError> {
        let ledger = &mut self.ledger;
        match step {
            Step::Advance { secs } => {
                ledger.clock().advance(*secs);
                Ok(format!("clock at {}", ledger.now()))
            }
            Step::Transfer { from, to, tokens: n } => {
                self.accounts.extend([from.clone(), to.clone()]);
                ledger.transfer_base(from, to, tokens(*n)?)?;
                Ok(format!("{from} sent {n} base tokens to {to}"))
            }
            Step::TransferReward { from, to, tokens: n } => {
                self.accounts.extend([from.clone(), to.clone()]);
                ledger.transfer_reward(from, to, tokens(*n)?)?;
                Ok(format!("{from} sent {n} reward tokens to {to}"))
            }
            Step::Approve { owner, tokens: n } => {
                ledger.approve_stake(owner, tokens(*n)?)?;
                Ok(format!("{owner} approved {n} tokens for staking"))
            }
            Step::Stake { account, tokens: n } => {
                self.accounts.insert(account.clone());
                let s = ledger.stake(account, tokens(*n)?)?;
                Ok(format!("{account} staked {n}, settled {} reward", s.reward))
            }
            Step::Claim { account } => {
                let minted = ledger.claim(account)?;
                Ok(format!("{account} claimed {minted}"))
            }
            Step::Unstake { account } => {
                let s = ledger.unstake(account)?;
                Ok(format!(
                    "{account} unstaked {}, settled {} reward",
                    s.principal, s.reward
                ))
            }
            Step::Propose { account, description } => {
                let id = ledger.create_proposal(account, description)?;
                Ok(format!("{account} created proposal {id}"))
            }
            Step::Vote { account, proposal, support } => {
                self.accounts.insert(account.clone());
                let vote = ledger.vote(account, *proposal, *support)?;
                Ok(format!(
                    "{account} voted {} on {proposal} with weight {}",
                    if *support { "yes" } else { "no" },
                    vote.weight
                ))
            }
            Step::Status { proposal } => {
                let status = ledger.proposal_status(*proposal)?;
                Ok(format!("proposal {proposal} is {status}"))
            }
        }
    }

    /// Apply every step. In strict mode the first failure aborts the replay.
    pub fn run(&mut self, steps: &[Step], strict: bool) -> Result<(), LedgerError> {
        for (index, step) in steps.iter().enumerate() {
            match self.apply(step) {
                Ok(outcome) => tracing::info!(step = index, "{outcome}"),
                Err(e) if strict => return Err(e),
                Err(e) => {
                    tracing::warn!(step = index, error = %e, "step failed");
                    self.failed_steps.push(index);
                }
            }
        }
        Ok(())
    }

    pub fn report(&self) -> Report {
        let ledger = &self.ledger;
        let accounts = self
            .accounts
            .iter()
            .map(|account| AccountReport {
                account: account.clone(),
                base: ledger.base_balance(account),
                reward: ledger.reward_balance(account),
                staked: ledger.position(account).principal,
            })
            .collect();
        let now = ledger.now();
        let proposals = ledger
            .governance()
            .proposals()
            .map(|p| ProposalReport {
                id: p.id,
                description: p.description.clone(),
                yes: p.yes_weight,
                no: p.no_weight,
                status: p.status(now).to_string(),
            })
            .collect();
        Report {
            summary: ledger.summary(),
            accounts,
            proposals,
            failed_steps: self.failed_steps.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUICKSTART: &str = include_str!("../scenarios/quickstart.toml");

    fn whole(n: u128) -> Amount {
        Amount::from_tokens(n).unwrap()
    }

    #[test]
    fn quickstart_passes_its_proposal() {
        let scenario = Scenario::from_toml_str(QUICKSTART).unwrap();
        let mut replay = Replay::new(&LedgerConfig::default(), &scenario).unwrap();
        replay.run(&scenario.steps, true).unwrap();

        let report = replay.report();
        assert!(report.failed_steps.is_empty());
        assert_eq!(report.proposals.len(), 1);
        assert_eq!(report.proposals[0].status, "Passed");
        assert_eq!(report.proposals[0].yes, whole(100));

        let user = report
            .accounts
            .iter()
            .find(|a| a.account.as_str() == "user")
            .unwrap();
        assert_eq!(user.base, whole(1_000));
        assert_eq!(user.staked, Amount::ZERO);
        // 100 for the first day, plus 100 * 3601 / 86400 at unstake.
        assert_eq!(
            user.reward,
            whole(100) + Amount::new(whole(100).raw() * 3_601 / 86_400)
        );
    }

    #[test]
    fn lenient_replay_records_failures() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[steps]]
            action = "stake"
            account = "user"
            tokens = 5

            [[steps]]
            action = "claim"
            account = "user"

            [[steps]]
            action = "advance"
            secs = 10
            "#,
        )
        .unwrap();
        let mut replay = Replay::new(&LedgerConfig::default(), &scenario).unwrap();
        replay.run(&scenario.steps, false).unwrap();
        assert_eq!(replay.report().failed_steps, vec![0, 1]);
        assert_eq!(replay.ledger().now().as_secs(), 10);
    }

    #[test]
    fn strict_replay_stops_at_first_failure() {
        let steps = vec![
            Step::Vote {
                account: AccountId::new("user"),
                proposal: 0,
                support: true,
            },
            Step::Advance { secs: 10 },
        ];
        let scenario = Scenario {
            start_time: 0,
            deployer: default_deployer(),
            steps: steps.clone(),
        };
        let mut replay = Replay::new(&LedgerConfig::default(), &scenario).unwrap();
        assert!(replay.run(&steps, true).is_err());
        assert_eq!(replay.ledger().now().as_secs(), 0);
    }

    #[test]
    fn custody_account_cannot_be_drained_by_a_step() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[steps]]
            action = "transfer"
            from = "deployer"
            to = "user"
            tokens = 100

            [[steps]]
            action = "approve"
            owner = "user"
            tokens = 100

            [[steps]]
            action = "stake"
            account = "user"
            tokens = 100

            [[steps]]
            action = "transfer"
            from = "staking"
            to = "mallory"
            tokens = 100

            [[steps]]
            action = "unstake"
            account = "user"
            "#,
        )
        .unwrap();
        let mut replay = Replay::new(&LedgerConfig::default(), &scenario).unwrap();
        replay.run(&scenario.steps, false).unwrap();
        assert_eq!(replay.report().failed_steps, vec![3]);
        assert_eq!(replay.ledger().base_balance(&AccountId::new("mallory")), Amount::ZERO);
        assert_eq!(replay.ledger().base_balance(&AccountId::new("user")), whole(100));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Scenario::from_toml_str(
            r#"
            [[steps]]
            action = "delegate"
            account = "user"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
