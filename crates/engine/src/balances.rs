//! Per-member balances.
//!
//! Every event is folded into a [`Ledger`] that tracks, per [`Account`], how
//! much was paid and how much was used:
//!
//! - an expense adds its full amount to the payer's `paid` and each resolved
//!   share to the participant's `used`
//! - a pool contribution adds to the contributor's `paid`
//! - a settlement adds to the payer's `paid` and to the receiver's `used`
//!
//! The ledger keeps the pool and members no longer in the group as accounts of
//! their own; [`compute_balances`] only reports the current members.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Expense, Member, MemberId, Money, Payer, PoolContribution, Settlement};

/// Ledger key: a member, or the shared pool.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uid", rename_all = "snake_case")]
pub enum Account {
    Member(MemberId),
    Pool,
}

impl From<MemberId> for Account {
    fn from(value: MemberId) -> Self {
        Self::Member(value)
    }
}

impl From<&Payer> for Account {
    fn from(value: &Payer) -> Self {
        match value {
            Payer::Member(uid) => Self::Member(uid.clone()),
            Payer::Pool => Self::Pool,
        }
    }
}

/// Net position of a member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub uid: MemberId,
    pub name: String,
    pub photo_url: Option<String>,
    pub total_paid: Money,
    pub total_used: Money,
    /// `total_paid - total_used`: positive means the member is owed money.
    pub net_balance: Money,
}

/// Paid/used totals for every account touched by the events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    paid: BTreeMap<Account, Money>,
    used: BTreeMap<Account, Money>,
}

impl Ledger {
    /// Empty ledger with a zero entry for every member.
    pub fn new(members: &[Member]) -> Self {
        let mut ledger = Self::default();
        for member in members {
            let account = Account::Member(member.uid.clone());
            ledger.paid.insert(account.clone(), Money::ZERO);
            ledger.used.insert(account, Money::ZERO);
        }
        ledger
    }

    /// Replays expenses, then contributions, then settlements.
    pub fn from_events(
        expenses: &[Expense],
        contributions: &[PoolContribution],
        settlements: &[Settlement],
        members: &[Member],
    ) -> Self {
        tracing::debug!(
            members = members.len(),
            expenses = expenses.len(),
            contributions = contributions.len(),
            settlements = settlements.len(),
            "computing balances"
        );

        let mut ledger = Self::new(members);
        for expense in expenses {
            ledger.record_expense(expense);
        }
        for contribution in contributions {
            ledger.record_contribution(contribution);
        }
        for settlement in settlements {
            ledger.record_settlement(settlement);
        }
        ledger
    }

    pub fn record_expense(&mut self, expense: &Expense) {
        if let Some(discrepancy) = expense.split.discrepancy(expense.amount) {
            tracing::warn!(
                expense = expense.id.as_deref().unwrap_or("<unsaved>"),
                "{discrepancy}"
            );
        }

        *self.paid.entry(Account::from(&expense.paid_by)).or_default() += expense.amount;
        for (uid, share) in expense.split.resolve(expense.amount, &expense.used_by) {
            *self.used.entry(Account::Member(uid)).or_default() += share;
        }
    }

    pub fn record_contribution(&mut self, contribution: &PoolContribution) {
        *self
            .paid
            .entry(Account::Member(contribution.user_id.clone()))
            .or_default() += contribution.amount;
    }

    pub fn record_settlement(&mut self, settlement: &Settlement) {
        *self
            .paid
            .entry(Account::Member(settlement.from_user.clone()))
            .or_default() += settlement.amount;
        *self
            .used
            .entry(Account::Member(settlement.to_user.clone()))
            .or_default() += settlement.amount;
    }

    pub fn paid(&self, account: &Account) -> Money {
        self.paid.get(account).copied().unwrap_or_default()
    }

    pub fn used(&self, account: &Account) -> Money {
        self.used.get(account).copied().unwrap_or_default()
    }

    pub fn net(&self, account: &Account) -> Money {
        self.paid(account) - self.used(account)
    }

    /// Every account with a paid or used entry, in key order.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.paid.keys().chain(self.used.keys()).collect();
        accounts.sort();
        accounts.dedup();
        accounts
    }

    pub fn summary(&self, member: &Member) -> BalanceSummary {
        let account = Account::Member(member.uid.clone());
        let total_paid = self.paid(&account);
        let total_used = self.used(&account);
        BalanceSummary {
            uid: member.uid.clone(),
            name: member.name.clone(),
            photo_url: member.photo_url.clone(),
            total_paid,
            total_used,
            net_balance: total_paid - total_used,
        }
    }
}

/// Computes the balance of every member, in member order.
///
/// Money paid by the pool or by former members is tracked but not reported;
/// use [`Ledger::from_events`] to inspect those accounts.
pub fn compute_balances(
    expenses: &[Expense],
    contributions: &[PoolContribution],
    settlements: &[Settlement],
    members: &[Member],
) -> Vec<BalanceSummary> {
    let ledger = Ledger::from_events(expenses, contributions, settlements, members);
    members.iter().map(|member| ledger.summary(member)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::SplitRule;

    #[test]
    fn settlement_moves_paid_and_used() {
        let now = Utc::now();
        let members = vec![Member::new("a", "A"), Member::new("b", "B")];
        let expenses = vec![
            Expense::new(
                Money::new(2000),
                MemberId::from("b"),
                vec!["a".into(), "b".into()],
                SplitRule::Equal,
                now,
            )
            .unwrap(),
        ];
        let settlements =
            vec![Settlement::new("a".into(), "b".into(), Money::new(1000), now).unwrap()];

        let balances = compute_balances(&expenses, &[], &settlements, &members);
        assert_eq!(balances[0].total_paid, Money::new(1000));
        assert_eq!(balances[0].total_used, Money::new(1000));
        assert!(balances[0].net_balance.is_zero());
        assert_eq!(balances[1].total_paid, Money::new(2000));
        assert_eq!(balances[1].total_used, Money::new(2000));
        assert!(balances[1].net_balance.is_zero());
    }

    #[test]
    fn former_members_stay_in_the_ledger() {
        let now = Utc::now();
        let members = vec![Member::new("a", "A")];
        let expenses = vec![
            Expense::new(
                Money::new(1000),
                MemberId::from("a"),
                vec!["a".into(), "gone".into()],
                SplitRule::Equal,
                now,
            )
            .unwrap(),
        ];

        let ledger = Ledger::from_events(&expenses, &[], &[], &members);
        assert_eq!(ledger.used(&Account::Member("gone".into())), Money::new(500));
        assert_eq!(ledger.accounts().len(), 2);

        let balances = compute_balances(&expenses, &[], &[], &members);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].net_balance, Money::new(500));
    }

    #[test]
    fn members_without_events_have_zero_balance() {
        let members = vec![Member::new("a", "A").with_photo_url("a.png")];
        let balances = compute_balances(&[], &[], &[], &members);
        assert_eq!(
            balances,
            vec![BalanceSummary {
                uid: "a".into(),
                name: "A".to_string(),
                photo_url: Some("a.png".to_string()),
                total_paid: Money::ZERO,
                total_used: Money::ZERO,
                net_balance: Money::ZERO,
            }]
        );
    }

    #[test]
    fn huge_amounts_saturate_instead_of_panicking() {
        let now = Utc::now();
        let members = vec![Member::new("a", "A"), Member::new("b", "B")];
        let huge = Money::from_major(5.0e16).unwrap();
        let expense = || {
            Expense::new(
                huge,
                MemberId::from("a"),
                vec!["a".into(), "b".into()],
                SplitRule::Equal,
                now,
            )
            .unwrap()
        };

        let balances = compute_balances(&[expense(), expense()], &[], &[], &members);
        assert_eq!(balances[0].total_paid, Money::MAX);
        assert_eq!(balances[0].total_used, huge);
        assert_eq!(balances[1].total_used, huge);
        assert_eq!(balances[1].net_balance, -huge);
    }
}
