//! Group snapshot and summary.
//!
//! A [`GroupSnapshot`] bundles everything the engine needs for a group at one
//! point in time. [`GroupSnapshot::summarize`] is the single entry point the
//! application calls whenever the snapshot changes.

use serde::{Deserialize, Serialize};

use crate::{
    BalanceSummary, Debt, Expense, Member, MemberId, Money, PoolContribution, PoolStatus,
    Settlement, compute_balances, compute_debts,
};

/// How expenses are funded in a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// Each expense has an individual payer who is later reimbursed.
    #[default]
    Direct,
    /// Expenses are paid from a shared fund members contribute to.
    Pool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub mode: GroupMode,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    pub contributions: Vec<PoolContribution>,
    pub settlements: Vec<Settlement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub balances: Vec<BalanceSummary>,
    pub debts: Vec<Debt>,
    /// Present only for pool-mode groups.
    pub pool: Option<PoolStatus>,
    /// Sum of all expense amounts, whoever paid them.
    pub total_spent: Money,
}

impl GroupSnapshot {
    pub fn new(mode: GroupMode, members: Vec<Member>) -> Self {
        Self {
            mode,
            members,
            ..Default::default()
        }
    }

    pub fn member(&self, uid: &MemberId) -> Option<&Member> {
        self.members.iter().find(|member| &member.uid == uid)
    }

    /// Computes balances, suggested debts and pool status.
    ///
    /// Debts are derived from member balances only, so the pool account never
    /// shows up as a debtor or creditor.
    pub fn summarize(&self) -> GroupSummary {
        let balances = compute_balances(
            &self.expenses,
            &self.contributions,
            &self.settlements,
            &self.members,
        );
        let debts = compute_debts(&balances);
        let pool = (self.mode == GroupMode::Pool)
            .then(|| PoolStatus::from_events(&self.expenses, &self.contributions));
        let total_spent = self.expenses.iter().map(|expense| expense.amount).sum();

        GroupSummary {
            balances,
            debts,
            pool,
            total_spent,
        }
    }
}

impl GroupSummary {
    pub fn balance_of(&self, uid: &MemberId) -> Option<&BalanceSummary> {
        self.balances.iter().find(|balance| &balance.uid == uid)
    }

    /// Suggested transfers the member pays or receives.
    pub fn debts_of<'a>(&'a self, uid: &'a MemberId) -> impl Iterator<Item = &'a Debt> + 'a {
        self.debts.iter().filter(move |debt| debt.involves(uid))
    }

    /// `true` when no transfer is needed.
    pub fn is_settled(&self) -> bool {
        self.debts.is_empty()
    }
}
