//! Shared pool.
//!
//! In pool mode members deposit money into a common fund with
//! [`PoolContribution`]s and expenses are paid from it ([`Payer::Pool`]).
//! A contribution counts as the member having paid that amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Expense, MemberId, Money, Payer, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolContribution {
    pub user_id: MemberId,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl PoolContribution {
    pub fn new(user_id: MemberId, amount: Money, created_at: DateTime<Utc>) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "contribution amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            user_id,
            amount,
            created_at,
        })
    }
}

/// Money that went into and out of the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    pub contributed: Money,
    pub spent: Money,
    /// `contributed - spent`; negative when the pool is overdrawn.
    pub remaining: Money,
}

impl PoolStatus {
    pub fn from_events(expenses: &[Expense], contributions: &[PoolContribution]) -> Self {
        let contributed: Money = contributions.iter().map(|c| c.amount).sum();
        let spent: Money = expenses
            .iter()
            .filter(|expense| expense.paid_by == Payer::Pool)
            .map(|expense| expense.amount)
            .sum();
        Self {
            contributed,
            spent,
            remaining: contributed - spent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SplitRule;

    #[test]
    fn contribution_must_be_positive() {
        let err = PoolContribution::new(MemberId::from("a"), Money::new(-5), Utc::now())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn status_counts_only_pool_paid_expenses() {
        let now = Utc::now();
        let used_by = vec![MemberId::from("a"), MemberId::from("b")];
        let expenses = vec![
            Expense::new(Money::new(20_000), Payer::Pool, used_by.clone(), SplitRule::Equal, now)
                .unwrap(),
            Expense::new(Money::new(5_000), MemberId::from("b"), used_by, SplitRule::Equal, now)
                .unwrap(),
        ];
        let contributions = vec![
            PoolContribution::new(MemberId::from("a"), Money::new(50_000), now).unwrap(),
            PoolContribution::new(MemberId::from("b"), Money::new(10_000), now).unwrap(),
        ];

        let status = PoolStatus::from_events(&expenses, &contributions);
        assert_eq!(status.contributed, Money::new(60_000));
        assert_eq!(status.spent, Money::new(20_000));
        assert_eq!(status.remaining, Money::new(40_000));
    }
}
