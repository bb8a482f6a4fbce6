//! Expenses.
//!
//! An [`Expense`] is a single spending event: someone (or the shared pool)
//! fronted `amount`, and the members in `used_by` share the cost according to
//! the expense [`SplitRule`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MemberId, Money, ResultEngine, SplitRule};

/// Stored value of `paidBy` meaning "paid from the shared pool".
pub const POOL_SENTINEL: &str = "pool";

/// How long the creator may still edit or delete an expense.
pub const EDIT_WINDOW_HOURS: i64 = 48;

/// Who fronted the money for an expense.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uid", rename_all = "snake_case")]
pub enum Payer {
    Member(MemberId),
    Pool,
}

impl Payer {
    /// Parses the stored `paidBy` value, mapping [`POOL_SENTINEL`] to
    /// [`Payer::Pool`].
    pub fn from_stored(value: &str) -> ResultEngine<Self> {
        if value == POOL_SENTINEL {
            return Ok(Self::Pool);
        }
        Ok(Self::Member(MemberId::new(value)?))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Member(uid) => uid.as_str(),
            Self::Pool => POOL_SENTINEL,
        }
    }

    pub fn is_pool(&self) -> bool {
        matches!(self, Self::Pool)
    }
}

impl From<MemberId> for Payer {
    fn from(value: MemberId) -> Self {
        Self::Member(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<String>,
    pub description: Option<String>,
    pub amount: Money,
    pub paid_by: Payer,
    pub used_by: Vec<MemberId>,
    pub split: SplitRule,
    pub created_by: Option<MemberId>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense, rejecting non-positive amounts and empty `used_by`.
    pub fn new(
        amount: Money,
        paid_by: impl Into<Payer>,
        used_by: Vec<MemberId>,
        split: SplitRule,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "expense amount must be > 0".to_string(),
            ));
        }
        if used_by.is_empty() {
            return Err(EngineError::InvalidSplit(
                "expense must be used by at least one member".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            description: None,
            amount,
            paid_by: paid_by.into(),
            used_by,
            split,
            created_by: None,
            created_at,
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_creator(mut self, creator: MemberId) -> Self {
        self.created_by = Some(creator);
        self
    }

    /// Whether `uid` may still edit or delete this expense at `now`: only the
    /// creator, and only within [`EDIT_WINDOW_HOURS`] of creation.
    pub fn can_be_modified_by(&self, uid: &MemberId, now: DateTime<Utc>) -> bool {
        let Some(creator) = &self.created_by else {
            return false;
        };
        if creator != uid || now < self.created_at {
            return false;
        }
        now - self.created_at <= Duration::hours(EDIT_WINDOW_HOURS)
    }
}
