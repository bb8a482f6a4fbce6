use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a group funds its expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    #[default]
    Direct,
    Pool,
}

/// Documents as they are stored by the backend, already loaded and authorized.
///
/// Amounts are decimal major units (e.g. `12.5`).
pub mod snapshot {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupDocument {
        pub name: Option<String>,
        #[serde(default)]
        pub mode: GroupMode,
        pub members: Vec<MemberDocument>,
        #[serde(default)]
        pub expenses: Vec<ExpenseDocument>,
        #[serde(default, alias = "poolContributions")]
        pub contributions: Vec<ContributionDocument>,
        #[serde(default)]
        pub settlements: Vec<SettlementDocument>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberDocument {
        pub uid: String,
        pub name: String,
        #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseDocument {
        pub id: Option<String>,
        pub description: Option<String>,
        pub amount: f64,
        /// Member uid, or `"pool"` when paid from the shared pool.
        pub paid_by: String,
        pub used_by: Vec<String>,
        /// `equal`, `unequal`, `percentage` or `share`; anything else is
        /// treated as `equal`.
        #[serde(default)]
        pub split_type: Option<String>,
        /// Meaning depends on `split_type`: amounts, percents or weights.
        #[serde(default)]
        pub split_details: Option<BTreeMap<String, f64>>,
        pub created_by: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContributionDocument {
        pub user_id: String,
        pub amount: f64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettlementDocument {
        pub from_user: String,
        pub to_user: String,
        pub amount: f64,
        pub created_at: DateTime<Utc>,
    }
}

/// Computed results handed back to the caller, amounts in major units.
pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportView {
        pub group: Option<String>,
        pub mode: GroupMode,
        pub total_spent: f64,
        pub balances: Vec<BalanceView>,
        pub debts: Vec<DebtView>,
        pub pool: Option<PoolView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceView {
        pub uid: String,
        pub name: String,
        #[serde(rename = "photoURL")]
        pub photo_url: Option<String>,
        pub total_paid: f64,
        pub total_used: f64,
        /// Positive: the member is owed money. Negative: the member owes.
        pub net_balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtView {
        pub from: String,
        pub from_name: String,
        pub to: String,
        pub to_name: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PoolView {
        pub contributed: f64,
        pub spent: f64,
        pub remaining: f64,
    }
}
