//! Conversion of stored documents into engine types.
//!
//! Malformed values (non-finite or sub-cent amounts, negative split details,
//! empty uids) are rejected here, before any computation runs. Unknown split
//! types are not an error: they resolve as an equal split.

use std::collections::BTreeMap;

use api_types::{
    GroupMode as StoredMode,
    snapshot::{
        ContributionDocument, ExpenseDocument, GroupDocument, MemberDocument, SettlementDocument,
    },
};
use engine::{
    EngineError, Expense, GroupMode, GroupSnapshot, Member, MemberId, Money, Payer,
    PoolContribution, Settlement, SplitRule, SplitType,
};

use crate::error::{AppError, Result};

type EngineResult<T> = std::result::Result<T, EngineError>;

/// Stored amounts may carry float noise up to this many cents.
const CENT_TOLERANCE: f64 = 1e-6;

/// Relative noise of a stored amount, in units of `f64::EPSILON`.
const NOISE_ULPS: f64 = 4.0;

pub fn group_from_document(document: &GroupDocument) -> Result<GroupSnapshot> {
    let mode = match document.mode {
        StoredMode::Direct => GroupMode::Direct,
        StoredMode::Pool => GroupMode::Pool,
    };

    let members = convert_all("member", &document.members, member)?;
    let mut snapshot = GroupSnapshot::new(mode, members);
    snapshot.expenses = convert_all("expense", &document.expenses, expense)?;
    snapshot.contributions = convert_all("contribution", &document.contributions, contribution)?;
    snapshot.settlements = convert_all("settlement", &document.settlements, settlement)?;

    tracing::debug!(
        members = snapshot.members.len(),
        expenses = snapshot.expenses.len(),
        contributions = snapshot.contributions.len(),
        settlements = snapshot.settlements.len(),
        "loaded group snapshot"
    );
    Ok(snapshot)
}

fn convert_all<D, T>(
    kind: &'static str,
    documents: &[D],
    convert: impl Fn(&D) -> EngineResult<T>,
) -> Result<Vec<T>> {
    documents
        .iter()
        .enumerate()
        .map(|(index, document)| {
            convert(document).map_err(|source| AppError::Document {
                kind,
                index,
                source,
            })
        })
        .collect()
}

/// Converts a stored amount in major units to cents.
fn amount(value: f64) -> EngineResult<Money> {
    let money = Money::from_major(value)
        .ok_or_else(|| EngineError::InvalidAmount(format!("{value} is not a number")))?;
    let cents = value * 100.0;
    let tolerance = CENT_TOLERANCE.max(cents.abs() * f64::EPSILON * NOISE_ULPS);
    if (cents - money.cents() as f64).abs() > tolerance {
        return Err(EngineError::InvalidAmount(format!(
            "{value} has more than two decimals"
        )));
    }
    Ok(money)
}

fn member(document: &MemberDocument) -> EngineResult<Member> {
    Ok(Member {
        uid: MemberId::new(document.uid.as_str())?,
        name: document.name.clone(),
        photo_url: document.photo_url.clone(),
    })
}

fn expense(document: &ExpenseDocument) -> EngineResult<Expense> {
    let split_type = document
        .split_type
        .as_deref()
        .map(SplitType::from_stored)
        .unwrap_or(SplitType::Equal);
    let mut details = BTreeMap::new();
    for (uid, value) in document.split_details.iter().flatten() {
        details.insert(MemberId::new(uid.as_str())?, *value);
    }
    let split = SplitRule::from_details(split_type, &details)?;

    let used_by = document
        .used_by
        .iter()
        .map(|uid| MemberId::new(uid.as_str()))
        .collect::<EngineResult<Vec<_>>>()?;

    let mut expense = Expense::new(
        amount(document.amount)?,
        Payer::from_stored(&document.paid_by)?,
        used_by,
        split,
        document.created_at,
    )?;
    expense.id = document.id.clone();
    expense.description = document.description.clone();
    expense.created_by = document
        .created_by
        .as_deref()
        .map(MemberId::new)
        .transpose()?;
    Ok(expense)
}

fn contribution(document: &ContributionDocument) -> EngineResult<PoolContribution> {
    PoolContribution::new(
        MemberId::new(document.user_id.as_str())?,
        amount(document.amount)?,
        document.created_at,
    )
}

fn settlement(document: &SettlementDocument) -> EngineResult<Settlement> {
    Settlement::new(
        MemberId::new(document.from_user.as_str())?,
        MemberId::new(document.to_user.as_str())?,
        amount(document.amount)?,
        document.created_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(raw: &str) -> GroupDocument {
        serde_json::from_str(raw).unwrap()
    }

    const POOL_TRIP: &str = r#"{
        "mode": "pool",
        "members": [{"uid": "A", "name": "Asha"}, {"uid": "B", "name": "Bilal"}],
        "expenses": [{
            "id": "e1",
            "amount": 200,
            "paidBy": "pool",
            "usedBy": ["A", "B"],
            "splitType": "equal",
            "createdBy": "A",
            "createdAt": "2026-05-01T10:00:00Z"
        }],
        "contributions": [
            {"userId": "A", "amount": 500, "createdAt": "2026-05-01T09:00:00Z"}
        ]
    }"#;

    #[test]
    fn converts_pool_group() {
        let snapshot = group_from_document(&document(POOL_TRIP)).unwrap();
        assert_eq!(snapshot.mode, GroupMode::Pool);
        assert_eq!(snapshot.expenses[0].paid_by, Payer::Pool);
        assert_eq!(snapshot.expenses[0].amount, Money::new(20_000));
        assert_eq!(snapshot.expenses[0].id.as_deref(), Some("e1"));
        assert_eq!(snapshot.expenses[0].created_by, Some(MemberId::from("A")));
        assert_eq!(snapshot.contributions[0].amount, Money::new(50_000));

        let summary = snapshot.summarize();
        assert_eq!(
            summary
                .balance_of(&MemberId::from("A"))
                .map(|balance| balance.net_balance),
            Some(Money::new(40_000))
        );
    }

    #[test]
    fn unknown_split_type_is_equal_and_ignores_details() {
        let snapshot = group_from_document(&document(
            r#"{
                "members": [{"uid": "A", "name": "Asha"}, {"uid": "B", "name": "Bilal"}],
                "expenses": [{
                    "amount": 10.5,
                    "paidBy": "A",
                    "usedBy": ["A", "B"],
                    "splitType": "itemized",
                    "splitDetails": {"A": 99},
                    "createdAt": "2026-05-01T10:00:00Z"
                }]
            }"#,
        ))
        .unwrap();
        assert_eq!(snapshot.expenses[0].split, SplitRule::Equal);
        assert_eq!(snapshot.expenses[0].amount, Money::new(1050));
    }

    #[test]
    fn missing_details_become_empty_rule() {
        let snapshot = group_from_document(&document(
            r#"{
                "members": [{"uid": "A", "name": "Asha"}],
                "expenses": [{
                    "amount": 12,
                    "paidBy": "A",
                    "usedBy": ["A"],
                    "splitType": "percentage",
                    "createdAt": "2026-05-01T10:00:00Z"
                }]
            }"#,
        ))
        .unwrap();
        assert_eq!(
            snapshot.expenses[0].split,
            SplitRule::Percentage(BTreeMap::new())
        );
    }

    #[test]
    fn rejects_sub_cent_amounts_with_position() {
        let err = group_from_document(&document(
            r#"{
                "members": [{"uid": "A", "name": "Asha"}, {"uid": "B", "name": "Bilal"}],
                "settlements": [
                    {"fromUser": "A", "toUser": "B", "amount": 1, "createdAt": "2026-05-01T10:00:00Z"},
                    {"fromUser": "A", "toUser": "B", "amount": 1.005, "createdAt": "2026-05-01T10:00:00Z"}
                ]
            }"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Document {
                kind: "settlement",
                index: 1,
                source: EngineError::InvalidAmount(_),
            }
        ));
    }

    #[test]
    fn rejects_negative_split_details() {
        let err = group_from_document(&document(
            r#"{
                "members": [{"uid": "A", "name": "Asha"}],
                "expenses": [{
                    "amount": 12,
                    "paidBy": "A",
                    "usedBy": ["A"],
                    "splitType": "share",
                    "splitDetails": {"A": -1},
                    "createdAt": "2026-05-01T10:00:00Z"
                }]
            }"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Document {
                kind: "expense",
                index: 0,
                source: EngineError::InvalidSplit(_),
            }
        ));
    }

    #[test]
    fn amount_accepts_float_noise() {
        assert_eq!(amount(0.1 + 0.2).unwrap(), Money::new(30));
        assert!(amount(f64::NAN).is_err());
    }

    #[test]
    fn amount_accepts_large_two_decimal_values() {
        assert_eq!(
            amount(123_456_789_012.34).unwrap(),
            Money::new(12_345_678_901_234)
        );
        assert_eq!(amount(5.0e16).unwrap(), Money::new(5_000_000_000_000_000_000));
        assert!(amount(1_000_000.005).is_err());
    }
}
