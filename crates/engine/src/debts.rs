//! Debt reduction.
//!
//! [`compute_debts`] turns net balances into directed transfers with a greedy
//! largest-debtor/largest-creditor match. It does not always find the
//! theoretical minimum number of transfers, but it never emits more than
//! `debtors + creditors - 1` of them and its output is fully determined by the
//! order of the balances it is given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BalanceSummary, MemberId, Money, Settlement};

/// Balances within a cent of zero are considered settled.
pub const SETTLED_THRESHOLD: Money = Money::CENT;

/// A suggested transfer: `from` pays `amount` to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

impl Debt {
    /// The settlement a caller records once this transfer happened.
    pub fn into_settlement(self, created_at: DateTime<Utc>) -> Settlement {
        Settlement {
            from_user: self.from,
            to_user: self.to,
            amount: self.amount,
            created_at,
        }
    }

    pub fn involves(&self, uid: &MemberId) -> bool {
        &self.from == uid || &self.to == uid
    }
}

struct Position<'a> {
    uid: &'a MemberId,
    remaining: Money,
}

/// Reduces balances to a list of transfers that settles them up to a few
/// cents.
///
/// Debtors (net below minus one cent) and creditors (net above one cent) are
/// each sorted by amount, largest first. Ties keep the order of `balances`.
/// The current debtor then pays the current creditor the smaller of their two
/// remaining amounts, and whichever side drops below a cent moves on.
///
/// A transfer of a single cent is counted as paid but not emitted, which
/// leaves both of its sides a cent off. Members within a cent of zero are
/// never matched, so their cent stays unsettled on the other side. Summed over
/// the group, at most two cents per member remain unsettled. Balances in whole
/// currency units always settle exactly.
pub fn compute_debts(balances: &[BalanceSummary]) -> Vec<Debt> {
    let mut debtors: Vec<Position<'_>> = balances
        .iter()
        .filter(|balance| balance.net_balance < -SETTLED_THRESHOLD)
        .map(|balance| Position {
            uid: &balance.uid,
            remaining: balance.net_balance.abs(),
        })
        .collect();
    let mut creditors: Vec<Position<'_>> = balances
        .iter()
        .filter(|balance| balance.net_balance > SETTLED_THRESHOLD)
        .map(|balance| Position {
            uid: &balance.uid,
            remaining: balance.net_balance,
        })
        .collect();

    // `sort_by` is stable, so equal amounts keep their input order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut debts = Vec::new();
    let (mut d, mut c) = (0, 0);
    while d < debtors.len() && c < creditors.len() {
        let debtor = &debtors[d];
        let creditor = &creditors[c];
        let amount = debtor.remaining.min(creditor.remaining);

        if amount > SETTLED_THRESHOLD {
            debts.push(Debt {
                from: debtor.uid.clone(),
                to: creditor.uid.clone(),
                amount,
            });
        }

        debtors[d].remaining -= amount;
        creditors[c].remaining -= amount;

        if debtors[d].remaining < SETTLED_THRESHOLD {
            d += 1;
        }
        if creditors[c].remaining < SETTLED_THRESHOLD {
            c += 1;
        }
    }

    tracing::debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = debts.len(),
        "computed debts"
    );
    debts
}
