//! Turns a [`GroupSummary`] into the report handed back to the caller, either
//! as [`ReportView`] JSON or as a plain text table.

use std::fmt;

use api_types::{
    GroupMode as StoredMode,
    report::{BalanceView, DebtView, PoolView, ReportView},
};
use engine::{GroupMode, GroupSnapshot, GroupSummary, MemberId, Money};

use crate::error::{AppError, Result};

/// Restricts a summary to what concerns one member.
pub fn focus(summary: GroupSummary, uid: &MemberId) -> Result<GroupSummary> {
    let balance = summary
        .balance_of(uid)
        .cloned()
        .ok_or_else(|| AppError::UnknownMember(uid.to_string()))?;
    let debts = summary.debts_of(uid).cloned().collect();
    Ok(GroupSummary {
        balances: vec![balance],
        debts,
        ..summary
    })
}

pub fn view(name: Option<&str>, snapshot: &GroupSnapshot, summary: &GroupSummary) -> ReportView {
    let display_name = |uid: &MemberId| {
        snapshot
            .member(uid)
            .map(|member| member.name.clone())
            .unwrap_or_else(|| uid.to_string())
    };

    ReportView {
        group: name.map(ToString::to_string),
        mode: match snapshot.mode {
            GroupMode::Direct => StoredMode::Direct,
            GroupMode::Pool => StoredMode::Pool,
        },
        total_spent: summary.total_spent.to_major(),
        balances: summary
            .balances
            .iter()
            .map(|balance| BalanceView {
                uid: balance.uid.to_string(),
                name: balance.name.clone(),
                photo_url: balance.photo_url.clone(),
                total_paid: balance.total_paid.to_major(),
                total_used: balance.total_used.to_major(),
                net_balance: balance.net_balance.to_major(),
            })
            .collect(),
        debts: summary
            .debts
            .iter()
            .map(|debt| DebtView {
                from: debt.from.to_string(),
                from_name: display_name(&debt.from),
                to: debt.to.to_string(),
                to_name: display_name(&debt.to),
                amount: debt.amount.to_major(),
            })
            .collect(),
        pool: summary.pool.map(|pool| PoolView {
            contributed: pool.contributed.to_major(),
            spent: pool.spent.to_major(),
            remaining: pool.remaining.to_major(),
        }),
    }
}

fn signed(amount: Money) -> String {
    if amount.is_positive() {
        format!("+{amount}")
    } else {
        amount.to_string()
    }
}

/// Plain text rendering of a [`ReportView`].
pub struct TextReport<'a>(pub &'a ReportView);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let mode = match report.mode {
            StoredMode::Direct => "direct",
            StoredMode::Pool => "pool",
        };
        writeln!(f, "{} ({mode})", report.group.as_deref().unwrap_or("Group"))?;
        writeln!(f, "Total spent: {:.2}", report.total_spent)?;

        let width = report
            .balances
            .iter()
            .map(|balance| balance.name.chars().count())
            .max()
            .unwrap_or(0);

        writeln!(f, "\nBalances")?;
        for balance in &report.balances {
            let net = Money::from_major(balance.net_balance).unwrap_or_default();
            writeln!(
                f,
                "  {:<width$}  paid {:>10.2}  used {:>10.2}  net {:>11}",
                balance.name,
                balance.total_paid,
                balance.total_used,
                signed(net),
            )?;
        }

        writeln!(f, "\nSettle up")?;
        if report.debts.is_empty() {
            writeln!(f, "  all settled")?;
        }
        for debt in &report.debts {
            writeln!(
                f,
                "  {} -> {}  {:.2}",
                debt.from_name, debt.to_name, debt.amount
            )?;
        }

        if let Some(pool) = &report.pool {
            writeln!(f, "\nPool")?;
            writeln!(
                f,
                "  contributed {:.2}  spent {:.2}  remaining {:.2}",
                pool.contributed, pool.spent, pool.remaining
            )?;
        }
        Ok(())
    }
}
