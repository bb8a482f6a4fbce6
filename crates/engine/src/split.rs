//! Split resolution.
//!
//! A [`SplitRule`] says how the cost of a single expense is divided among the
//! members that used it. [`resolve_split`] turns the rule into the amount each
//! participant owes for that expense.
//!
//! The resolver never fails: unknown split types fall back to an equal split
//! (see [`SplitType::from_stored`]), missing details behave as an empty map and
//! a share split with no units resolves to nobody owing anything. Rules whose
//! details do not add up to the expense are resolved as declared;
//! [`SplitRule::discrepancy`] reports them without correcting them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::{EngineError, MemberId, Money, ResultEngine};

/// What each participant owes for one expense.
pub type Owed = BTreeMap<MemberId, Money>;

/// Percentages may drift this far from 100 before they are reported.
const PERCENT_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    Equal,
    Unequal,
    Percentage,
    Share,
}

impl SplitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Unequal => "unequal",
            Self::Percentage => "percentage",
            Self::Share => "share",
        }
    }

    /// Parses the stored split type. Unrecognized values are treated as
    /// [`SplitType::Equal`].
    pub fn from_stored(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "unequal" => Self::Unequal,
            "percentage" => Self::Percentage,
            "share" => Self::Share,
            _ => Self::Equal,
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split policy of an expense, each variant carrying its own details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "snake_case")]
pub enum SplitRule {
    /// Everyone in `used_by` pays the same, rounding drift goes to the first.
    #[default]
    Equal,
    /// Literal amount owed by each member.
    Unequal(BTreeMap<MemberId, Money>),
    /// Percent of the expense owed by each member.
    Percentage(BTreeMap<MemberId, f64>),
    /// Relative weight of each member.
    Share(BTreeMap<MemberId, f64>),
}

impl SplitRule {
    /// Builds a rule from a split type and the raw stored details.
    ///
    /// For [`SplitType::Unequal`] the values are amounts in major units; for
    /// percentage and share they are percents and weights. Values must be
    /// finite and non-negative. Details are ignored for an equal split.
    pub fn from_details(
        split_type: SplitType,
        details: &BTreeMap<MemberId, f64>,
    ) -> ResultEngine<Self> {
        if split_type == SplitType::Equal {
            return Ok(Self::Equal);
        }

        for (uid, value) in details {
            if !value.is_finite() || *value < 0.0 {
                return Err(EngineError::InvalidSplit(format!(
                    "{split_type} detail for '{uid}' must be a non-negative number"
                )));
            }
        }

        let rule = match split_type {
            SplitType::Equal => Self::Equal,
            SplitType::Unequal => {
                let mut amounts = BTreeMap::new();
                for (uid, value) in details {
                    let amount = Money::from_major(*value).ok_or_else(|| {
                        EngineError::InvalidSplit(format!("amount for '{uid}' is out of range"))
                    })?;
                    amounts.insert(uid.clone(), amount);
                }
                Self::Unequal(amounts)
            }
            SplitType::Percentage => Self::Percentage(details.clone()),
            SplitType::Share => Self::Share(details.clone()),
        };
        Ok(rule)
    }

    pub fn split_type(&self) -> SplitType {
        match self {
            Self::Equal => SplitType::Equal,
            Self::Unequal(_) => SplitType::Unequal,
            Self::Percentage(_) => SplitType::Percentage,
            Self::Share(_) => SplitType::Share,
        }
    }

    /// Shortcut for [`resolve_split`].
    pub fn resolve(&self, amount: Money, participants: &[MemberId]) -> Owed {
        resolve_split(amount, participants, self)
    }

    /// Reports details that do not add up: unequal amounts not summing to
    /// `amount`, or percentages not summing to 100.
    ///
    /// The discrepancy is never corrected; resolution uses the details as
    /// declared.
    pub fn discrepancy(&self, amount: Money) -> Option<SplitDiscrepancy> {
        match self {
            Self::Unequal(amounts) => {
                let declared: Money = amounts.values().sum();
                (declared != amount).then_some(SplitDiscrepancy::UnequalTotal { declared, amount })
            }
            Self::Percentage(percents) => {
                let declared: f64 = percents.values().sum();
                ((declared - 100.0).abs() > PERCENT_TOLERANCE)
                    .then_some(SplitDiscrepancy::PercentageTotal { declared })
            }
            Self::Equal | Self::Share(_) => None,
        }
    }
}

/// Split details that do not match the expense they belong to.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitDiscrepancy {
    UnequalTotal { declared: Money, amount: Money },
    PercentageTotal { declared: f64 },
}

impl fmt::Display for SplitDiscrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnequalTotal { declared, amount } => write!(
                f,
                "unequal split declares {declared} but the expense is {amount}"
            ),
            Self::PercentageTotal { declared } => {
                write!(f, "percentage split declares {declared}% instead of 100%")
            }
        }
    }
}

/// Computes how much each participant owes for an expense of `amount`.
pub fn resolve_split(amount: Money, participants: &[MemberId], rule: &SplitRule) -> Owed {
    match rule {
        SplitRule::Equal => split_equally(amount, participants),
        SplitRule::Unequal(amounts) => amounts.clone(),
        SplitRule::Percentage(percents) => participants
            .iter()
            .map(|uid| {
                let percent = percents.get(uid).copied().unwrap_or(0.0);
                (uid.clone(), amount.mul_ratio(percent, 100.0))
            })
            .collect(),
        SplitRule::Share(units) => {
            let total_units: f64 = units.values().sum();
            if total_units == 0.0 {
                return Owed::new();
            }
            participants
                .iter()
                .map(|uid| {
                    let own = units.get(uid).copied().unwrap_or(0.0);
                    (uid.clone(), amount.mul_ratio(own, total_units))
                })
                .collect()
        }
    }
}

fn split_equally(amount: Money, participants: &[MemberId]) -> Owed {
    let mut seen = BTreeSet::new();
    let unique: Vec<&MemberId> = participants
        .iter()
        .filter(|uid| seen.insert(*uid))
        .collect();
    let Some(first) = unique.first() else {
        return Owed::new();
    };

    let share = amount.div_rounded(unique.len() as i64);
    let mut owed: Owed = unique.iter().map(|uid| ((*uid).clone(), share)).collect();

    let allocated: Money = owed.values().sum();
    if let Some(first_share) = owed.get_mut(*first) {
        *first_share += amount - allocated;
    }
    owed
}
