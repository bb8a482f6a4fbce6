//! Settlements: out-of-band payments between two members, recorded after the
//! fact so they cancel part of the debt between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MemberId, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from_user: MemberId,
    pub to_user: MemberId,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(
        from_user: MemberId,
        to_user: MemberId,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "settlement amount must be > 0".to_string(),
            ));
        }
        if from_user == to_user {
            return Err(EngineError::InvalidSettlement(format!(
                "'{from_user}' cannot settle with themselves"
            )));
        }
        Ok(Self {
            from_user,
            to_user,
            amount,
            created_at,
        })
    }
}
