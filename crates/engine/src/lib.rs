//! Balance and debt computation for expense-sharing groups.
//!
//! The engine is a set of pure functions over in-memory events:
//!
//! - [`resolve_split`] divides one expense among its participants.
//! - [`compute_balances`] folds expenses, pool contributions and settlements
//!   into per-member [`BalanceSummary`]s.
//! - [`compute_debts`] reduces balances to the transfers that settle them.
//!
//! [`GroupSnapshot::summarize`] runs all of them for a group. Nothing is
//! cached or persisted: callers re-run the computation on every new snapshot.

pub use balances::{Account, BalanceSummary, Ledger, compute_balances};
pub use debts::{Debt, SETTLED_THRESHOLD, compute_debts};
pub use error::EngineError;
pub use expenses::{EDIT_WINDOW_HOURS, Expense, POOL_SENTINEL, Payer};
pub use group::{GroupMode, GroupSnapshot, GroupSummary};
pub use members::{Member, MemberId};
pub use money::Money;
pub use pool::{PoolContribution, PoolStatus};
pub use settlements::Settlement;
pub use split::{Owed, SplitDiscrepancy, SplitRule, SplitType, resolve_split};

mod balances;
mod debts;
mod error;
mod expenses;
mod group;
mod members;
mod money;
mod pool;
mod settlements;
mod split;

type ResultEngine<T> = Result<T, EngineError>;
