use super::point::{Amount, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of a committed balance mutation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Charge,
    Use,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Charge => f.write_str("CHARGE"),
            TransactionKind::Use => f.write_str("USE"),
        }
    }
}

/// Immutable audit record of one committed charge or use.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PointHistory {
    /// Globally unique, monotonically increasing across all users.
    pub id: u64,
    pub user_id: UserId,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub occurred_at: DateTime<Utc>,
}
