use super::history::{PointHistory, TransactionKind};
use super::point::{Amount, UserId, UserPoint};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Current balance per user.
///
/// Implementations do no invariant checking and no per-user serialization;
/// the engine holds the user's lock around every read-modify-write.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Returns the stored balance, materializing and storing a zero balance
    /// for unseen users in a single atomic step.
    async fn read(&self, user_id: UserId) -> Result<UserPoint>;
    /// Overwrites the stored point value and refreshes its timestamp.
    async fn write(&self, user_id: UserId, point: u64) -> Result<UserPoint>;
    /// Every stored balance, ordered by user.
    async fn all(&self) -> Result<Vec<UserPoint>>;
    async fn clear(&self) -> Result<()>;
}

/// Append-only log of committed mutations.
#[async_trait]
pub trait HistoryLog: Send + Sync {
    async fn append(
        &self,
        user_id: UserId,
        amount: Amount,
        kind: TransactionKind,
        occurred_at: DateTime<Utc>,
    ) -> Result<PointHistory>;
    /// Entries for one user in append order; empty if the user has none.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<PointHistory>>;
    /// Every entry, ordered by sequence id.
    async fn all(&self) -> Result<Vec<PointHistory>>;
    async fn clear(&self) -> Result<()>;
}

pub type BalanceStoreBox = Box<dyn BalanceStore>;
pub type HistoryLogBox = Box<dyn HistoryLog>;
