use crate::domain::history::{PointHistory, TransactionKind};
use crate::domain::point::{Amount, UserId, UserPoint};
use crate::domain::ports::{BalanceStore, HistoryLog};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

async fn simulate_latency(latency: Option<Duration>) {
    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
}

/// A thread-safe in-memory store for user balances.
///
/// Uses a sharded `DashMap` so writes for different users do not contend.
/// Contents live for the lifetime of the process only.
#[derive(Default, Clone)]
pub struct InMemoryBalanceStore {
    balances: Arc<DashMap<UserId, UserPoint>>,
    latency: Option<Duration>,
}

impl InMemoryBalanceStore {
    /// Creates a new, empty in-memory balance store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every operation by `latency`, widening race windows in tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }
}

#[async_trait]
impl BalanceStore for InMemoryBalanceStore {
    async fn read(&self, user_id: UserId) -> Result<UserPoint> {
        simulate_latency(self.latency).await;
        let point = self
            .balances
            .entry(user_id)
            .or_insert_with(|| UserPoint::empty(user_id))
            .clone();
        Ok(point)
    }

    async fn write(&self, user_id: UserId, point: u64) -> Result<UserPoint> {
        simulate_latency(self.latency).await;
        let updated = UserPoint::new(user_id, point);
        self.balances.insert(user_id, updated.clone());
        Ok(updated)
    }

    async fn all(&self) -> Result<Vec<UserPoint>> {
        let mut balances: Vec<UserPoint> = self
            .balances
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        balances.sort_by_key(|point| point.user_id);
        Ok(balances)
    }

    async fn clear(&self) -> Result<()> {
        self.balances.clear();
        Ok(())
    }
}

/// A thread-safe in-memory, append-only history log.
///
/// Sequence ids come from a single atomic counter shared by all users;
/// per-user entry lists are only appended to under that user's engine lock.
#[derive(Default, Clone)]
pub struct InMemoryHistoryLog {
    entries: Arc<DashMap<UserId, Vec<PointHistory>>>,
    sequence: Arc<AtomicU64>,
    latency: Option<Duration>,
}

impl InMemoryHistoryLog {
    /// Creates a new, empty in-memory history log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every append by `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }
}

#[async_trait]
impl HistoryLog for InMemoryHistoryLog {
    async fn append(
        &self,
        user_id: UserId,
        amount: Amount,
        kind: TransactionKind,
        occurred_at: DateTime<Utc>,
    ) -> Result<PointHistory> {
        simulate_latency(self.latency).await;
        let entry = PointHistory {
            id: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            user_id,
            amount,
            kind,
            occurred_at,
        };
        self.entries.entry(user_id).or_default().push(entry.clone());
        Ok(entry)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<PointHistory>> {
        Ok(self
            .entries
            .get(&user_id)
            .map(|entries| entries.value().clone())
            .unwrap_or_default())
    }

    async fn all(&self) -> Result<Vec<PointHistory>> {
        let mut entries: Vec<PointHistory> = self
            .entries
            .iter()
            .flat_map(|entries| entries.value().clone())
            .collect();
        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }

    async fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}
