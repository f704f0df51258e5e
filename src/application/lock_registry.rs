use crate::domain::point::UserId;
use crate::error::{Result, WalletError};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Exclusive-access primitive guarding one user's balance.
pub type UserLock = Arc<Mutex<()>>;

/// Maps each user to the lock serializing that user's mutations.
///
/// Locks are created on first use and never removed, so the registry grows
/// with the number of distinct users seen during the process lifetime.
#[derive(Default)]
pub struct UserLockRegistry {
    locks: DashMap<UserId, UserLock>,
}

impl UserLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `user_id`, registering a new one if absent.
    ///
    /// Creation goes through the map's entry API, so concurrent first
    /// acquisitions for the same user always observe the same instance.
    /// The shard guard is dropped before returning; callers never await
    /// while holding it.
    pub fn acquire(&self, user_id: UserId) -> UserLock {
        self.locks.entry(user_id).or_default().value().clone()
    }

    /// Acquires and locks the user's lock, giving up after `timeout` if set.
    pub async fn lock(
        &self,
        user_id: UserId,
        timeout: Option<Duration>,
    ) -> Result<OwnedMutexGuard<()>> {
        let lock = self.acquire(user_id);
        match timeout {
            Some(limit) => tokio::time::timeout(limit, lock.lock_owned())
                .await
                .map_err(|_| WalletError::LockTimeout(user_id)),
            None => Ok(lock.lock_owned().await),
        }
    }

    /// Number of distinct users that have a registered lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
