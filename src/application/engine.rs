use super::config::EngineConfig;
use super::lock_registry::UserLockRegistry;
use crate::domain::history::{PointHistory, TransactionKind};
use crate::domain::point::{Amount, UserId, UserPoint};
use crate::domain::ports::{BalanceStore, BalanceStoreBox, HistoryLog, HistoryLogBox};
use crate::error::{Result, WalletError};
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, error};

/// The entry point for charging and using points.
///
/// `PointEngine` owns the storage backends and a per-user lock registry.
/// Every mutation runs its read, invariant check, balance write, and history
/// append while holding the target user's lock, so mutations for one user
/// are linearized and each committed change is paired with exactly one
/// history entry. Mutations for different users never wait on each other.
///
/// Once a mutation is admitted it runs on its own task, so dropping the
/// caller's future only abandons the wait for the result.
pub struct PointEngine {
    balances: Arc<dyn BalanceStore>,
    history: Arc<dyn HistoryLog>,
    locks: UserLockRegistry,
    config: EngineConfig,
}

impl PointEngine {
    /// Creates a new `PointEngine` with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `balances` - The store for current user balances.
    /// * `history` - The log receiving one entry per committed mutation.
    pub fn new(balances: BalanceStoreBox, history: HistoryLogBox) -> Self {
        Self::with_config(balances, history, EngineConfig::default())
    }

    pub fn with_config(
        balances: BalanceStoreBox,
        history: HistoryLogBox,
        config: EngineConfig,
    ) -> Self {
        Self {
            balances: Arc::from(balances),
            history: Arc::from(history),
            locks: UserLockRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lock_registry(&self) -> &UserLockRegistry {
        &self.locks
    }

    /// Returns the latest committed balance without taking the user's lock.
    pub async fn balance(&self, user_id: UserId) -> Result<UserPoint> {
        self.balances.read(user_id).await
    }

    /// Returns the user's history in commit order.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<PointHistory>> {
        self.history.list_by_user(user_id).await
    }

    /// Every known balance, ordered by user.
    pub async fn balances(&self) -> Result<Vec<UserPoint>> {
        self.balances.all().await
    }

    /// Every history entry across users, ordered by sequence id.
    pub async fn all_history(&self) -> Result<Vec<PointHistory>> {
        self.history.all().await
    }

    /// Adds `amount` points to the user's balance.
    ///
    /// Fails with `InvalidAmount` before locking if `amount` is not positive,
    /// and with `MaxBalanceExceeded` if the result would pass the configured
    /// cap. Rejections change neither balance nor history.
    pub async fn charge(&self, user_id: UserId, amount: i64) -> Result<UserPoint> {
        let amount = Amount::new(amount)?;
        let guard = self.locks.lock(user_id, self.config.lock_timeout).await?;
        self.run_admitted(guard, user_id, amount, TransactionKind::Charge)
            .await
    }

    /// Removes `amount` points from the user's balance.
    ///
    /// Fails with `InvalidAmount` before locking if `amount` is not positive,
    /// and with `InsufficientBalance` if the user holds fewer points.
    pub async fn use_points(&self, user_id: UserId, amount: i64) -> Result<UserPoint> {
        let amount = Amount::new(amount)?;
        let guard = self.locks.lock(user_id, self.config.lock_timeout).await?;
        self.run_admitted(guard, user_id, amount, TransactionKind::Use)
            .await
    }

    // The spawned task owns the guard; the lock is released when it finishes.
    async fn run_admitted(
        &self,
        guard: OwnedMutexGuard<()>,
        user_id: UserId,
        amount: Amount,
        kind: TransactionKind,
    ) -> Result<UserPoint> {
        let balances = Arc::clone(&self.balances);
        let history = Arc::clone(&self.history);
        let max_balance = self.config.max_balance;

        let task = tokio::spawn(async move {
            let _guard = guard;
            apply(
                balances.as_ref(),
                history.as_ref(),
                user_id,
                amount,
                kind,
                max_balance,
            )
            .await
        });

        task.await
            .map_err(|e| WalletError::InternalError(format!("mutation task failed: {e}")))?
    }
}

// Caller must hold the user's lock.
async fn apply(
    balances: &dyn BalanceStore,
    history: &dyn HistoryLog,
    user_id: UserId,
    amount: Amount,
    kind: TransactionKind,
    max_balance: u64,
) -> Result<UserPoint> {
    let current = balances.read(user_id).await?;
    let new_point = match kind {
        TransactionKind::Charge => current
            .point
            .checked_add(amount.value())
            .filter(|point| *point <= max_balance)
            .ok_or(WalletError::MaxBalanceExceeded {
                current: current.point,
                requested: amount.value(),
                max: max_balance,
            })?,
        TransactionKind::Use => {
            current
                .point
                .checked_sub(amount.value())
                .ok_or(WalletError::InsufficientBalance {
                    available: current.point,
                    requested: amount.value(),
                })?
        }
    };

    let updated = balances.write(user_id, new_point).await?;
    match history
        .append(user_id, amount, kind, updated.updated_at)
        .await
    {
        Ok(entry) => {
            debug!(
                user_id,
                history_id = entry.id,
                %kind,
                amount = amount.value(),
                point = updated.point,
                "point mutation committed"
            );
            Ok(updated)
        }
        Err(err) => {
            error!(user_id, %kind, error = %err, "history append failed, restoring balance");
            if let Err(restore_err) = balances.write(user_id, current.point).await {
                error!(
                    user_id,
                    point = current.point,
                    error = %restore_err,
                    "balance restore failed"
                );
            }
            Err(err)
        }
    }
}
