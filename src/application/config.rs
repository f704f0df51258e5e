use crate::domain::point::MAX_BALANCE;
use std::time::Duration;

/// Tunables for [`PointEngine`](super::engine::PointEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Highest balance a charge may produce.
    pub max_balance: u64,
    /// How long a mutation waits for its user's lock. `None` waits forever.
    pub lock_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_balance: MAX_BALANCE,
            lock_timeout: None,
        }
    }
}

impl EngineConfig {
    pub fn with_max_balance(mut self, max_balance: u64) -> Self {
        self.max_balance = max_balance;
        self
    }

    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = Some(lock_timeout);
        self
    }
}
