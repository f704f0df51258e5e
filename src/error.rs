use crate::domain::point::UserId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("invalid amount {0}: amount must be a positive integer")]
    InvalidAmount(i64),
    #[error("charge of {requested} would exceed the maximum balance of {max} (current: {current})")]
    MaxBalanceExceeded {
        current: u64,
        requested: u64,
        max: u64,
    },
    #[error("insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance { available: u64, requested: u64 },
    #[error("timed out waiting for the lock of user {0}")]
    LockTimeout(UserId),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl WalletError {
    /// Domain rejections that leave balance and history untouched.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::MaxBalanceExceeded { .. }
                | Self::InsufficientBalance { .. }
                | Self::LockTimeout(_)
        )
    }

    /// Only lock contention is worth retrying; every other rejection would fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout(_))
    }
}

pub type Result<T, E = WalletError> = std::result::Result<T, E>;
