use crate::error::WalletError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a wallet owner.
pub type UserId = u64;

/// Upper bound for any user's balance.
pub const MAX_BALANCE: u64 = 1_000_000;

/// Represents a strictly positive number of points to charge or use.
///
/// Requests carry signed integers so that zero and negative input can be
/// rejected here instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: i64) -> Result<Self, WalletError> {
        if value > 0 {
            Ok(Self(value.unsigned_abs()))
        } else {
            Err(WalletError::InvalidAmount(value))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = WalletError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// The current point balance of a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPoint {
    /// The owner of the balance.
    pub user_id: UserId,
    /// Points currently held, always within `0..=MAX_BALANCE` once committed.
    pub point: u64,
    /// When the balance was materialized or last written.
    pub updated_at: DateTime<Utc>,
}

impl UserPoint {
    /// A zero balance stamped with the current time.
    pub fn empty(user_id: UserId) -> Self {
        Self::new(user_id, 0)
    }

    pub fn new(user_id: UserId, point: u64) -> Self {
        Self {
            user_id,
            point,
            updated_at: Utc::now(),
        }
    }
}
