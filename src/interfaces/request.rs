use crate::application::engine::PointEngine;
use crate::domain::point::{UserId, UserPoint};
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Charge,
    Use,
}

/// A single charge or use request as submitted by a caller.
///
/// `amount` is signed on purpose; validation happens in the engine.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct PointRequest {
    pub r#type: RequestKind,
    pub user: UserId,
    pub amount: i64,
}

impl PointRequest {
    /// Runs the request against `engine`, returning the updated balance.
    pub async fn execute(&self, engine: &PointEngine) -> Result<UserPoint> {
        match self.r#type {
            RequestKind::Charge => engine.charge(self.user, self.amount).await,
            RequestKind::Use => engine.use_points(self.user, self.amount).await,
        }
    }
}
