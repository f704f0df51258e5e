//! Application layer containing the balance mutation orchestration.
//!
//! This module defines the `PointEngine`, the primary entry point for
//! charging and using points. Mutations for one user are serialized through
//! a per-user lock from the `UserLockRegistry` while different users proceed
//! in parallel on the tokio runtime.

pub mod config;
pub mod engine;
pub mod lock_registry;
