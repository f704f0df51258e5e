//! Adapters between external request formats and the engine.

pub mod csv;
pub mod request;
