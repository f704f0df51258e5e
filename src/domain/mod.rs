//! Domain layer: point balances, history records, and the storage ports the
//! engine depends on.

pub mod history;
pub mod point;
pub mod ports;
