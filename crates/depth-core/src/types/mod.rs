//! # Core Type Definitions
//!
//! Pool snapshots, tick arrays and the records produced by the simulators.

pub mod pool;
pub mod pubkey_serde;
pub mod records;

// Re-export all types
pub use pool::*;
pub use records::*;
