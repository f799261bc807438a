//! # Depth Core - Tradable Liquidity Simulation
//!
//! Computes how much of each token in a Whirlpool can be traded before the
//! price exhausts the liquidity found in the loaded tick arrays. It provides:
//!
//! - Pool, tick array and output record types
//! - Tick alignment and lookups across loaded tick arrays
//! - A per-step simulator and a per-tick-array simulator
//! - Decoding of Whirlpool and TickArray account data
//! - Derivation of the tick array window around the current price
//!
//! Fixed-point conversions are delegated to `orca_whirlpools_core` through
//! the [`LiquidityMath`] trait.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod math;
pub mod simulation;
pub mod types;
pub mod window;

// Re-export commonly used items
pub use constants::*;
pub use errors::{DepthError, DepthResult};
pub use math::{LiquidityMath, TickLookup, UnknownTickPolicy, WhirlpoolMath};
pub use simulation::{simulate_buckets, simulate_steps};
pub use types::*;
pub use window::TickArrayWindow;
