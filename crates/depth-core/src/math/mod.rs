//! # Mathematical Functions
//!
//! Tick alignment, tick lookups and the liquidity math seam.

pub mod liquidity_math;
pub mod tick_math;

// Re-export commonly used functions
pub use liquidity_math::*;
pub use tick_math::*;
