//! # Tradable Liquidity Simulation
//!
//! Walks the liquidity curve outward from the current price and reports how
//! much of each token can be traded before the price reaches a given tick or
//! tick array.
//!
//! - [`simulate_steps`]: a bounded number of initializable steps per direction,
//!   stopping at the edge of loaded data.
//! - [`simulate_buckets`]: every step across a window of tick arrays, totalled
//!   per array, zero-filling arrays that were not loaded.

mod buckets;
mod cursor;
mod steps;

pub use buckets::simulate_buckets;
pub use cursor::Direction;
pub use steps::simulate_steps;
