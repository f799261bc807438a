//! # Pool Types
//!
//! Read-only snapshots of a Whirlpool and the tick arrays around its price.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TICK_INDEX, MIN_TICK_INDEX, TICK_ARRAY_SIZE};
use crate::errors::{DepthError, DepthResult};

/// Price and liquidity state of a pool at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Granularity of initializable ticks
    pub tick_spacing: u16,
    /// Tick at or immediately below the current price
    pub tick_current_index: i32,
    /// Q64.64 square root of the current price
    pub sqrt_price: u128,
    /// Liquidity active at the current price
    pub liquidity: u128,
}

/// Global tick range a traversal may not leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickBounds {
    pub min_tick_index: i32,
    pub max_tick_index: i32,
}

impl TickBounds {
    pub fn new(min_tick_index: i32, max_tick_index: i32) -> DepthResult<Self> {
        let bounds = Self {
            min_tick_index,
            max_tick_index,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> DepthResult<()> {
        if self.min_tick_index >= self.max_tick_index {
            return Err(DepthError::InvalidBounds {
                min: self.min_tick_index,
                max: self.max_tick_index,
            });
        }
        Ok(())
    }

    /// Nearest tick inside the bounds
    pub fn clamp(&self, tick_index: i32) -> i32 {
        tick_index.clamp(self.min_tick_index, self.max_tick_index)
    }
}

impl Default for TickBounds {
    fn default() -> Self {
        Self {
            min_tick_index: MIN_TICK_INDEX,
            max_tick_index: MAX_TICK_INDEX,
        }
    }
}

/// Liquidity data stored for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Liquidity added when the price crosses this tick moving up
    pub liquidity_net: i128,
    pub initialized: bool,
}

impl TickRecord {
    /// Record assumed for a slot the array does not carry
    pub const fn implicit() -> Self {
        Self {
            liquidity_net: 0,
            initialized: true,
        }
    }
}

/// One loaded tick array
///
/// `ticks[i]` describes tick `start_tick_index + i * tick_spacing`. Slots past
/// the end of `ticks` are treated as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickBucket {
    pub start_tick_index: i32,
    #[serde(default)]
    pub ticks: Vec<TickRecord>,
}

impl TickBucket {
    pub fn new(start_tick_index: i32, ticks: Vec<TickRecord>) -> Self {
        Self {
            start_tick_index,
            ticks,
        }
    }

    /// A loaded array with no liquidity changes in any slot
    pub fn empty(start_tick_index: i32) -> Self {
        Self::new(start_tick_index, Vec::new())
    }

    /// Tick record for `tick_index`, falling back to the implicit zero-net record
    /// for unaligned indexes and missing slots
    pub fn tick(&self, tick_index: i32, tick_spacing: u16) -> TickRecord {
        let spacing = tick_spacing as i32;
        let offset = tick_index - self.start_tick_index;
        if spacing == 0 || offset < 0 || offset % spacing != 0 {
            return TickRecord::implicit();
        }

        let slot = offset / spacing;
        if slot >= TICK_ARRAY_SIZE {
            return TickRecord::implicit();
        }

        self.ticks
            .get(slot as usize)
            .copied()
            .unwrap_or_else(TickRecord::implicit)
    }
}

/// Loaded tick arrays keyed by start tick index
///
/// Arrays missing from the set are unknown, which is distinct from an array
/// that is loaded but empty.
#[derive(Debug, Clone, Default)]
pub struct TickBucketSet {
    buckets: AHashMap<i32, TickBucket>,
}

impl TickBucketSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an array, replacing any array with the same start index
    pub fn insert(&mut self, bucket: TickBucket) {
        self.buckets.insert(bucket.start_tick_index, bucket);
    }

    pub fn get(&self, start_tick_index: i32) -> Option<&TickBucket> {
        self.buckets.get(&start_tick_index)
    }

    pub fn contains(&self, start_tick_index: i32) -> bool {
        self.buckets.contains_key(&start_tick_index)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl FromIterator<TickBucket> for TickBucketSet {
    fn from_iter<I: IntoIterator<Item = TickBucket>>(iter: I) -> Self {
        let mut set = Self::new();
        for bucket in iter {
            set.insert(bucket);
        }
        set
    }
}
