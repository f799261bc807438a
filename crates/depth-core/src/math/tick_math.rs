//! # Tick Math
//!
//! Tick alignment and tick lookups across loaded tick arrays. All tick array
//! alignment arithmetic lives here.

use serde::{Deserialize, Serialize};

use crate::constants::TICK_ARRAY_SIZE;
use crate::types::{TickBucketSet, TickRecord};

/// Result of looking up a tick in the loaded arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickLookup {
    /// The containing array is loaded
    Known(TickRecord),
    /// The containing array was not loaded
    Unknown,
}

/// How a traversal treats ticks inside arrays that were not loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownTickPolicy {
    /// Stop walking at the edge of loaded data
    StopOnUnknown,
    /// Treat the tick as carrying no liquidity change and keep walking
    ZeroFillUnknown,
}

impl UnknownTickPolicy {
    /// Liquidity net to apply when crossing a looked-up tick, or `None` when the
    /// traversal has to stop
    pub fn resolve_liquidity_net(self, lookup: TickLookup) -> Option<i128> {
        match (lookup, self) {
            (TickLookup::Known(tick), _) => Some(tick.liquidity_net),
            (TickLookup::Unknown, UnknownTickPolicy::ZeroFillUnknown) => Some(0),
            (TickLookup::Unknown, UnknownTickPolicy::StopOnUnknown) => None,
        }
    }
}

/// Number of ticks covered by one tick array
pub fn ticks_per_array(tick_spacing: u16) -> i32 {
    TICK_ARRAY_SIZE * tick_spacing as i32
}

/// Start tick index of the array containing `tick_index`
pub fn tick_array_start_index(tick_index: i32, tick_spacing: u16) -> i32 {
    let ticks_per_array = ticks_per_array(tick_spacing);
    tick_index.div_euclid(ticks_per_array) * ticks_per_array
}

/// Greatest initializable tick at or below `tick_index`
pub fn lower_initializable_tick(tick_index: i32, tick_spacing: u16) -> i32 {
    let spacing = tick_spacing as i32;
    tick_index.div_euclid(spacing) * spacing
}

/// Look up `tick_index` in the loaded arrays
pub fn lookup_tick(tick_index: i32, tick_spacing: u16, known: &TickBucketSet) -> TickLookup {
    let start_tick_index = tick_array_start_index(tick_index, tick_spacing);
    match known.get(start_tick_index) {
        Some(bucket) => TickLookup::Known(bucket.tick(tick_index, tick_spacing)),
        None => TickLookup::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TickBucket;

    #[test]
    fn test_tick_array_start_index() {
        assert_eq!(ticks_per_array(64), 5632);

        assert_eq!(tick_array_start_index(0, 64), 0);
        assert_eq!(tick_array_start_index(1000, 64), 0);
        assert_eq!(tick_array_start_index(5631, 64), 0);
        assert_eq!(tick_array_start_index(5632, 64), 5632);

        // Floor alignment below zero
        assert_eq!(tick_array_start_index(-1, 64), -5632);
        assert_eq!(tick_array_start_index(-5632, 64), -5632);
        assert_eq!(tick_array_start_index(-5633, 64), -11264);

        assert_eq!(tick_array_start_index(87, 1), 0);
        assert_eq!(tick_array_start_index(88, 1), 88);
    }

    #[test]
    fn test_lower_initializable_tick() {
        assert_eq!(lower_initializable_tick(1000, 64), 960);
        assert_eq!(lower_initializable_tick(960, 64), 960);
        assert_eq!(lower_initializable_tick(-1, 64), -64);
        assert_eq!(lower_initializable_tick(-64, 64), -64);
        assert_eq!(lower_initializable_tick(-65, 64), -128);
    }

    #[test]
    fn test_lookup_tick() {
        let mut ticks = vec![TickRecord::default(); 88];
        ticks[1] = TickRecord {
            liquidity_net: 42,
            initialized: true,
        };
        let known: TickBucketSet = vec![TickBucket::new(-5632, ticks)].into_iter().collect();

        assert_eq!(
            lookup_tick(-5568, 64, &known),
            TickLookup::Known(TickRecord {
                liquidity_net: 42,
                initialized: true
            })
        );
        assert_eq!(lookup_tick(-64, 64, &known), TickLookup::Known(TickRecord::default()));
        assert_eq!(lookup_tick(0, 64, &known), TickLookup::Unknown);
        assert_eq!(lookup_tick(-5633, 64, &known), TickLookup::Unknown);
    }

    #[test]
    fn test_unknown_tick_policies() {
        let known = TickLookup::Known(TickRecord {
            liquidity_net: -7,
            initialized: true,
        });

        assert_eq!(UnknownTickPolicy::StopOnUnknown.resolve_liquidity_net(known), Some(-7));
        assert_eq!(UnknownTickPolicy::ZeroFillUnknown.resolve_liquidity_net(known), Some(-7));
        assert_eq!(
            UnknownTickPolicy::StopOnUnknown.resolve_liquidity_net(TickLookup::Unknown),
            None
        );
        assert_eq!(
            UnknownTickPolicy::ZeroFillUnknown.resolve_liquidity_net(TickLookup::Unknown),
            Some(0)
        );
    }
}
