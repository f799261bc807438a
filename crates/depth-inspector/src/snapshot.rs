//! # Pool Snapshot
//!
//! JSON description of a pool and whichever of its tick arrays were fetched.
//! The pool and its tick arrays may be given decoded, or as the base64 account
//! data returned by `getAccountInfo`. Tick arrays absent from the snapshot are
//! treated as not loaded.

use std::fs;

use base64::Engine;
use depth_core::accounts::{decode_tick_array, decode_whirlpool};
use depth_core::math::ticks_per_array;
use depth_core::types::pubkey_serde;
use depth_core::{PoolState, TickBucket, TickBucketSet, TICK_ARRAY_SIZE};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::error::{InspectorError, InspectorResult};

/// Pool state and loaded tick arrays ready for simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSnapshot {
    /// Whirlpool account address
    #[serde(with = "pubkey_serde")]
    pub whirlpool: Pubkey,

    pub pool: PoolState,

    pub decimals_a: u8,
    pub decimals_b: u8,

    /// Tick arrays that were available when the snapshot was taken
    pub tick_arrays: Vec<TickBucket>,
}

/// Snapshot file as written by the fetcher
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(with = "pubkey_serde")]
    whirlpool: Pubkey,

    #[serde(default)]
    pool: Option<PoolState>,

    /// Base64 Whirlpool account data, used when `pool` is absent
    #[serde(default)]
    whirlpool_data: Option<String>,

    decimals_a: u8,
    decimals_b: u8,

    #[serde(default)]
    tick_arrays: Vec<TickBucket>,

    /// Base64 TickArray account data
    #[serde(default)]
    tick_array_data: Vec<String>,
}

impl PoolSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &str) -> InspectorResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InspectorError::IoError(format!("Failed to read snapshot {}: {}", path, e))
        })?;
        Self::from_json(&content)
    }

    /// Parse, decode and validate a snapshot
    pub fn from_json(content: &str) -> InspectorResult<Self> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        let snapshot = file.resolve()?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> InspectorResult<()> {
        if self.pool.tick_spacing == 0 {
            return Err(InspectorError::InvalidSnapshot("tick_spacing is zero".to_string()));
        }

        let ticks_per_array = ticks_per_array(self.pool.tick_spacing);
        for array in &self.tick_arrays {
            if array.start_tick_index % ticks_per_array != 0 {
                return Err(InspectorError::InvalidSnapshot(format!(
                    "tick array start {} is not a multiple of {}",
                    array.start_tick_index, ticks_per_array
                )));
            }
            if array.ticks.len() > TICK_ARRAY_SIZE as usize {
                return Err(InspectorError::InvalidSnapshot(format!(
                    "tick array {} has {} ticks",
                    array.start_tick_index,
                    array.ticks.len()
                )));
            }
        }

        Ok(())
    }

    /// Loaded tick arrays keyed by start index
    pub fn known_tick_arrays(&self) -> TickBucketSet {
        self.tick_arrays.iter().cloned().collect()
    }
}

impl SnapshotFile {
    /// Decode raw account data into a snapshot
    fn resolve(self) -> InspectorResult<PoolSnapshot> {
        let pool = match (self.pool, &self.whirlpool_data) {
            (Some(pool), None) => pool,
            (None, Some(data)) => decode_whirlpool(&decode_base64("whirlpool_data", data)?)?.pool,
            (Some(_), Some(_)) => {
                return Err(InspectorError::InvalidSnapshot(
                    "both pool and whirlpool_data are set".to_string(),
                ))
            }
            (None, None) => {
                return Err(InspectorError::InvalidSnapshot(
                    "one of pool or whirlpool_data is required".to_string(),
                ))
            }
        };

        let mut tick_arrays = self.tick_arrays;
        for data in &self.tick_array_data {
            let bytes = decode_base64("tick_array_data", data)?;
            tick_arrays.push(decode_tick_array(&bytes, pool.tick_spacing)?);
        }

        log::debug!(
            "Resolved snapshot for {}: {} decoded tick arrays",
            self.whirlpool,
            self.tick_array_data.len()
        );

        Ok(PoolSnapshot {
            whirlpool: self.whirlpool,
            pool,
            decimals_a: self.decimals_a,
            decimals_b: self.decimals_b,
            tick_arrays,
        })
    }
}

fn decode_base64(field: &str, data: &str) -> InspectorResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| InspectorError::InvalidSnapshot(format!("{} is not base64: {}", field, e)))
}
