//! # Simulation Records
//!
//! Output of the step and bucket simulators. Records are built once per call
//! and handed to the caller read-only.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

/// Amounts consumed moving from the previous step to `tick_index`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub tick_index: i32,
    pub price: BigDecimal,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Amounts accumulated while the price traverses one tick array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecord {
    /// Address of the tick array account
    #[serde(with = "super::pubkey_serde")]
    pub tick_array: Pubkey,
    pub start_tick_index: i32,
    pub start_price: BigDecimal,
    /// Whether the array was loaded; amounts inside unknown arrays assume no
    /// liquidity changes
    pub is_known: bool,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Per-step records walking away from the current price
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSimulation {
    /// Price increasing, ordered by ascending tick
    pub upward: Vec<StepRecord>,
    /// Price decreasing, ordered by descending tick
    pub downward: Vec<StepRecord>,
}

/// Per-array totals walking away from the current price
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSimulation {
    /// Current array first, then arrays above it
    pub upward: Vec<BucketRecord>,
    /// Current array first, then arrays below it
    pub downward: Vec<BucketRecord>,
}

impl StepSimulation {
    /// Sum of `(amount_a, amount_b)` over the upward records
    pub fn upward_totals(&self) -> Option<(u64, u64)> {
        totals(self.upward.iter().map(|r| (r.amount_a, r.amount_b)))
    }

    /// Sum of `(amount_a, amount_b)` over the downward records
    pub fn downward_totals(&self) -> Option<(u64, u64)> {
        totals(self.downward.iter().map(|r| (r.amount_a, r.amount_b)))
    }
}

fn totals(amounts: impl Iterator<Item = (u64, u64)>) -> Option<(u64, u64)> {
    let mut sum = (0u64, 0u64);
    for (a, b) in amounts {
        sum.0 = sum.0.checked_add(a)?;
        sum.1 = sum.1.checked_add(b)?;
    }
    Some(sum)
}
