//! # Pool Report
//!
//! Runs both simulators over a snapshot and collects their output. A failing
//! simulator only marks its own section as failed.

use bigdecimal::BigDecimal;
use depth_core::math::sqrt_price_to_price;
use depth_core::types::pubkey_serde;
use depth_core::{
    simulate_buckets, simulate_steps, BucketRecord, BucketSimulation, DepthResult, LiquidityMath,
    StepRecord, StepSimulation, TickArrayWindow,
};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::config::InspectorConfig;
use crate::snapshot::PoolSnapshot;

/// Output of one simulator, or the reason it could not run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tradable<R> {
    pub upward: Vec<R>,
    pub downward: Vec<R>,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<R> Tradable<R> {
    pub fn new(upward: Vec<R>, downward: Vec<R>) -> Self {
        Self {
            upward,
            downward,
            error: false,
            error_message: None,
        }
    }

    /// Empty section flagged as failed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            upward: Vec::new(),
            downward: Vec::new(),
            error: true,
            error_message: Some(message.into()),
        }
    }
}

impl From<StepSimulation> for Tradable<StepRecord> {
    fn from(simulation: StepSimulation) -> Self {
        Self::new(simulation.upward, simulation.downward)
    }
}

impl From<BucketSimulation> for Tradable<BucketRecord> {
    fn from(simulation: BucketSimulation) -> Self {
        Self::new(simulation.upward, simulation.downward)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolReport {
    #[serde(with = "pubkey_serde")]
    pub whirlpool: Pubkey,
    pub tick_current_index: i32,
    pub tick_spacing: u16,
    /// Current price of token A in token B
    pub current_price: BigDecimal,
    pub steps: Tradable<StepRecord>,
    pub tick_arrays: Tradable<BucketRecord>,
}

/// Simulate tradable liquidity on both sides of the snapshot's current price
pub fn inspect_pool<M: LiquidityMath + ?Sized>(
    snapshot: &PoolSnapshot,
    config: &InspectorConfig,
    math: &M,
) -> PoolReport {
    let pool = &snapshot.pool;
    let known = snapshot.known_tick_arrays();

    log::debug!(
        "Inspecting {} at tick {} with {} loaded tick arrays",
        snapshot.whirlpool,
        pool.tick_current_index,
        known.len()
    );

    let steps = simulate_steps(
        pool,
        &known,
        snapshot.decimals_a,
        snapshot.decimals_b,
        config.max_steps,
        config.tick_bounds(),
        math,
    );

    let buckets = TickArrayWindow::around(
        &snapshot.whirlpool,
        &config.program_id,
        pool.tick_current_index,
        pool.tick_spacing,
        config.window_radius,
        config.tick_bounds(),
    )
    .and_then(|window| {
        simulate_buckets(
            pool,
            &window.start_indexes,
            &window.addresses,
            &known,
            snapshot.decimals_a,
            snapshot.decimals_b,
            config.tick_bounds(),
            math,
        )
    });

    PoolReport {
        whirlpool: snapshot.whirlpool,
        tick_current_index: pool.tick_current_index,
        tick_spacing: pool.tick_spacing,
        current_price: sqrt_price_to_price(
            pool.sqrt_price,
            snapshot.decimals_a,
            snapshot.decimals_b,
        ),
        steps: section("per-step", &snapshot.whirlpool, steps),
        tick_arrays: section("per-tick-array", &snapshot.whirlpool, buckets),
    }
}

fn section<S, R>(name: &str, whirlpool: &Pubkey, result: DepthResult<S>) -> Tradable<R>
where
    S: Into<Tradable<R>>,
{
    match result {
        Ok(simulation) => simulation.into(),
        Err(e) => {
            log::warn!("{} simulation failed for {}: {}", name, whirlpool, e);
            Tradable::failed(e.to_string())
        }
    }
}
