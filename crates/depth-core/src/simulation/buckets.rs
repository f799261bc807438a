//! Per-bucket simulator.
//!
//! Walks every initializable tick across a window of tick arrays and totals
//! the amounts per array. Ticks inside arrays that were not loaded carry no
//! liquidity change, so every array in the window always gets a record.

use solana_program::pubkey::Pubkey;

use crate::errors::{DepthError, DepthResult};
use crate::math::{
    lookup_tick, lower_initializable_tick, tick_array_start_index, ticks_per_array, LiquidityMath,
    UnknownTickPolicy,
};
use crate::types::{BucketRecord, BucketSimulation, PoolState, TickBounds, TickBucketSet};

use super::cursor::{Direction, PriceCursor};

const POLICY: UnknownTickPolicy = UnknownTickPolicy::ZeroFillUnknown;

/// Total the tradable amounts per tick array over a contiguous window
///
/// `bucket_start_indexes` must be ascending, contiguous and contain the array
/// holding the current tick; `bucket_refs[i]` is the account address of the
/// array starting at `bucket_start_indexes[i]`.
#[allow(clippy::too_many_arguments)]
pub fn simulate_buckets<M: LiquidityMath + ?Sized>(
    pool: &PoolState,
    bucket_start_indexes: &[i32],
    bucket_refs: &[Pubkey],
    known: &TickBucketSet,
    decimals_a: u8,
    decimals_b: u8,
    bounds: TickBounds,
    math: &M,
) -> DepthResult<BucketSimulation> {
    if pool.tick_spacing == 0 {
        return Err(DepthError::InvalidTickSpacing(pool.tick_spacing));
    }
    bounds.validate()?;
    validate_window(bucket_start_indexes, bucket_refs, pool.tick_spacing)?;

    let current_start = tick_array_start_index(pool.tick_current_index, pool.tick_spacing);
    let current = bucket_start_indexes
        .iter()
        .position(|&start| start == current_start)
        .ok_or(DepthError::CurrentArrayNotInWindow(current_start))?;

    let upward_window: Vec<usize> = (current..bucket_start_indexes.len()).collect();
    let downward_window: Vec<usize> = (0..=current).rev().collect();

    let walk = BucketWalk {
        pool,
        starts: bucket_start_indexes,
        known,
        bounds,
        math,
    };
    let upward_totals = walk.upward(upward_window.len())?;
    let downward_totals = walk.downward(downward_window.len())?;

    let records = |window: &[usize], totals: &[(u64, u64)]| -> DepthResult<Vec<BucketRecord>> {
        window
            .iter()
            .zip(totals)
            .map(|(&i, &(amount_a, amount_b))| {
                let start_tick_index = bucket_start_indexes[i];
                Ok(BucketRecord {
                    tick_array: bucket_refs[i],
                    start_tick_index,
                    start_price: math.tick_index_to_price(
                        bounds.clamp(start_tick_index),
                        decimals_a,
                        decimals_b,
                    )?,
                    is_known: known.contains(start_tick_index),
                    amount_a,
                    amount_b,
                })
            })
            .collect()
    };

    Ok(BucketSimulation {
        upward: records(&upward_window, &upward_totals)?,
        downward: records(&downward_window, &downward_totals)?,
    })
}

/// Check that the window is non-empty, aligned, ascending and contiguous
fn validate_window(starts: &[i32], refs: &[Pubkey], tick_spacing: u16) -> DepthResult<()> {
    if starts.is_empty() {
        return Err(DepthError::invalid_window("no tick arrays supplied"));
    }
    if starts.len() != refs.len() {
        return Err(DepthError::invalid_window(format!(
            "{} start indexes but {} account addresses",
            starts.len(),
            refs.len()
        )));
    }

    let ticks_per_array = ticks_per_array(tick_spacing);
    if let Some(start) = starts.iter().find(|&&s| s % ticks_per_array != 0) {
        return Err(DepthError::invalid_window(format!(
            "start index {} is not a multiple of {}",
            start, ticks_per_array
        )));
    }
    for pair in starts.windows(2) {
        if pair[0].checked_add(ticks_per_array) != Some(pair[1]) {
            return Err(DepthError::invalid_window(format!(
                "start index {} does not follow {}",
                pair[1], pair[0]
            )));
        }
    }
    Ok(())
}

struct BucketWalk<'a, M: ?Sized> {
    pool: &'a PoolState,
    starts: &'a [i32],
    known: &'a TickBucketSet,
    bounds: TickBounds,
    math: &'a M,
}

impl<M: LiquidityMath + ?Sized> BucketWalk<'_, M> {
    /// Totals for the current array and every array above it
    fn upward(&self, window_len: usize) -> DepthResult<Vec<(u64, u64)>> {
        let spacing = self.pool.tick_spacing as i32;
        let ticks_per_array = ticks_per_array(self.pool.tick_spacing);
        let last_start = self.starts[self.starts.len() - 1];
        let end = last_start
            .saturating_add(ticks_per_array)
            .min(self.bounds.max_tick_index);

        let mut totals = vec![(0u64, 0u64); window_len];
        let mut slot = 0usize;
        let mut cursor = PriceCursor::at_pool(self.pool);
        let mut candidate =
            lower_initializable_tick(self.pool.tick_current_index, self.pool.tick_spacing)
                + spacing;

        while candidate <= end {
            let liquidity_net = self.liquidity_net_at(candidate);
            let sqrt_price = self.math.tick_index_to_sqrt_price(candidate)?;
            let amounts = cursor.amounts_to(Direction::Up, sqrt_price, self.math)?;
            accumulate(&mut totals, slot, amounts)?;
            cursor.cross(Direction::Up, candidate, sqrt_price, liquidity_net)?;

            if candidate % ticks_per_array == 0 {
                slot += 1;
            }
            candidate = match candidate.checked_add(spacing) {
                Some(next) => next,
                None => break,
            };
        }

        log::debug!("Upward bucket walk ended at tick {}", cursor.tick);
        Ok(totals)
    }

    /// Totals for the current array and every array below it
    fn downward(&self, window_len: usize) -> DepthResult<Vec<(u64, u64)>> {
        let spacing = self.pool.tick_spacing as i32;
        let ticks_per_array = ticks_per_array(self.pool.tick_spacing);
        let floor = self.starts[0].max(self.bounds.min_tick_index);

        let mut totals = vec![(0u64, 0u64); window_len];
        let mut slot = 0usize;
        let mut cursor = PriceCursor::at_pool(self.pool);
        let mut candidate =
            lower_initializable_tick(self.pool.tick_current_index, self.pool.tick_spacing);

        while candidate >= floor {
            let liquidity_net = self.liquidity_net_at(candidate);
            let sqrt_price = self.math.tick_index_to_sqrt_price(candidate)?;
            let amounts = cursor.amounts_to(Direction::Down, sqrt_price, self.math)?;
            accumulate(&mut totals, slot, amounts)?;
            cursor.cross(Direction::Down, candidate, sqrt_price, liquidity_net)?;

            if candidate % ticks_per_array == 0 {
                slot += 1;
            }
            candidate = match candidate.checked_sub(spacing) {
                Some(next) => next,
                None => break,
            };
        }

        log::debug!("Downward bucket walk ended at tick {}", cursor.tick);
        Ok(totals)
    }

    fn liquidity_net_at(&self, tick_index: i32) -> i128 {
        POLICY
            .resolve_liquidity_net(lookup_tick(tick_index, self.pool.tick_spacing, self.known))
            .unwrap_or(0)
    }
}

/// Add a step's amounts into the total for `slot`; steps past the last array
/// are dropped
fn accumulate(
    totals: &mut [(u64, u64)],
    slot: usize,
    (amount_a, amount_b): (u64, u64),
) -> DepthResult<()> {
    if let Some(total) = totals.get_mut(slot) {
        total.0 = total.0.checked_add(amount_a).ok_or(DepthError::AmountOverflow)?;
        total.1 = total.1.checked_add(amount_b).ok_or(DepthError::AmountOverflow)?;
    }
    Ok(())
}
