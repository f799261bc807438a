//! Per-step simulator.
//!
//! Upward and downward walks handle the edge of loaded data differently. Moving
//! up, an unloaded array still lets the walk finish the step up to the last
//! tick before it, since that amount only depends on liquidity already known.
//! Moving down, an unloaded array ends the walk without a partial step.
//!
//! Both walks end with a partial step at the global tick bounds.

use crate::errors::{DepthError, DepthResult};
use crate::math::{lookup_tick, lower_initializable_tick, LiquidityMath, UnknownTickPolicy};
use crate::types::{PoolState, StepRecord, StepSimulation, TickBounds, TickBucketSet};

use super::cursor::{Direction, PriceCursor};

const POLICY: UnknownTickPolicy = UnknownTickPolicy::StopOnUnknown;

/// Walk up to `max_steps` initializable ticks away from the current price in
/// each direction, one record per step
///
/// Errors from `math` and liquidity overflows are returned unchanged.
#[allow(clippy::too_many_arguments)]
pub fn simulate_steps<M: LiquidityMath + ?Sized>(
    pool: &PoolState,
    known: &TickBucketSet,
    decimals_a: u8,
    decimals_b: u8,
    max_steps: usize,
    bounds: TickBounds,
    math: &M,
) -> DepthResult<StepSimulation> {
    if pool.tick_spacing == 0 {
        return Err(DepthError::InvalidTickSpacing(pool.tick_spacing));
    }
    bounds.validate()?;

    let walk = StepWalk {
        pool,
        known,
        decimals_a,
        decimals_b,
        max_steps,
        bounds,
        math,
    };

    Ok(StepSimulation {
        upward: walk.upward()?,
        downward: walk.downward()?,
    })
}

struct StepWalk<'a, M: ?Sized> {
    pool: &'a PoolState,
    known: &'a TickBucketSet,
    decimals_a: u8,
    decimals_b: u8,
    max_steps: usize,
    bounds: TickBounds,
    math: &'a M,
}

impl<M: LiquidityMath + ?Sized> StepWalk<'_, M> {
    fn upward(&self) -> DepthResult<Vec<StepRecord>> {
        let spacing = self.pool.tick_spacing as i32;
        let mut cursor = PriceCursor::at_pool(self.pool);
        let mut records = Vec::with_capacity(self.max_steps);
        let mut candidate =
            lower_initializable_tick(self.pool.tick_current_index, self.pool.tick_spacing)
                + spacing;

        for _ in 0..self.max_steps {
            if candidate > self.bounds.max_tick_index {
                self.finish_at(&mut records, &cursor, Direction::Up, self.bounds.max_tick_index)?;
                log::debug!("Upward walk reached the tick bound {}", self.bounds.max_tick_index);
                break;
            }

            let lookup = lookup_tick(candidate, self.pool.tick_spacing, self.known);
            let Some(liquidity_net) = POLICY.resolve_liquidity_net(lookup) else {
                // Finish the step at the last tick before unloaded data. With no
                // arrays loaded this still yields one record unless the current
                // tick is already that last tick.
                self.finish_at(&mut records, &cursor, Direction::Up, candidate - 1)?;
                log::debug!("Upward walk stopped before unloaded tick {}", candidate);
                break;
            };

            let sqrt_price = self.math.tick_index_to_sqrt_price(candidate)?;
            records.push(self.record(&cursor, Direction::Up, candidate, sqrt_price)?);
            cursor.cross(Direction::Up, candidate, sqrt_price, liquidity_net)?;

            candidate = match candidate.checked_add(spacing) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(records)
    }

    fn downward(&self) -> DepthResult<Vec<StepRecord>> {
        let spacing = self.pool.tick_spacing as i32;
        let mut cursor = PriceCursor::at_pool(self.pool);
        let mut records = Vec::with_capacity(self.max_steps);
        let mut candidate =
            lower_initializable_tick(self.pool.tick_current_index, self.pool.tick_spacing);

        for _ in 0..self.max_steps {
            if candidate < self.bounds.min_tick_index {
                self.finish_at(&mut records, &cursor, Direction::Down, self.bounds.min_tick_index)?;
                log::debug!("Downward walk reached the tick bound {}", self.bounds.min_tick_index);
                break;
            }

            let lookup = lookup_tick(candidate, self.pool.tick_spacing, self.known);
            let Some(liquidity_net) = POLICY.resolve_liquidity_net(lookup) else {
                log::debug!("Downward walk stopped at tick {}: no loaded data ahead", cursor.tick);
                break;
            };

            let sqrt_price = self.math.tick_index_to_sqrt_price(candidate)?;
            records.push(self.record(&cursor, Direction::Down, candidate, sqrt_price)?);
            cursor.cross(Direction::Down, candidate, sqrt_price, liquidity_net)?;

            candidate = match candidate.checked_sub(spacing) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(records)
    }

    /// Push a last partial step ending at `tick_index` if it moves the price
    fn finish_at(
        &self,
        records: &mut Vec<StepRecord>,
        cursor: &PriceCursor,
        direction: Direction,
        tick_index: i32,
    ) -> DepthResult<()> {
        let progresses = match direction {
            Direction::Up => tick_index > cursor.tick,
            Direction::Down => tick_index < cursor.tick,
        };
        if progresses {
            let sqrt_price = self.math.tick_index_to_sqrt_price(tick_index)?;
            records.push(self.record(cursor, direction, tick_index, sqrt_price)?);
        }
        Ok(())
    }

    fn record(
        &self,
        cursor: &PriceCursor,
        direction: Direction,
        tick_index: i32,
        sqrt_price: u128,
    ) -> DepthResult<StepRecord> {
        let (amount_a, amount_b) = cursor.amounts_to(direction, sqrt_price, self.math)?;
        let price = self
            .math
            .tick_index_to_price(tick_index, self.decimals_a, self.decimals_b)?;

        Ok(StepRecord {
            tick_index,
            price,
            amount_a,
            amount_b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::WhirlpoolMath;
    use crate::types::{TickBucket, TickRecord};

    fn pool_at(tick_current_index: i32, tick_spacing: u16, liquidity: u128) -> PoolState {
        PoolState {
            tick_spacing,
            tick_current_index,
            sqrt_price: WhirlpoolMath.tick_index_to_sqrt_price(tick_current_index).unwrap(),
            liquidity,
        }
    }

    fn walk(
        pool: &PoolState,
        known: &TickBucketSet,
        max_steps: usize,
    ) -> DepthResult<StepSimulation> {
        simulate_steps(pool, known, 6, 6, max_steps, TickBounds::default(), &WhirlpoolMath)
    }

    fn bucket_with(start: i32, entries: &[(usize, i128)]) -> TickBucket {
        let mut ticks = vec![TickRecord::default(); 88];
        for &(slot, liquidity_net) in entries {
            ticks[slot] = TickRecord {
                liquidity_net,
                initialized: true,
            };
        }
        TickBucket::new(start, ticks)
    }

    #[test]
    fn test_full_window_emits_max_steps() {
        let pool = pool_at(1000, 64, 1_000_000);
        let known: TickBucketSet = (-2..=2).map(|i| TickBucket::empty(i * 5632)).collect();

        let result = walk(&pool, &known, 10).unwrap();

        assert_eq!(result.upward.len(), 10);
        assert_eq!(result.downward.len(), 10);
        assert_eq!(result.upward[0].tick_index, 1024);
        assert_eq!(result.upward[9].tick_index, 1024 + 9 * 64);
        assert_eq!(result.downward[0].tick_index, 960);
        assert_eq!(result.downward[9].tick_index, 960 - 9 * 64);
    }

    #[test]
    fn test_constant_liquidity_matches_price_delta() {
        let math = WhirlpoolMath;
        let pool = pool_at(1000, 64, 1_000_000);
        let known: TickBucketSet = (-2..=2).map(|i| TickBucket::empty(i * 5632)).collect();

        let result = walk(&pool, &known, 10).unwrap();

        let mut previous = pool.sqrt_price;
        for record in &result.upward {
            let next = math.tick_index_to_sqrt_price(record.tick_index).unwrap();
            let expected = math.amount_delta_a(previous, next, 1_000_000, false).unwrap();
            assert_eq!(record.amount_a, expected);
            let expected = math.amount_delta_b(previous, next, 1_000_000, true).unwrap();
            assert_eq!(record.amount_b, expected);
            previous = next;
        }

        let mut previous = pool.sqrt_price;
        for record in &result.downward {
            let next = math.tick_index_to_sqrt_price(record.tick_index).unwrap();
            let expected = math.amount_delta_a(next, previous, 1_000_000, true).unwrap();
            assert_eq!(record.amount_a, expected);
            let expected = math.amount_delta_b(next, previous, 1_000_000, false).unwrap();
            assert_eq!(record.amount_b, expected);
            previous = next;
        }
    }

    #[test]
    fn test_upward_caps_before_unloaded_array() {
        // Current tick sits in the last initializable range of array 0
        let pool = pool_at(5600, 64, 1_000_000);
        let known: TickBucketSet = vec![TickBucket::empty(0), TickBucket::empty(-5632)]
            .into_iter()
            .collect();

        let result = walk(&pool, &known, 10).unwrap();

        assert_eq!(result.upward.len(), 1);
        assert_eq!(result.upward[0].tick_index, 5631);
        assert!(result.upward[0].amount_a > 0);
        assert_eq!(result.downward.len(), 10);
    }

    #[test]
    fn test_downward_stops_without_partial_step() {
        // Array -5632 missing: downward reaches tick 0 and stops
        let pool = pool_at(100, 64, 1_000_000);
        let known: TickBucketSet = vec![TickBucket::empty(0)].into_iter().collect();

        let result = walk(&pool, &known, 10).unwrap();

        let ticks: Vec<i32> = result.downward.iter().map(|r| r.tick_index).collect();
        assert_eq!(ticks, vec![64, 0]);
        assert_eq!(result.upward.len(), 10);
    }

    #[test]
    fn test_no_arrays_loaded() {
        // Current tick right below the next initializable tick: nothing to cap
        let pool = pool_at(1023, 64, 1_000_000);
        let result = walk(&pool, &TickBucketSet::new(), 10).unwrap();
        assert!(result.upward.is_empty());
        assert!(result.downward.is_empty());

        // Otherwise only the capped step up to the next tick remains
        let pool = pool_at(1000, 64, 1_000_000);
        let result = walk(&pool, &TickBucketSet::new(), 10).unwrap();
        assert_eq!(result.upward.len(), 1);
        assert_eq!(result.upward[0].tick_index, 1023);
        assert!(result.downward.is_empty());
    }

    #[test]
    fn test_liquidity_net_applied_per_direction() {
        let math = WhirlpoolMath;
        let pool = pool_at(1000, 64, 1_000_000);
        // +500_000 at tick 1024 (slot 16), +300_000 at tick 960 (slot 15)
        let known: TickBucketSet = vec![bucket_with(0, &[(16, 500_000), (15, 300_000)])]
            .into_iter()
            .collect();

        let result = walk(&pool, &known, 2).unwrap();

        let s1024 = math.tick_index_to_sqrt_price(1024).unwrap();
        let s1088 = math.tick_index_to_sqrt_price(1088).unwrap();
        assert_eq!(
            result.upward[1].amount_b,
            math.amount_delta_b(s1024, s1088, 1_500_000, true).unwrap()
        );

        let s960 = math.tick_index_to_sqrt_price(960).unwrap();
        let s896 = math.tick_index_to_sqrt_price(896).unwrap();
        assert_eq!(
            result.downward[1].amount_a,
            math.amount_delta_a(s896, s960, 700_000, true).unwrap()
        );
    }

    #[test]
    fn test_liquidity_underflow_is_returned() {
        let pool = pool_at(1000, 64, 1_000);
        let known: TickBucketSet = vec![bucket_with(0, &[(15, 5_000)])].into_iter().collect();

        let result = walk(&pool, &known, 10);
        assert_eq!(result, Err(DepthError::LiquidityUnderflow(960)));
    }

    #[test]
    fn test_zero_tick_spacing_rejected() {
        let pool = PoolState {
            tick_spacing: 0,
            tick_current_index: 0,
            sqrt_price: 1 << 64,
            liquidity: 0,
        };
        assert_eq!(
            walk(&pool, &TickBucketSet::new(), 10),
            Err(DepthError::InvalidTickSpacing(0))
        );
    }

    #[test]
    fn test_walk_stops_at_max_tick_bound() {
        use crate::constants::MAX_TICK_INDEX;

        // Next initializable tick 443648 lies past the last valid tick
        let pool = pool_at(443_600, 64, 1_000_000);
        let known: TickBucketSet = vec![TickBucket::empty(439_296), TickBucket::empty(433_664)]
            .into_iter()
            .collect();

        let result = walk(&pool, &known, 10).unwrap();

        assert_eq!(result.upward.len(), 1);
        assert_eq!(result.upward[0].tick_index, MAX_TICK_INDEX);
        assert!(result.upward[0].amount_b > 0);
        assert_eq!(result.downward.len(), 10);
        assert_eq!(result.downward[0].tick_index, 443_584);
    }

    #[test]
    fn test_walk_stops_at_min_tick_bound() {
        use crate::constants::MIN_TICK_INDEX;

        // Lower initializable tick -443648 already lies past the first valid tick
        let pool = pool_at(-443_600, 64, 1_000_000);
        let known: TickBucketSet = vec![TickBucket::empty(-444_928)].into_iter().collect();

        let result = walk(&pool, &known, 10).unwrap();

        assert_eq!(result.downward.len(), 1);
        assert_eq!(result.downward[0].tick_index, MIN_TICK_INDEX);
        assert!(result.downward[0].amount_a > 0);
        assert_eq!(result.upward.len(), 10);
    }

    #[test]
    fn test_injected_bounds_limit_the_walk() {
        let pool = pool_at(1000, 64, 1_000_000);
        let known: TickBucketSet = vec![TickBucket::empty(0)].into_iter().collect();
        let bounds = TickBounds::new(900, 1100).unwrap();

        let result = simulate_steps(&pool, &known, 6, 6, 10, bounds, &WhirlpoolMath).unwrap();

        let up: Vec<i32> = result.upward.iter().map(|r| r.tick_index).collect();
        let down: Vec<i32> = result.downward.iter().map(|r| r.tick_index).collect();
        assert_eq!(up, vec![1024, 1088, 1100]);
        assert_eq!(down, vec![960, 900]);
    }

    #[test]
    fn test_prices_resolved_near_min_tick() {
        // Raw prices around 1e-19, scaled down by a further 1e-9
        let pool = pool_at(-440_000, 64, 1_000_000);
        let known: TickBucketSet = (-79..=-77).map(|i| TickBucket::empty(i * 5632)).collect();

        let result = simulate_steps(
            &pool,
            &known,
            0,
            9,
            10,
            TickBounds::default(),
            &WhirlpoolMath,
        )
        .unwrap();

        assert_eq!(result.upward.len(), 10);
        assert_eq!(result.downward.len(), 10);
        for pair in result.upward.windows(2) {
            assert!(pair[1].price > pair[0].price);
        }
        for pair in result.downward.windows(2) {
            assert!(pair[1].price < pair[0].price);
        }
    }
}
