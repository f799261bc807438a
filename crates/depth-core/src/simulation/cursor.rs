//! Working price state shared by both simulators.
//!
//! Rounding follows the direction of travel: moving up rounds token A down and
//! token B up, moving down rounds token A up and token B down.

use crate::errors::{DepthError, DepthResult};
use crate::math::LiquidityMath;
use crate::types::PoolState;

/// Direction the price moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Tick, square-root price and active liquidity at the current traversal point
#[derive(Debug, Clone, Copy)]
pub(crate) struct PriceCursor {
    pub tick: i32,
    pub sqrt_price: u128,
    pub liquidity: u128,
}

impl PriceCursor {
    pub fn at_pool(pool: &PoolState) -> Self {
        Self {
            tick: pool.tick_current_index,
            sqrt_price: pool.sqrt_price,
            liquidity: pool.liquidity,
        }
    }

    /// Token amounts consumed moving from the cursor to `target_sqrt_price`
    pub fn amounts_to<M: LiquidityMath + ?Sized>(
        &self,
        direction: Direction,
        target_sqrt_price: u128,
        math: &M,
    ) -> DepthResult<(u64, u64)> {
        let (low, high, round_a, round_b) = match direction {
            Direction::Up => (self.sqrt_price, target_sqrt_price, false, true),
            Direction::Down => (target_sqrt_price, self.sqrt_price, true, false),
        };

        let amount_a = math.amount_delta_a(low, high, self.liquidity, round_a)?;
        let amount_b = math.amount_delta_b(low, high, self.liquidity, round_b)?;
        Ok((amount_a, amount_b))
    }

    /// Move onto `tick` and apply its liquidity net for the given direction
    pub fn cross(
        &mut self,
        direction: Direction,
        tick: i32,
        sqrt_price: u128,
        liquidity_net: i128,
    ) -> DepthResult<()> {
        self.liquidity = apply_liquidity_net(self.liquidity, liquidity_net, direction, tick)?;
        self.tick = tick;
        self.sqrt_price = sqrt_price;
        Ok(())
    }
}

/// Liquidity after crossing a tick: `+net` moving up, `-net` moving down
fn apply_liquidity_net(
    liquidity: u128,
    liquidity_net: i128,
    direction: Direction,
    tick: i32,
) -> DepthResult<u128> {
    let adds = (liquidity_net >= 0) == (direction == Direction::Up);
    let magnitude = liquidity_net.unsigned_abs();

    if adds {
        liquidity
            .checked_add(magnitude)
            .ok_or(DepthError::LiquidityOverflow(tick))
    } else {
        liquidity
            .checked_sub(magnitude)
            .ok_or(DepthError::LiquidityUnderflow(tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_net_direction() {
        assert_eq!(apply_liquidity_net(100, 40, Direction::Up, 0), Ok(140));
        assert_eq!(apply_liquidity_net(100, -40, Direction::Up, 0), Ok(60));
        assert_eq!(apply_liquidity_net(100, 40, Direction::Down, 0), Ok(60));
        assert_eq!(apply_liquidity_net(100, -40, Direction::Down, 0), Ok(140));
        assert_eq!(apply_liquidity_net(100, 0, Direction::Down, 0), Ok(100));
    }

    #[test]
    fn test_liquidity_net_checked() {
        assert_eq!(
            apply_liquidity_net(10, 11, Direction::Down, -64),
            Err(DepthError::LiquidityUnderflow(-64))
        );
        assert_eq!(
            apply_liquidity_net(u128::MAX, 1, Direction::Up, 64),
            Err(DepthError::LiquidityOverflow(64))
        );
        assert_eq!(
            apply_liquidity_net(0, i128::MIN, Direction::Down, 128),
            Ok(i128::MIN.unsigned_abs())
        );
    }
}
