//! Liquidity math seam for the simulators
//!
//! Conversions between ticks, square-root prices, prices and token amounts.
//! The simulators only talk to [`LiquidityMath`]; [`WhirlpoolMath`] backs it
//! with Orca core.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use orca_whirlpools_core::{try_get_amount_delta_a, try_get_amount_delta_b, U128};

use crate::constants::{MAX_TICK_INDEX, MIN_TICK_INDEX};
use crate::errors::{DepthError, DepthResult};

/// Fixed-point primitives consumed by the simulators
///
/// Implementations must be pure. Amount deltas must be monotonic in their
/// price arguments and return zero for an empty price range.
pub trait LiquidityMath {
    /// Q64.64 square-root price at `tick_index`
    fn tick_index_to_sqrt_price(&self, tick_index: i32) -> DepthResult<u128>;

    /// Display price of token A in token B at `tick_index`
    fn tick_index_to_price(
        &self,
        tick_index: i32,
        decimals_a: u8,
        decimals_b: u8,
    ) -> DepthResult<BigDecimal>;

    /// Token A amount for moving between two square-root prices
    fn amount_delta_a(
        &self,
        sqrt_price_low: u128,
        sqrt_price_high: u128,
        liquidity: u128,
        round_up: bool,
    ) -> DepthResult<u64>;

    /// Token B amount for moving between two square-root prices
    fn amount_delta_b(
        &self,
        sqrt_price_low: u128,
        sqrt_price_high: u128,
        liquidity: u128,
        round_up: bool,
    ) -> DepthResult<u64>;
}

/// Whirlpool math backed by `orca_whirlpools_core`
#[derive(Debug, Clone, Copy, Default)]
pub struct WhirlpoolMath;

impl LiquidityMath for WhirlpoolMath {
    fn tick_index_to_sqrt_price(&self, tick_index: i32) -> DepthResult<u128> {
        if !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick_index) {
            return Err(DepthError::TickOutOfRange(tick_index));
        }
        Ok(u128::from(orca_whirlpools_core::tick_index_to_sqrt_price(
            tick_index,
        )))
    }

    fn tick_index_to_price(
        &self,
        tick_index: i32,
        decimals_a: u8,
        decimals_b: u8,
    ) -> DepthResult<BigDecimal> {
        let sqrt_price = self.tick_index_to_sqrt_price(tick_index)?;
        Ok(sqrt_price_to_price(sqrt_price, decimals_a, decimals_b))
    }

    fn amount_delta_a(
        &self,
        sqrt_price_low: u128,
        sqrt_price_high: u128,
        liquidity: u128,
        round_up: bool,
    ) -> DepthResult<u64> {
        try_get_amount_delta_a(
            U128::from(sqrt_price_low),
            U128::from(sqrt_price_high),
            U128::from(liquidity),
            round_up,
        )
        .map_err(|e| DepthError::math("amount_delta_a", e))
    }

    fn amount_delta_b(
        &self,
        sqrt_price_low: u128,
        sqrt_price_high: u128,
        liquidity: u128,
        round_up: bool,
    ) -> DepthResult<u64> {
        try_get_amount_delta_b(
            U128::from(sqrt_price_low),
            U128::from(sqrt_price_high),
            U128::from(liquidity),
            round_up,
        )
        .map_err(|e| DepthError::math("amount_delta_b", e))
    }
}

/// Significant digits kept in computed prices
pub const PRICE_PRECISION: u64 = 40;

/// Convert a Q64.64 square-root price into a decimal-adjusted price
///
/// `price = sqrt_price^2 / 2^128 * 10^(decimals_a - decimals_b)`, evaluated
/// exactly and rounded to [`PRICE_PRECISION`] significant digits.
pub fn sqrt_price_to_price(sqrt_price: u128, decimals_a: u8, decimals_b: u8) -> BigDecimal {
    // x / 2^128 == x * 5^128 / 10^128
    let digits = BigInt::from(sqrt_price).pow(2) * BigInt::from(5u8).pow(128);
    let scale = 128 - (i64::from(decimals_a) - i64::from(decimals_b));

    BigDecimal::new(digits, scale)
        .with_prec(PRICE_PRECISION)
        .normalized()
}
