//! # Account Decoding
//!
//! Reads the fields the simulators need from raw Whirlpool and TickArray
//! account data. Accounts are fetched elsewhere; only the byte layouts live
//! here.

use solana_program::pubkey::Pubkey;

use crate::constants::TICK_ARRAY_SIZE;
use crate::errors::{DepthError, DepthResult};
use crate::types::{PoolState, TickBucket, TickRecord};

// Whirlpool layout (after the 8-byte discriminator and 32-byte config key)
const WHIRLPOOL_TICK_SPACING_OFFSET: usize = 41;
const WHIRLPOOL_LIQUIDITY_OFFSET: usize = 49;
const WHIRLPOOL_SQRT_PRICE_OFFSET: usize = 65;
const WHIRLPOOL_TICK_CURRENT_OFFSET: usize = 81;
const WHIRLPOOL_TOKEN_MINT_A_OFFSET: usize = 101;
const WHIRLPOOL_TOKEN_MINT_B_OFFSET: usize = 181;
const WHIRLPOOL_MIN_LEN: usize = WHIRLPOOL_TOKEN_MINT_B_OFFSET + 32;

// TickArray layout
const TICK_ARRAY_START_OFFSET: usize = 8;
const TICK_ARRAY_TICKS_OFFSET: usize = 12;
/// initialized (1) + liquidity_net (16) + liquidity_gross (16) + fee growth (32) + rewards (48)
pub const TICK_ENTRY_SIZE: usize = 113;
pub const TICK_ARRAY_ACCOUNT_LEN: usize =
    TICK_ARRAY_TICKS_OFFSET + TICK_ARRAY_SIZE as usize * TICK_ENTRY_SIZE + 32;

/// Fields of a Whirlpool account used for inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhirlpoolAccount {
    pub pool: PoolState,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
}

/// Decode a Whirlpool account
pub fn decode_whirlpool(data: &[u8]) -> DepthResult<WhirlpoolAccount> {
    if data.len() < WHIRLPOOL_MIN_LEN {
        return Err(DepthError::invalid_account(
            "whirlpool",
            format!("expected at least {} bytes, got {}", WHIRLPOOL_MIN_LEN, data.len()),
        ));
    }

    let pool = PoolState {
        tick_spacing: u16::from_le_bytes(read_array(
            data,
            WHIRLPOOL_TICK_SPACING_OFFSET,
            "whirlpool",
        )?),
        liquidity: u128::from_le_bytes(read_array(data, WHIRLPOOL_LIQUIDITY_OFFSET, "whirlpool")?),
        sqrt_price: u128::from_le_bytes(read_array(
            data,
            WHIRLPOOL_SQRT_PRICE_OFFSET,
            "whirlpool",
        )?),
        tick_current_index: i32::from_le_bytes(read_array(
            data,
            WHIRLPOOL_TICK_CURRENT_OFFSET,
            "whirlpool",
        )?),
    };
    if pool.tick_spacing == 0 {
        return Err(DepthError::invalid_account("whirlpool", "tick spacing is zero"));
    }

    Ok(WhirlpoolAccount {
        pool,
        token_mint_a: Pubkey::new_from_array(read_array(
            data,
            WHIRLPOOL_TOKEN_MINT_A_OFFSET,
            "whirlpool",
        )?),
        token_mint_b: Pubkey::new_from_array(read_array(
            data,
            WHIRLPOOL_TOKEN_MINT_B_OFFSET,
            "whirlpool",
        )?),
    })
}

/// Decode a TickArray account into a loaded tick array
pub fn decode_tick_array(data: &[u8], tick_spacing: u16) -> DepthResult<TickBucket> {
    if data.len() < TICK_ARRAY_ACCOUNT_LEN {
        return Err(DepthError::invalid_account(
            "tick array",
            format!("expected {} bytes, got {}", TICK_ARRAY_ACCOUNT_LEN, data.len()),
        ));
    }

    let start_tick_index = i32::from_le_bytes(read_array(
        data,
        TICK_ARRAY_START_OFFSET,
        "tick array",
    )?);
    let ticks_per_array = TICK_ARRAY_SIZE * tick_spacing as i32;
    if ticks_per_array == 0 || start_tick_index % ticks_per_array != 0 {
        return Err(DepthError::invalid_account(
            "tick array",
            format!(
                "start index {} is not aligned to tick spacing {}",
                start_tick_index, tick_spacing
            ),
        ));
    }

    let ticks = (0..TICK_ARRAY_SIZE as usize)
        .map(|slot| {
            let offset = TICK_ARRAY_TICKS_OFFSET + slot * TICK_ENTRY_SIZE;
            Ok(TickRecord {
                initialized: data[offset] != 0,
                liquidity_net: i128::from_le_bytes(read_array(data, offset + 1, "tick array")?),
            })
        })
        .collect::<DepthResult<Vec<_>>>()?;

    Ok(TickBucket::new(start_tick_index, ticks))
}

fn read_array<const N: usize>(
    data: &[u8],
    offset: usize,
    account: &'static str,
) -> DepthResult<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            DepthError::invalid_account(account, format!("truncated at byte {}", offset))
        })
}
