//! # Protocol Constants
//!
//! Whirlpool layout and math constants used by the simulators:
//! - Q64 fixed-point scale
//! - Tick bounds and tick array geometry
//! - Default traversal limits

use solana_program::pubkey::Pubkey;

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << 64;

// ============================================================================
// Tick Constants
// ============================================================================

/// Minimum tick index supported by Whirlpools
pub const MIN_TICK_INDEX: i32 = -443_636;

/// Maximum tick index supported by Whirlpools
pub const MAX_TICK_INDEX: i32 = 443_636;

/// Number of tick slots held by one tick array account
pub const TICK_ARRAY_SIZE: i32 = 88;

// ============================================================================
// Simulation Defaults
// ============================================================================

/// Number of initializable steps walked per direction by the step simulator
pub const DEFAULT_MAX_STEPS: usize = 10;

/// Tick arrays loaded on each side of the current one
pub const DEFAULT_WINDOW_RADIUS: i32 = 2;

// ============================================================================
// Program Constants
// ============================================================================

/// Whirlpool program on mainnet and devnet
pub const WHIRLPOOL_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// PDA seed prefix for tick array accounts
pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";
