//! # Tick Array Window
//!
//! Start indexes and account addresses of the tick arrays surrounding the
//! current price.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::constants::TICK_ARRAY_SEED;
use crate::errors::{DepthError, DepthResult};
use crate::math::{tick_array_start_index, ticks_per_array};
use crate::types::TickBounds;

/// Contiguous, ascending run of tick arrays centred on the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickArrayWindow {
    pub start_indexes: Vec<i32>,
    pub addresses: Vec<Pubkey>,
}

impl TickArrayWindow {
    /// Window of `radius` arrays on each side of the array holding
    /// `tick_current_index`
    ///
    /// Arrays lying entirely outside `bounds` cannot exist and are left out.
    pub fn around(
        whirlpool: &Pubkey,
        program_id: &Pubkey,
        tick_current_index: i32,
        tick_spacing: u16,
        radius: i32,
        bounds: TickBounds,
    ) -> DepthResult<Self> {
        if tick_spacing == 0 {
            return Err(DepthError::InvalidTickSpacing(tick_spacing));
        }
        if radius < 0 {
            return Err(DepthError::invalid_window(format!("negative radius {}", radius)));
        }

        let ticks_per_array = ticks_per_array(tick_spacing);
        let current = tick_array_start_index(tick_current_index, tick_spacing);

        let start_indexes: Vec<i32> = (-radius..=radius)
            .filter_map(|offset| offset.checked_mul(ticks_per_array)?.checked_add(current))
            .filter(|&start| {
                start <= bounds.max_tick_index
                    && start.saturating_add(ticks_per_array) > bounds.min_tick_index
            })
            .collect();

        let addresses = start_indexes
            .iter()
            .map(|&start| derive_tick_array_address(whirlpool, start, program_id))
            .collect();

        Ok(Self {
            start_indexes,
            addresses,
        })
    }

    pub fn len(&self) -> usize {
        self.start_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_indexes.is_empty()
    }
}

/// PDA of the tick array starting at `start_tick_index`
///
/// The start index is encoded as its decimal string in the seeds.
pub fn derive_tick_array_address(
    whirlpool: &Pubkey,
    start_tick_index: i32,
    program_id: &Pubkey,
) -> Pubkey {
    Pubkey::find_program_address(
        &[
            TICK_ARRAY_SEED,
            whirlpool.as_ref(),
            start_tick_index.to_string().as_bytes(),
        ],
        program_id,
    )
    .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_TICK_INDEX, WHIRLPOOL_PROGRAM_ID};

    #[test]
    fn test_window_centred_on_current_array() {
        let whirlpool = Pubkey::new_unique();
        let window = TickArrayWindow::around(
            &whirlpool,
            &WHIRLPOOL_PROGRAM_ID,
            1000,
            64,
            2,
            TickBounds::default(),
        )
        .unwrap();

        assert_eq!(window.start_indexes, vec![-11264, -5632, 0, 5632, 11264]);
        assert_eq!(window.len(), 5);
        assert_eq!(
            window.addresses[2],
            derive_tick_array_address(&whirlpool, 0, &WHIRLPOOL_PROGRAM_ID)
        );
        assert_ne!(window.addresses[1], window.addresses[3]);
    }

    #[test]
    fn test_window_drops_arrays_beyond_bounds() {
        let whirlpool = Pubkey::new_unique();
        // Last array for spacing 64 starts at 439296 and covers MAX_TICK_INDEX
        let window = TickArrayWindow::around(
            &whirlpool,
            &WHIRLPOOL_PROGRAM_ID,
            MAX_TICK_INDEX - 10,
            64,
            2,
            TickBounds::default(),
        )
        .unwrap();

        assert_eq!(window.start_indexes, vec![428_032, 433_664, 439_296]);
        assert_eq!(window.addresses.len(), 3);
    }

    #[test]
    fn test_window_rejects_bad_input() {
        let whirlpool = Pubkey::new_unique();
        let around = |tick_spacing, radius| {
            TickArrayWindow::around(
                &whirlpool,
                &WHIRLPOOL_PROGRAM_ID,
                0,
                tick_spacing,
                radius,
                TickBounds::default(),
            )
        };
        assert!(around(0, 2).is_err());
        assert!(around(64, -1).is_err());
    }
}
