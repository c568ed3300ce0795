//! Per-bit transition classification
//!
//! Compares the reference and current snapshots bit by bit and classifies
//! each of the 64 bits four ways, so a viewer can tell bits that just flipped
//! from bits that are merely set or clear. A plain boolean diff cannot show
//! that distinction - it needs the remembered reference, which is why the
//! snapshot pair exists at all.

use crate::types::{ReplayError, Result, FRAME_DATA_LEN, MAX_BYTE_OFFSET};

/// How one bit's value relates between the reference and current snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitTransition {
    /// Clear in both snapshots
    #[default]
    UnchangedClear,
    /// Set in both snapshots
    UnchangedSet,
    /// Clear in the reference, set in the current bytes
    TurnedOn,
    /// Set in the reference, clear in the current bytes
    TurnedOff,
}

/// 8x8 table of bit transitions, indexed `[byte_index][bit_index]`
///
/// Bit index 0 is the least-significant bit of the byte. Recomputed on
/// demand from the snapshot pair; holds no state of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionGrid {
    cells: [[BitTransition; FRAME_DATA_LEN]; FRAME_DATA_LEN],
}

impl TransitionGrid {
    /// Look up the transition for one bit
    ///
    /// # Errors
    /// Returns [`ReplayError::InvalidByteOffset`] / [`ReplayError::InvalidBitIndex`]
    /// when an index is outside 0-7. Out-of-range indices are never wrapped
    /// or truncated.
    pub fn bit(&self, byte_index: usize, bit_index: usize) -> Result<BitTransition> {
        if byte_index > MAX_BYTE_OFFSET {
            return Err(ReplayError::InvalidByteOffset(byte_index));
        }
        if bit_index > MAX_BYTE_OFFSET {
            return Err(ReplayError::InvalidBitIndex(bit_index));
        }
        Ok(self.cells[byte_index][bit_index])
    }

    /// Borrow the full table, one row per payload byte
    pub fn rows(&self) -> &[[BitTransition; FRAME_DATA_LEN]; FRAME_DATA_LEN] {
        &self.cells
    }
}

/// Classify every bit of the current bytes against the reference bytes
///
/// For byte `y` and bit `x` (LSB = bit 0):
/// reference 0 / current 0 is `UnchangedClear`, 1/1 is `UnchangedSet`,
/// 0/1 is `TurnedOn` and 1/0 is `TurnedOff`. Pure and O(64).
pub fn classify(
    reference: &[u8; FRAME_DATA_LEN],
    current: &[u8; FRAME_DATA_LEN],
) -> TransitionGrid {
    let mut cells = [[BitTransition::UnchangedClear; FRAME_DATA_LEN]; FRAME_DATA_LEN];

    for (byte_index, row) in cells.iter_mut().enumerate() {
        let ref_byte = reference[byte_index];
        let cur_byte = current[byte_index];
        for (bit_index, cell) in row.iter_mut().enumerate() {
            let ref_bit = (ref_byte >> bit_index) & 1 == 1;
            let cur_bit = (cur_byte >> bit_index) & 1 == 1;
            *cell = match (ref_bit, cur_bit) {
                (false, false) => BitTransition::UnchangedClear,
                (true, true) => BitTransition::UnchangedSet,
                (false, true) => BitTransition::TurnedOn,
                (true, false) => BitTransition::TurnedOff,
            };
        }
    }

    TransitionGrid { cells }
}
