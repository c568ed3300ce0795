//! Reference/current snapshot tracking
//!
//! The transition grid needs two 8-byte buffers to compare: the payload at
//! the active playback position ("current") and a baseline ("reference").
//! The reference is either pinned manually by the user or, in auto-reference
//! mode, trails the cursor by one step so the grid always shows the change
//! introduced by the latest frame.

use crate::types::{Frame, FRAME_DATA_LEN};

/// The pair of byte buffers the transition grid is derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotPair {
    /// Baseline bytes the comparison runs against
    pub reference: [u8; FRAME_DATA_LEN],
    /// Payload bytes at the active playback position
    pub current: [u8; FRAME_DATA_LEN],
}

/// Owns the snapshot pair and the auto-reference policy
#[derive(Debug, Clone, Default)]
pub struct SnapshotManager {
    pair: SnapshotPair,
    auto_reference: bool,
}

impl SnapshotManager {
    /// Create a manager with both buffers zeroed and auto-reference off
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the frame at a new cursor position
    ///
    /// In auto-reference mode the old current bytes become the reference
    /// before being overwritten; otherwise the reference is left untouched.
    pub fn on_position_change(&mut self, frame: &Frame) {
        if self.auto_reference {
            self.pair.reference = self.pair.current;
        }
        self.pair.current = frame.data;
    }

    /// Pin the reference bytes explicitly
    ///
    /// Only meaningful while auto-reference is off; the next position change
    /// in auto-reference mode overwrites the pin.
    pub fn set_reference(&mut self, bytes: [u8; FRAME_DATA_LEN]) {
        self.pair.reference = bytes;
    }

    /// Enable or disable the auto-reference policy
    pub fn set_auto_reference(&mut self, enabled: bool) {
        self.auto_reference = enabled;
    }

    /// Whether auto-reference is enabled
    pub fn auto_reference(&self) -> bool {
        self.auto_reference
    }

    /// Zero both buffers, keeping the auto-reference setting
    pub fn reset(&mut self) {
        self.pair = SnapshotPair::default();
    }

    /// The current reference/current pair
    pub fn pair(&self) -> SnapshotPair {
        self.pair
    }
}
