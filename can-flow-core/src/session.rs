//! Replay session facade
//!
//! Ties the filter, playback controller, snapshot manager and byte series
//! together behind the one interface the presentation layer talks to. The
//! session holds no references to presentation objects; it consumes an
//! ordered frame log plus periodic tick calls, and hands back value types
//! (snapshots, grids, series slices) for rendering.
//!
//! Everything here is single-threaded sequential event processing: each
//! control call or tick runs to completion before the next one arrives.

use crate::filter;
use crate::grid::{self, TransitionGrid};
use crate::playback::{Direction, PlaybackController};
use crate::series;
use crate::snapshot::{SnapshotManager, SnapshotPair};
use crate::types::{Frame, ReplayError, Result, FRAME_DATA_LEN, MAX_BYTE_OFFSET};

/// Cursor position within the current selection, for the position label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionInfo {
    /// Index of the active frame (0 when nothing is selected)
    pub position: usize,
    /// Number of frames matching the selected identifier
    pub total: usize,
}

/// A replay session over one captured frame log
///
/// The filtered sequence is rebuilt wholesale on every identifier change and
/// never mutated in place, so readers always see a consistent sequence.
#[derive(Debug, Default)]
pub struct FlowSession {
    frames: Vec<Frame>,
    sequence: Vec<Frame>,
    selected_id: Option<u32>,
    controller: PlaybackController,
    snapshots: SnapshotManager,
    all_series: [Vec<u8>; FRAME_DATA_LEN],
}

impl FlowSession {
    /// Create a session with an empty frame log
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the captured frame log
    ///
    /// Any active identifier selection is re-applied against the new log,
    /// which rebuilds the sequence and restarts playback from the top.
    pub fn set_frame_source(&mut self, frames: Vec<Frame>) {
        log::info!("Frame source replaced: {} frames", frames.len());
        self.frames = frames;
        if let Some(can_id) = self.selected_id {
            self.select_identifier(can_id);
        }
    }

    /// Distinct identifiers in the log, sorted ascending
    pub fn available_identifiers(&self) -> Vec<u32> {
        filter::distinct_ids(&self.frames)
    }

    /// How many frames in the log carry the given identifier
    ///
    /// Lets a selector UI show counts without selecting each identifier in
    /// turn.
    pub fn frame_count(&self, can_id: u32) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.can_id == can_id)
            .count()
    }

    /// Select the identifier to replay
    ///
    /// Rebuilds the filtered sequence and all byte series, stops playback at
    /// position 0 and zeroes the snapshot pair; the first step fills it. An
    /// identifier with no matching frames simply yields an empty selection -
    /// every control operation then no-ops until a different identifier is
    /// chosen.
    pub fn select_identifier(&mut self, can_id: u32) {
        self.sequence = filter::filter_by_id(&self.frames, can_id);
        self.selected_id = Some(can_id);
        self.controller.reset(self.sequence.len());
        self.snapshots.reset();
        self.all_series = series::build_all_series(&self.sequence);

        if self.sequence.is_empty() {
            log::warn!("No frames match identifier 0x{:X}", can_id);
        } else {
            log::info!(
                "Selected identifier 0x{:X}: {} frames",
                can_id,
                self.sequence.len()
            );
        }
    }

    /// The currently selected identifier, if any
    pub fn selected_identifier(&self) -> Option<u32> {
        self.selected_id
    }

    /// Start automatic playback in the given direction
    pub fn play(&mut self, direction: Direction) {
        self.controller.play(direction);
    }

    /// Halt automatic playback, keeping the cursor position
    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Halt automatic playback and rewind to position 0
    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Advance one step manually, then stay paused
    pub fn step_once(&mut self, direction: Direction) {
        if let Some(position) = self.controller.step_once(direction) {
            self.refresh_snapshot(position);
        }
    }

    /// Process one tick from the external playback timer
    pub fn tick(&mut self) {
        if let Some(position) = self.controller.tick() {
            self.refresh_snapshot(position);
        }
    }

    /// Update the tick interval the external timer should use
    ///
    /// # Errors
    /// Rejects a zero interval; the previous interval is retained.
    pub fn set_speed(&mut self, interval_ms: u64) -> Result<()> {
        self.controller.set_speed(interval_ms)
    }

    /// Enable or disable loop playback
    pub fn set_loop(&mut self, enabled: bool) {
        self.controller.set_loop(enabled);
    }

    /// Tick interval in milliseconds the external timer should be armed with
    pub fn interval_ms(&self) -> u64 {
        self.controller.interval_ms()
    }

    /// Whether automatic playback is active
    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// The reference/current snapshot pair (all-zero under an empty selection)
    pub fn current_snapshot(&self) -> SnapshotPair {
        self.snapshots.pair()
    }

    /// Pin the reference bytes manually
    pub fn set_reference(&mut self, bytes: [u8; FRAME_DATA_LEN]) {
        self.snapshots.set_reference(bytes);
    }

    /// Enable or disable the auto-reference policy
    pub fn set_auto_reference(&mut self, enabled: bool) {
        self.snapshots.set_auto_reference(enabled);
    }

    /// Classify the current snapshot pair into a transition grid
    ///
    /// All `UnchangedClear` under an empty selection.
    pub fn transition_grid(&self) -> TransitionGrid {
        let pair = self.snapshots.pair();
        grid::classify(&pair.reference, &pair.current)
    }

    /// The value series for one byte offset across the selection
    ///
    /// # Errors
    /// Returns [`ReplayError::InvalidByteOffset`] for offsets outside 0-7.
    pub fn series_for(&self, byte_offset: usize) -> Result<&[u8]> {
        if byte_offset > MAX_BYTE_OFFSET {
            return Err(ReplayError::InvalidByteOffset(byte_offset));
        }
        Ok(&self.all_series[byte_offset])
    }

    /// Number of byte offsets carrying data in the selection
    pub fn active_byte_count(&self) -> usize {
        series::active_byte_count(&self.sequence)
    }

    /// Cursor position and selection size, for the `<pos> of <total>` label
    pub fn position_info(&self) -> PositionInfo {
        PositionInfo {
            position: self.controller.position(),
            total: self.sequence.len(),
        }
    }

    /// The frame at the cursor, if the selection is non-empty
    pub fn current_frame(&self) -> Option<&Frame> {
        self.sequence.get(self.controller.position())
    }

    fn refresh_snapshot(&mut self, position: usize) {
        if let Some(frame) = self.sequence.get(position) {
            self.snapshots.on_position_change(frame);
        }
    }
}
