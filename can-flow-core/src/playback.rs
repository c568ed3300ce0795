//! Tick-driven playback state machine
//!
//! The controller owns a cursor into the filtered frame sequence and advances
//! it in response to control calls and periodic tick events. It never touches
//! frames or presentation state itself - it only tracks position, direction,
//! run/pause state, loop policy and the tick interval. The surrounding
//! session feeds each stepped-to frame into the snapshot manager.
//!
//! The timer producing tick events lives outside this crate; `interval_ms`
//! is just the value that timer should be armed with. All calls are expected
//! from a single execution context, processed to completion one at a time.

use crate::types::{ReplayError, Result};

/// Default tick interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Playback direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Playback state machine over a filtered frame sequence
///
/// The controller only knows the sequence *length*, supplied via [`reset`]
/// whenever the selection changes. While the sequence is non-empty the
/// invariant `position < len` holds; while it is empty every operation is a
/// no-op and `running` stays false.
///
/// [`reset`]: PlaybackController::reset
#[derive(Debug, Clone)]
pub struct PlaybackController {
    position: usize,
    direction: Direction,
    running: bool,
    looping: bool,
    interval_ms: u64,
    len: usize,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    /// Create a stopped controller over an empty sequence
    pub fn new() -> Self {
        Self {
            position: 0,
            direction: Direction::Forward,
            running: false,
            looping: false,
            interval_ms: DEFAULT_INTERVAL_MS,
            len: 0,
        }
    }

    /// Rebind the controller to a sequence of `len` frames
    ///
    /// Position returns to 0 and playback stops; loop policy and tick
    /// interval survive the rebind.
    pub fn reset(&mut self, len: usize) {
        self.position = 0;
        self.running = false;
        self.len = len;
        log::debug!("Playback controller reset, sequence length {}", len);
    }

    /// Start automatic playback in the given direction
    ///
    /// Does not move the cursor - the next tick does. Position is retained,
    /// so playing after a pause resumes where it left off. No-op on an empty
    /// sequence.
    pub fn play(&mut self, direction: Direction) {
        if self.len == 0 {
            return;
        }
        self.direction = direction;
        self.running = true;
        log::debug!("Playback started {:?} at position {}", direction, self.position);
    }

    /// Halt automatic playback, keeping the cursor where it is
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Halt automatic playback and rewind the cursor to 0
    pub fn stop(&mut self) {
        self.running = false;
        self.position = 0;
        log::debug!("Playback stopped");
    }

    /// Advance one step in the given direction, then stay paused
    ///
    /// Manual stepping always halts automatic playback first. At a sequence
    /// end the cursor clamps (or wraps, when looping) but the controller does
    /// not change state beyond `running = false`.
    ///
    /// Returns the position to display after the step, or `None` on an empty
    /// sequence.
    pub fn step_once(&mut self, direction: Direction) -> Option<usize> {
        self.running = false;
        if self.len == 0 {
            return None;
        }
        self.advance(direction);
        Some(self.position)
    }

    /// Process one timer tick
    ///
    /// Meaningful only while running: advances the cursor one step in the
    /// current direction. Hitting a sequence end without looping leaves the
    /// cursor at the end and forces a pause, so autoplay halts at the
    /// boundaries unless looping is enabled.
    ///
    /// Returns the position to display after the tick, or `None` if the tick
    /// was ignored (not running, or empty sequence).
    pub fn tick(&mut self) -> Option<usize> {
        if !self.running || self.len == 0 {
            return None;
        }
        if self.advance(self.direction) {
            self.running = false;
            log::debug!("Playback reached sequence end at position {}", self.position);
        }
        Some(self.position)
    }

    /// Update the tick interval
    ///
    /// Takes effect when the external timer re-arms for its next period; an
    /// in-flight period is not resized.
    ///
    /// # Errors
    /// Returns [`ReplayError::InvalidInterval`] for a zero interval; the
    /// previous interval is retained.
    pub fn set_speed(&mut self, interval_ms: u64) -> Result<()> {
        if interval_ms == 0 {
            log::warn!("Rejected zero playback interval");
            return Err(ReplayError::InvalidInterval(interval_ms));
        }
        self.interval_ms = interval_ms;
        Ok(())
    }

    /// Enable or disable loop playback
    ///
    /// Applies to both tick-driven and manual stepping. Changes neither the
    /// cursor nor the run state.
    pub fn set_loop(&mut self, enabled: bool) {
        self.looping = enabled;
    }

    /// Current cursor position (0 when the sequence is empty)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether automatic playback is active
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether loop playback is enabled
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Current playback direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current tick interval in milliseconds
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Length of the bound sequence
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bound sequence is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move the cursor one step, applying the boundary policy
    ///
    /// One shared implementation for both directions: interior positions
    /// move by one; at the sequence end the cursor wraps when looping,
    /// otherwise it stays put. Returns true when a non-looping boundary was
    /// hit (the caller decides whether that forces a pause).
    ///
    /// Caller guarantees `len > 0`.
    fn advance(&mut self, direction: Direction) -> bool {
        let last = self.len - 1;
        match direction {
            Direction::Forward if self.position < last => {
                self.position += 1;
                false
            }
            Direction::Backward if self.position > 0 => {
                self.position -= 1;
                false
            }
            Direction::Forward if self.looping => {
                self.position = 0;
                false
            }
            Direction::Backward if self.looping => {
                self.position = last;
                false
            }
            _ => true,
        }
    }
}
