//! Core types for the flow replay library
//!
//! This module defines the frame record the replay engine consumes and the
//! error type shared by all public operations. The engine only ever reads
//! frames - capture, parsing and persistence all happen upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Number of data bytes in a classic CAN frame
pub const FRAME_DATA_LEN: usize = 8;

/// Highest valid byte offset into a frame payload
pub const MAX_BYTE_OFFSET: usize = FRAME_DATA_LEN - 1;

/// A single captured CAN frame
///
/// Payloads are stored in a fixed 8-byte buffer; frames shorter than 8 bytes
/// have their trailing bytes zero-filled, so every byte offset 0-7 reads as a
/// defined value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Timestamp in nanoseconds since epoch
    #[serde(default)]
    pub timestamp_ns: u64,
    /// CAN message ID (11-bit or 29-bit)
    pub can_id: u32,
    /// Data length code - number of meaningful payload bytes (0-8)
    pub len: u8,
    /// Payload bytes, zero-filled past `len`
    pub data: [u8; FRAME_DATA_LEN],
}

impl Frame {
    /// Build a frame from a payload slice
    ///
    /// # Errors
    /// Returns [`ReplayError::InvalidFrameLength`] if the payload is longer
    /// than 8 bytes (CAN-FD frames are not supported by the replay engine).
    pub fn from_payload(can_id: u32, payload: &[u8]) -> Result<Self> {
        if payload.len() > FRAME_DATA_LEN {
            return Err(ReplayError::InvalidFrameLength(payload.len()));
        }
        let mut data = [0u8; FRAME_DATA_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            timestamp_ns: 0,
            can_id,
            len: payload.len() as u8,
            data,
        })
    }

    /// Set the capture timestamp (nanoseconds since epoch)
    pub fn with_timestamp_ns(mut self, timestamp_ns: u64) -> Self {
        self.timestamp_ns = timestamp_ns;
        self
    }

    /// Convert timestamp from nanoseconds to DateTime<Utc>
    pub fn timestamp(&self) -> Timestamp {
        let secs = (self.timestamp_ns / 1_000_000_000) as i64;
        let nsecs = (self.timestamp_ns % 1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nsecs).unwrap_or_else(Utc::now)
    }

    /// Get the data length code (DLC) - number of meaningful data bytes
    pub fn dlc(&self) -> usize {
        self.len as usize
    }
}

/// Errors that can occur during replay operations
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Byte offset out of range (must be 0-7): {0}")]
    InvalidByteOffset(usize),

    #[error("Bit index out of range (must be 0-7): {0}")]
    InvalidBitIndex(usize),

    #[error("Playback interval must be positive, got {0} ms")]
    InvalidInterval(u64),

    #[error("Frame payload too long: {0} bytes (maximum is 8)")]
    InvalidFrameLength(usize),
}
