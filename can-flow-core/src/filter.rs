//! Identifier filtering
//!
//! A capture log usually interleaves many message IDs. Replay always works on
//! the sub-sequence of frames sharing one identifier, in original capture
//! order. Both functions here are pure transforms, run once per identifier
//! selection rather than per tick.

use crate::types::Frame;

/// Extract the ordered sub-sequence of frames matching `can_id`
///
/// Relative order is preserved and duplicates are kept - the result is
/// exactly the input restricted to matching identifiers. No matches (or an
/// empty input) yields an empty vec; callers must treat that as "nothing to
/// replay" rather than an error.
pub fn filter_by_id(frames: &[Frame], can_id: u32) -> Vec<Frame> {
    frames
        .iter()
        .filter(|frame| frame.can_id == can_id)
        .copied()
        .collect()
}

/// List the distinct identifiers present in a capture log, sorted ascending
///
/// Supports the identifier selector in the presentation layer.
pub fn distinct_ids(frames: &[Frame]) -> Vec<u32> {
    let mut ids: Vec<u32> = frames.iter().map(|frame| frame.can_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
