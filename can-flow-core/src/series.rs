//! Per-byte value series extraction
//!
//! For charting, each payload byte offset becomes an ordered series of values
//! 0-255 across the filtered sequence. Series track the sequence, not the
//! playback cursor: they are rebuilt on identifier change and static
//! otherwise.

use crate::types::{Frame, ReplayError, Result, FRAME_DATA_LEN, MAX_BYTE_OFFSET};

/// Extract the value series for one byte offset
///
/// Element `j` is `sequence[j].data[byte_offset]`; the series length equals
/// the sequence length. Offsets past a frame's DLC read the zero fill.
///
/// # Errors
/// Returns [`ReplayError::InvalidByteOffset`] for offsets outside 0-7.
pub fn build_series(sequence: &[Frame], byte_offset: usize) -> Result<Vec<u8>> {
    if byte_offset > MAX_BYTE_OFFSET {
        return Err(ReplayError::InvalidByteOffset(byte_offset));
    }
    Ok(sequence.iter().map(|frame| frame.data[byte_offset]).collect())
}

/// Build the series for all eight byte offsets at once
///
/// Used on identifier change so lookups afterwards are allocation-free.
pub fn build_all_series(sequence: &[Frame]) -> [Vec<u8>; FRAME_DATA_LEN] {
    std::array::from_fn(|offset| {
        sequence.iter().map(|frame| frame.data[offset]).collect()
    })
}

/// Number of byte offsets actually carrying data in the sequence
///
/// The maximum DLC across the sequence - how many byte charts are worth
/// drawing. An empty sequence has no active bytes.
pub fn active_byte_count(sequence: &[Frame]) -> usize {
    sequence.iter().map(Frame::dlc).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> Vec<Frame> {
        vec![
            Frame::from_payload(0x100, &[10, 20, 30]).unwrap(),
            Frame::from_payload(0x100, &[11, 21, 31]).unwrap(),
            Frame::from_payload(0x100, &[12, 22]).unwrap(),
        ]
    }

    #[test]
    fn test_series_follows_sequence_order() {
        let seq = sequence();
        assert_eq!(build_series(&seq, 0).unwrap(), vec![10, 11, 12]);
        assert_eq!(build_series(&seq, 1).unwrap(), vec![20, 21, 22]);
    }

    #[test]
    fn test_series_reads_zero_fill_past_dlc() {
        let seq = sequence();
        assert_eq!(build_series(&seq, 2).unwrap(), vec![30, 31, 0]);
        assert_eq!(build_series(&seq, 7).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_series_rejects_out_of_range_offset() {
        let err = build_series(&sequence(), 8).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidByteOffset(8)));
    }

    #[test]
    fn test_build_all_series_matches_single_builds() {
        let seq = sequence();
        let all = build_all_series(&seq);
        for offset in 0..FRAME_DATA_LEN {
            assert_eq!(all[offset], build_series(&seq, offset).unwrap());
        }
    }

    #[test]
    fn test_active_byte_count() {
        assert_eq!(active_byte_count(&sequence()), 3);
        assert_eq!(active_byte_count(&[]), 0);
    }
}
