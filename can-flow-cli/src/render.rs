//! Text rendering of replay state
//!
//! Pure string builders for the terminal frontend: the 8x8 transition grid,
//! the reference/current byte rows, the position label and per-byte series
//! sparklines. Nothing here touches the session - callers pass in the value
//! types the core hands out.

use can_flow_core::{BitTransition, PositionInfo, SnapshotPair, TransitionGrid, FRAME_DATA_LEN};

/// Glyph for one bit transition
///
/// `#` set in both, `.` clear in both, `+` turned on, `-` turned off.
fn transition_glyph(transition: BitTransition) -> char {
    match transition {
        BitTransition::UnchangedClear => '.',
        BitTransition::UnchangedSet => '#',
        BitTransition::TurnedOn => '+',
        BitTransition::TurnedOff => '-',
    }
}

/// Render the transition grid as an ASCII table
///
/// Bit 7 is leftmost in each row, matching how a hex dump reads.
pub fn render_grid(grid: &TransitionGrid) -> String {
    let mut out = String::new();
    out.push_str("        bit 7 6 5 4 3 2 1 0\n");
    for (byte_index, row) in grid.rows().iter().enumerate() {
        out.push_str(&format!("  byte {}:   ", byte_index));
        for bit_index in (0..FRAME_DATA_LEN).rev() {
            out.push(transition_glyph(row[bit_index]));
            if bit_index > 0 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

/// Render the reference and current bytes as upper-case hex rows
pub fn render_snapshot(pair: &SnapshotPair) -> String {
    format!(
        "  ref:  {}\n  curr: {}\n",
        hex_row(&pair.reference),
        hex_row(&pair.current)
    )
}

fn hex_row(bytes: &[u8; FRAME_DATA_LEN]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the position label, e.g. `3 of 5`
pub fn render_position(info: PositionInfo) -> String {
    format!("{} of {}", info.position, info.total)
}

/// Render one byte series as a sparkline with its value range
///
/// Values 0-255 are scaled onto a small glyph ramp; long series are
/// downsampled to `max_width` columns so the line stays readable.
pub fn render_series(byte_offset: usize, series: &[u8], max_width: usize) -> String {
    const RAMP: &[char] = &['_', '.', ':', '-', '=', '+', '*', '#'];

    if series.is_empty() {
        return format!("  byte {}: (no data)", byte_offset);
    }

    let min = series.iter().copied().min().unwrap_or(0);
    let max = series.iter().copied().max().unwrap_or(0);

    let width = max_width.max(1).min(series.len());
    let mut line = String::with_capacity(width);
    for column in 0..width {
        let index = column * series.len() / width;
        let level = series[index] as usize * (RAMP.len() - 1) / 255;
        line.push(RAMP[level]);
    }

    format!(
        "  byte {}: {:>3}..{:<3} {}",
        byte_offset, min, max, line
    )
}
