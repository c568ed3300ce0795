//! Capture file loading
//!
//! Two on-disk formats feed the replay session:
//! - candump text logs, one frame per line: `(timestamp) iface ID#HEXBYTES`,
//!   with the `(timestamp) iface` prefix optional
//! - JSON arrays of frame records (`.json` extension)
//!
//! Both are turned into the same `Vec<Frame>` the session consumes. Parsing
//! stops at the first malformed line so a truncated or mis-typed capture is
//! reported instead of silently shortened.

use anyhow::{bail, Context, Result};
use can_flow_core::Frame;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One frame record in a JSON capture file
#[derive(Debug, Deserialize)]
struct JsonFrameRecord {
    can_id: u32,
    #[serde(default)]
    data: Vec<u8>,
    #[serde(default)]
    timestamp_ns: u64,
}

/// Load a capture file, picking the format from the file extension
pub fn load_frames(path: &Path) -> Result<Vec<Frame>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture file: {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let frames = if is_json {
        parse_json_capture(&content)
            .with_context(|| format!("Failed to parse JSON capture: {:?}", path))?
    } else {
        parse_candump_capture(&content)
            .with_context(|| format!("Failed to parse candump capture: {:?}", path))?
    };

    log::info!("Loaded {} frames from {:?}", frames.len(), path);
    Ok(frames)
}

/// Parse a JSON array of frame records
pub fn parse_json_capture(content: &str) -> Result<Vec<Frame>> {
    let records: Vec<JsonFrameRecord> = serde_json::from_str(content)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Frame::from_payload(record.can_id, &record.data)
                .map(|frame| frame.with_timestamp_ns(record.timestamp_ns))
                .with_context(|| format!("Invalid frame record at index {}", index))
        })
        .collect()
}

/// Parse a candump-style text log
///
/// Empty lines and lines starting with `#` are skipped.
pub fn parse_candump_capture(content: &str) -> Result<Vec<Frame>> {
    let mut frames = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let frame = parse_candump_line(line)
            .with_context(|| format!("Invalid capture line {}: {:?}", line_no + 1, line))?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Parse one candump line: `(1699999999.123456) can0 1A3#0011223344556677`
///
/// The timestamp and interface fields are optional; a bare `1A3#00112233`
/// is accepted too. The timestamp, when present, is seconds with fractional
/// part and is stored as nanoseconds.
fn parse_candump_line(line: &str) -> Result<Frame> {
    let mut timestamp_ns = 0u64;
    let mut rest = line;

    if let Some(after_paren) = rest.strip_prefix('(') {
        let (stamp, tail) = after_paren
            .split_once(')')
            .context("Unterminated timestamp")?;
        timestamp_ns = parse_timestamp_ns(stamp.trim())?;
        rest = tail.trim_start();
    }

    // The frame itself is the last whitespace-separated token, which skips
    // the interface name when one is present
    let token = rest
        .split_whitespace()
        .last()
        .context("Missing frame data")?;

    let (id_text, data_text) = token
        .split_once('#')
        .context("Expected ID#DATA")?;

    let can_id = u32::from_str_radix(id_text, 16)
        .with_context(|| format!("Invalid CAN ID: {:?}", id_text))?;

    let payload = parse_hex_bytes(data_text)?;
    Ok(Frame::from_payload(can_id, &payload)?.with_timestamp_ns(timestamp_ns))
}

fn parse_timestamp_ns(stamp: &str) -> Result<u64> {
    let (secs, frac) = stamp.split_once('.').unwrap_or((stamp, "0"));
    let secs: u64 = secs.parse().context("Invalid timestamp seconds")?;
    // Right-pad the fractional part out to nanosecond precision
    let mut frac = frac.to_string();
    if frac.len() > 9 {
        frac.truncate(9);
    }
    while frac.len() < 9 {
        frac.push('0');
    }
    let nanos: u64 = frac.parse().context("Invalid timestamp fraction")?;
    secs.checked_mul(1_000_000_000)
        .and_then(|ns| ns.checked_add(nanos))
        .with_context(|| format!("Timestamp out of range: {:?}", stamp))
}

fn parse_hex_bytes(text: &str) -> Result<Vec<u8>> {
    // Guard before slicing: two-byte str slices below assume ASCII
    if !text.is_ascii() {
        bail!("Non-ASCII characters in payload: {:?}", text);
    }
    if text.len() % 2 != 0 {
        bail!("Odd number of hex digits in payload: {:?}", text);
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .with_context(|| format!("Invalid hex byte: {:?}", &text[i..i + 2]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_candump_line() {
        let frames = parse_candump_capture("(1699999999.500000) can0 1A3#DEADBEEF").unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].can_id, 0x1A3);
        assert_eq!(frames[0].dlc(), 4);
        assert_eq!(&frames[0].data[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(frames[0].timestamp_ns, 1_699_999_999_500_000_000);
    }

    #[test]
    fn test_parse_bare_line_and_comments() {
        let content = "# capture of the door module\n\n1A3#01\n7E0#AABB\n";
        let frames = parse_candump_capture(content).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].can_id, 0x7E0);
    }

    #[test]
    fn test_parse_empty_payload() {
        let frames = parse_candump_capture("1A3#").unwrap();
        assert_eq!(frames[0].dlc(), 0);
        assert_eq!(frames[0].data, [0u8; 8]);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_candump_capture("1A3#01\nnot-a-frame\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_oversize_payload_rejected() {
        assert!(parse_candump_capture("1A3#001122334455667788").is_err());
    }

    #[test]
    fn test_multibyte_payload_is_an_error_not_a_panic() {
        // "€" is 3 UTF-8 bytes, so "€1" passes the even-length check but
        // must still come back as a line error
        let err = parse_candump_capture("1A3#\u{20AC}1").unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));
    }

    #[test]
    fn test_absurd_timestamp_is_an_error_not_a_panic() {
        let err = parse_candump_capture("(99999999999999.0) can0 1A3#01").unwrap_err();
        assert!(format!("{:#}", err).contains("Timestamp out of range"));
    }

    #[test]
    fn test_parse_json_capture() {
        let content = r#"[
            {"can_id": 419, "data": [1, 2, 3], "timestamp_ns": 1000},
            {"can_id": 2016, "data": []}
        ]"#;
        let frames = parse_json_capture(content).unwrap();
        assert_eq!(frames[0].can_id, 0x1A3);
        assert_eq!(&frames[0].data[..3], &[1, 2, 3]);
        assert_eq!(frames[0].timestamp_ns, 1000);
        assert_eq!(frames[1].dlc(), 0);
    }

    #[test]
    fn test_load_frames_picks_format_by_extension() {
        let mut text_file = tempfile::Builder::new().suffix(".log").tempfile().unwrap();
        writeln!(text_file, "1A3#0102").unwrap();
        let frames = load_frames(text_file.path()).unwrap();
        assert_eq!(frames[0].can_id, 0x1A3);

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json_file, r#"[{{"can_id": 16, "data": [255]}}]"#).unwrap();
        let frames = load_frames(json_file.path()).unwrap();
        assert_eq!(frames[0].can_id, 0x10);
        assert_eq!(frames[0].data[0], 0xFF);
    }
}
