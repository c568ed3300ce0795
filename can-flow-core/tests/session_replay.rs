//! End-to-end replay scenarios through the session facade
//!
//! Exercises the full chain: frame log -> identifier filter -> playback
//! cursor -> snapshot pair -> transition grid / byte series, the way an
//! embedding application drives it.

use can_flow_core::{BitTransition, Direction, FlowSession, Frame, SnapshotPair};

/// A log interleaving two identifiers; 0x1A3 counts up in byte 0
fn captured_log() -> Vec<Frame> {
    let mut frames = Vec::new();
    for step in 0u8..5 {
        frames.push(
            Frame::from_payload(0x1A3, &[step, 0x40 | step, 0x00])
                .unwrap()
                .with_timestamp_ns(u64::from(step) * 1_000_000),
        );
        frames.push(Frame::from_payload(0x7E0, &[0xAA]).unwrap());
    }
    frames
}

fn session_on(can_id: u32) -> FlowSession {
    let mut session = FlowSession::new();
    session.set_frame_source(captured_log());
    session.select_identifier(can_id);
    session
}

#[test]
fn identifier_listing_covers_the_log() {
    let session = session_on(0x1A3);
    assert_eq!(session.available_identifiers(), vec![0x1A3, 0x7E0]);
}

#[test]
fn forward_playback_pauses_at_the_end() {
    let mut session = session_on(0x1A3);
    session.play(Direction::Forward);

    for expected in 1..=4 {
        session.tick();
        assert_eq!(session.position_info().position, expected);
        assert!(session.is_running());
    }

    // One more tick: cursor holds at the last frame, playback auto-pauses
    session.tick();
    assert_eq!(session.position_info().position, 4);
    assert!(!session.is_running());
}

#[test]
fn loop_playback_wraps_and_keeps_running() {
    let mut session = session_on(0x1A3);
    session.set_loop(true);
    session.play(Direction::Forward);

    for _ in 0..5 {
        session.tick();
    }
    assert_eq!(session.position_info().position, 0);
    assert!(session.is_running());
}

#[test]
fn reverse_playback_from_the_end() {
    let mut session = session_on(0x1A3);
    session.set_loop(true);
    session.play(Direction::Backward);
    session.tick();
    assert_eq!(session.position_info().position, 4);

    session.set_loop(false);
    session.play(Direction::Backward);
    for _ in 0..4 {
        session.tick();
    }
    assert_eq!(session.position_info().position, 0);
    assert!(session.is_running());

    session.tick();
    assert_eq!(session.position_info().position, 0);
    assert!(!session.is_running());
}

#[test]
fn auto_reference_grid_shows_the_latest_change() {
    let mut session = session_on(0x1A3);
    session.set_auto_reference(true);

    // Step to frame 1, then frame 2; the reference trails by one step
    session.step_once(Direction::Forward);
    session.step_once(Direction::Forward);

    let snapshot = session.current_snapshot();
    assert_eq!(snapshot.reference[0], 1);
    assert_eq!(snapshot.current[0], 2);

    // 0b01 -> 0b10: bit 0 turned off, bit 1 turned on
    let grid = session.transition_grid();
    assert_eq!(grid.bit(0, 0).unwrap(), BitTransition::TurnedOff);
    assert_eq!(grid.bit(0, 1).unwrap(), BitTransition::TurnedOn);
    assert_eq!(grid.bit(0, 2).unwrap(), BitTransition::UnchangedClear);
}

#[test]
fn pinned_reference_survives_stepping() {
    let mut session = session_on(0x1A3);
    session.set_reference([0xFF; 8]);
    session.step_once(Direction::Forward);
    session.step_once(Direction::Forward);

    assert_eq!(session.current_snapshot().reference, [0xFF; 8]);
}

#[test]
fn byte_series_mirror_the_filtered_sequence() {
    let session = session_on(0x1A3);

    assert_eq!(session.series_for(0).unwrap(), &[0, 1, 2, 3, 4]);
    assert_eq!(
        session.series_for(1).unwrap(),
        &[0x40, 0x41, 0x42, 0x43, 0x44]
    );
    // Third byte present but always zero; offsets past the DLC read zero fill
    assert_eq!(session.series_for(2).unwrap(), &[0; 5]);
    assert_eq!(session.series_for(7).unwrap(), &[0; 5]);
    assert_eq!(session.active_byte_count(), 3);
}

#[test]
fn series_do_not_track_the_cursor() {
    let mut session = session_on(0x1A3);
    session.play(Direction::Forward);
    session.tick();
    session.tick();

    assert_eq!(session.series_for(0).unwrap(), &[0, 1, 2, 3, 4]);
}

#[test]
fn empty_selection_is_fully_inert() {
    let mut session = session_on(0xBAD);

    assert_eq!(session.position_info().total, 0);
    session.play(Direction::Forward);
    session.tick();
    session.step_once(Direction::Backward);

    assert!(!session.is_running());
    assert_eq!(session.current_snapshot(), SnapshotPair::default());
    let grid = session.transition_grid();
    assert_eq!(grid.bit(7, 7).unwrap(), BitTransition::UnchangedClear);
    assert_eq!(session.series_for(0).unwrap(), &[] as &[u8]);
    assert_eq!(session.active_byte_count(), 0);
}

#[test]
fn speed_changes_do_not_disturb_playback_state() {
    let mut session = session_on(0x1A3);
    session.play(Direction::Forward);
    session.tick();

    session.set_speed(50).unwrap();
    assert!(session.is_running());
    assert_eq!(session.position_info().position, 1);
    assert_eq!(session.interval_ms(), 50);

    assert!(session.set_speed(0).is_err());
    assert_eq!(session.interval_ms(), 50);
}
