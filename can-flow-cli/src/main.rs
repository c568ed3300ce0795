//! CAN Flow Replay CLI Application
//!
//! Terminal frontend for the can-flow-core replay engine. It plays the role
//! the engine leaves to the embedding application:
//! - Loads a capture file (candump text or JSON)
//! - Lists the identifiers present, or replays one of them
//! - Runs the periodic playback timer and feeds ticks to the session
//! - Renders the transition grid, snapshots and byte series as text

use anyhow::{bail, Context, Result};
use can_flow_core::{Direction, FlowSession};
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

mod capture;
mod config;
mod render;

/// CAN Flow Replay - step through captured frames of one identifier
#[derive(Parser, Debug)]
#[command(name = "can-flow-cli")]
#[command(about = "Replay captured CAN frames and watch per-bit transitions", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the capture file (candump text, or .json)
    #[arg(short, long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Identifier to replay, as hex (e.g. 1A3). Omit to list identifiers
    #[arg(short, long, value_name = "HEX_ID")]
    id: Option<String>,

    /// Path to a replay.toml configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tick interval in milliseconds
    #[arg(long, value_name = "MS")]
    interval: Option<u64>,

    /// Wrap around at the sequence ends instead of pausing
    #[arg(long)]
    loop_playback: bool,

    /// Auto-reference: the reference snapshot trails the cursor by one step
    #[arg(long)]
    auto_ref: bool,

    /// Play backward (starts at position 0, so pair this with --loop-playback)
    #[arg(long)]
    reverse: bool,

    /// Stop after this many ticks (default: run until playback pauses)
    #[arg(long, value_name = "COUNT")]
    max_steps: Option<usize>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("CAN Flow Replay CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using replay library v{}", can_flow_core::VERSION);

    // Command-line values override the config file
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::ReplayConfig::default(),
    };

    let log_path = args.log.clone().or(file_config.input.file.clone());
    let id_text = args.id.clone().or(file_config.input.id.clone());

    let Some(log_path) = log_path else {
        // No input - show quick start
        println!("CAN Flow Replay - No capture file specified");
        println!("\nQuick Start:");
        println!("  can-flow-cli --log capture.log             # list identifiers");
        println!("  can-flow-cli --log capture.log --id 1A3    # replay one identifier");
        println!("  can-flow-cli --config replay.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    let frames = capture::load_frames(&log_path)?;
    if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
        log::info!(
            "Capture spans {} .. {}",
            first.timestamp().format("%Y-%m-%d %H:%M:%S%.3f"),
            last.timestamp().format("%Y-%m-%d %H:%M:%S%.3f")
        );
    }
    let mut session = FlowSession::new();
    session.set_frame_source(frames);

    match id_text {
        Some(text) => {
            let can_id = config::parse_hex_id(&text)?;
            replay_mode(&mut session, can_id, &args, &file_config.replay)
        }
        None => {
            list_identifiers_mode(&session);
            Ok(())
        }
    }
}

/// List mode - show every identifier in the capture with its frame count
fn list_identifiers_mode(session: &FlowSession) {
    let ids = session.available_identifiers();
    if ids.is_empty() {
        println!("Capture contains no frames");
        return;
    }

    println!("Identifiers in capture ({} distinct):", ids.len());
    for can_id in ids {
        println!("  {:04X}  {} frames", can_id, session.frame_count(can_id));
    }
    println!("\nReplay one with --id <HEX_ID>");
}

/// Replay mode - drive the session tick by tick and render each step
fn replay_mode(
    session: &mut FlowSession,
    can_id: u32,
    args: &Args,
    defaults: &config::ReplaySettings,
) -> Result<()> {
    session.select_identifier(can_id);

    let info = session.position_info();
    if info.total == 0 {
        bail!(
            "No frames with identifier {:04X} in the capture (use the list mode to see what is present)",
            can_id
        );
    }

    let interval_ms = args.interval.unwrap_or(defaults.interval_ms);
    session
        .set_speed(interval_ms)
        .context("Invalid --interval value")?;
    session.set_loop(args.loop_playback || defaults.loop_playback);
    session.set_auto_reference(args.auto_ref || defaults.auto_reference);

    let direction = if args.reverse || defaults.reverse {
        Direction::Backward
    } else {
        Direction::Forward
    };

    println!(
        "Replaying {:04X}: {} frames, {} ms per step",
        can_id, info.total, interval_ms
    );

    session.play(direction);
    let mut steps = 0usize;
    while session.is_running() {
        if let Some(max) = args.max_steps {
            if steps >= max {
                session.pause();
                break;
            }
        }
        thread::sleep(Duration::from_millis(session.interval_ms()));
        session.tick();
        steps += 1;

        println!("\nframe {}", render::render_position(session.position_info()));
        print!("{}", render::render_snapshot(&session.current_snapshot()));
        print!("{}", render::render_grid(&session.transition_grid()));
    }

    print_series_summary(session)?;
    Ok(())
}

/// Print the per-byte value series once playback has finished
fn print_series_summary(session: &FlowSession) -> Result<()> {
    let active = session.active_byte_count();
    if active == 0 {
        return Ok(());
    }

    println!(
        "\nByte values across {} frames:",
        session.position_info().total
    );
    for byte_offset in 0..active {
        let series = session.series_for(byte_offset)?;
        println!("{}", render::render_series(byte_offset, series, 60));
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
