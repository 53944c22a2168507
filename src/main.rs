//! PushBot autonomous simulation runner
//!
//! Runs the scripted sequence against the mock rig at the configured
//! control cadence, logging phase transitions and telemetry, until the
//! script completes or a shutdown signal arrives.

use pushbot_auto::auto::AutonomousSequencer;
use pushbot_auto::config::AppConfig;
use pushbot_auto::devices::mock::mock_pushbot;
use pushbot_auto::error::{Error, Result};
use pushbot_auto::hardware::SystemClock;
use pushbot_auto::telemetry::LogTelemetry;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `pushbot-auto <path>` (positional)
/// - `pushbot-auto --config <path>` (flag-based)
/// - `pushbot-auto -c <path>` (short flag)
///
/// Falls back to built-in defaults when no path is given.
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn main() -> Result<()> {
    let config = match parse_config_path() {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::pushbot_defaults(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!("pushbot-auto starting");

    // Mock rig stands in for the robot controller; the sequencer only sees
    // the trait handles it drains from the wiring map
    let (mut map, rig) = mock_pushbot();
    let mut sequencer = AutonomousSequencer::new(&config, &mut map, Box::new(SystemClock::new()))?;
    sequencer.init();

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let tick_period = Duration::from_secs_f64(1.0 / config.control.loop_hz);
    let mut telemetry = LogTelemetry;

    log::info!(
        "Running at {} Hz. Press Ctrl-C to stop.",
        config.control.loop_hz
    );

    while running.load(Ordering::Relaxed) && !sequencer.is_done() {
        sequencer.tick(&mut telemetry);
        rig.step_drive(config.control.sim_max_ticks_per_tick);
        thread::sleep(tick_period);
    }

    sequencer.stop();
    log::info!(
        "pushbot-auto stopped (phase={})",
        sequencer.phase().name()
    );
    Ok(())
}
