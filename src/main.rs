//! vehiclemon: host entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SimulatedPanel / ReplayPanel   JsonConfigFile   SystemClock │
//! │  (Sensor + Actuator)            (ConfigPort)     (Clock)     │
//! │  TelemetrySink<LogTelemetryClient>  (EventSink)              │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │          VehicleService (StateEngine + context)        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  driver::run (Cadence) · Ctrl-C handler · stdin `q` watcher  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use vehiclemon::adapters::config_file::JsonConfigFile;
use vehiclemon::adapters::log_client::LogTelemetryClient;
use vehiclemon::adapters::replay::ReplayPanel;
use vehiclemon::adapters::sim_panel::SimulatedPanel;
use vehiclemon::app::ports::ConfigPort;
use vehiclemon::driver;
use vehiclemon::telemetry::sink::TelemetrySink;

/// Derive vehicle state from a sensor panel and report changes.
#[derive(Parser, Debug)]
#[command(name = "vehiclemon")]
#[command(version)]
#[command(about = "Vehicle state derivation with change-gated telemetry", long_about = None)]
struct Args {
    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    /// Replay recorded panel samples (JSON array).  Without it the simulated
    /// panel idles at rest (bench mode) and only odometer reports are sent
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Stop after this many cycles
    #[arg(short = 'n', long, value_name = "N")]
    cycles: Option<u64>,

    /// Derive and log events without contacting the telemetry service
    #[arg(long)]
    dry_run: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    // ── 1. Configuration ──────────────────────────────────────
    let config_file = JsonConfigFile::new(&args.config);
    let mut config = config_file
        .load()
        .with_context(|| format!("loading {}", config_file.path().display()))?;
    if args.dry_run {
        info!("dry run: telemetry reporting forced off");
        config.telemetry_enabled = false;
    }

    // ── 2. Telemetry sink (bootstrap happens here) ────────────
    let mut sink = TelemetrySink::connect(
        LogTelemetryClient::new(),
        config.serial_number.clone(),
        config.telemetry_enabled,
    );

    // ── 3. Stop triggers ──────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(&shutdown)?;
    spawn_shutdown_watcher(&shutdown);

    // ── 4. Panel + run ────────────────────────────────────────
    match &args.replay {
        Some(path) => {
            let mut panel = ReplayPanel::load(path)?;
            // Without an explicit limit, stop once the recording is spent.
            let limit = args.cycles.or(Some(panel.len() as u64));
            driver::run(&config, &mut panel, &mut sink, limit, &shutdown);
        }
        None => {
            info!("no --replay given: simulated panel idles at rest (bench mode)");
            let mut panel = SimulatedPanel::new();
            driver::run(&config, &mut panel, &mut sink, args.cycles, &shutdown);
        }
    }
    Ok(())
}

/// Ctrl-C sets the shared stop flag so the loop exits between cycles.
fn install_interrupt_handler(shutdown: &Arc<AtomicBool>) -> Result<()> {
    let flag = Arc::clone(shutdown);
    ctrlc::set_handler(move || {
        info!("interrupt received, shutting down");
        flag.store(true, Ordering::Relaxed);
    })
    .context("installing interrupt handler")
}

/// Set the stop flag when the operator types `q`.  A closed stdin
/// leaves the loop running.
fn spawn_shutdown_watcher(shutdown: &Arc<AtomicBool>) {
    let watcher = Arc::clone(shutdown);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines().map_while(std::io::Result::ok) {
            if line.trim().eq_ignore_ascii_case("q") {
                info!("shutdown requested");
                watcher.store(true, Ordering::Relaxed);
                return;
            }
        }
    });
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
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
