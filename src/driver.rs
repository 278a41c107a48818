//! Driver loop: paces cycles until asked to stop, then shuts down in order.
//!
//! Stop requests arrive through a shared `AtomicBool` (set by the SIGINT
//! handler or the stdin watcher in `main`) or by reaching a cycle limit.
//! Either way the loop exits between cycles and every lamp is driven low.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};

use crate::adapters::time::SystemClock;
use crate::app::ports::{ActuatorPort, SensorPort, TelemetryClient};
use crate::app::service::VehicleService;
use crate::cadence::Cadence;
use crate::config::SystemConfig;
use crate::telemetry::sink::{DeliveryStats, TelemetrySink};

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub delivery: DeliveryStats,
    pub overruns: u64,
}

/// Run cycles until `shutdown` is set or `limit` cycles have executed.
pub fn run<P, C>(
    config: &SystemConfig,
    panel: &mut P,
    sink: &mut TelemetrySink<C>,
    limit: Option<u64>,
    shutdown: &AtomicBool,
) -> RunSummary
where
    P: SensorPort + ActuatorPort,
    C: TelemetryClient,
{
    let clock = SystemClock::new();
    let mut service = VehicleService::new(config);
    let mut cadence = Cadence::from_millis(config.cycle_period_ms);

    info!(
        "vehiclemon started: serial={} period={}ms reporting={}",
        config.serial_number,
        config.cycle_period_ms,
        sink.is_reporting()
    );

    while !shutdown.load(Ordering::Relaxed) {
        if limit.is_some_and(|n| service.cycle_count() >= n) {
            debug!("cycle limit reached");
            break;
        }
        let started = Instant::now();
        service.tick(panel, &clock, sink);
        std::thread::sleep(cadence.remaining(started.elapsed()));
    }

    // ── Orderly shutdown ──────────────────────────────────────
    service.shutdown(panel);
    let summary = RunSummary {
        cycles: service.cycle_count(),
        delivery: sink.stats(),
        overruns: cadence.overruns(),
    };
    info!(
        "delivery: {} delivered, {} failed, {} skipped; {} overruns",
        summary.delivery.delivered,
        summary.delivery.failed,
        summary.delivery.skipped,
        summary.overruns
    );
    info!("terminated");
    summary
}
