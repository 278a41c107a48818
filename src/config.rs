//! System configuration parameters
//!
//! Loaded once at startup (see [`JsonConfigFile`](crate::adapters::config_file::JsonConfigFile))
//! and immutable for the lifetime of the process.  Field names on the
//! wire are camelCase to stay compatible with existing `config.json`
//! files, which carry the device serial as `serialNo`.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::thresholds;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    // --- Identity ---
    /// Device serial number attached to every status record.
    #[serde(rename = "serialNo")]
    pub serial_number: String,

    // --- Telemetry ---
    /// Master switch for remote reporting.  When off, events are still
    /// derived and logged but no authentication or delivery is attempted.
    #[serde(default = "default_telemetry_enabled")]
    pub telemetry_enabled: bool,

    // --- Timing ---
    /// Sampling period (milliseconds)
    #[serde(default = "default_cycle_period_ms")]
    pub cycle_period_ms: u32,
    /// Cycles between odometer reports
    #[serde(default = "default_odometer_poll_count")]
    pub odometer_poll_count: u32,
}

fn default_telemetry_enabled() -> bool {
    true
}

fn default_cycle_period_ms() -> u32 {
    thresholds::CYCLE_PERIOD_MS
}

fn default_odometer_poll_count() -> u32 {
    thresholds::ODOMETER_POLL_COUNT
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            serial_number: String::from("UNPROVISIONED"),
            telemetry_enabled: default_telemetry_enabled(),
            cycle_period_ms: default_cycle_period_ms(),   // 10 Hz
            odometer_poll_count: default_odometer_poll_count(), // every 2.5 s
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial_number.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("serialNo must not be empty"));
        }
        if !(10..=10_000).contains(&self.cycle_period_ms) {
            return Err(ConfigError::ValidationFailed(
                "cyclePeriodMs must be 10–10000",
            ));
        }
        if self.odometer_poll_count == 0 {
            return Err(ConfigError::ValidationFailed(
                "odometerPollCount must be at least 1",
            ));
        }
        Ok(())
    }

    /// Sampling period in seconds, as used by speed integration.
    pub fn cycle_period_secs(&self) -> f64 {
        f64::from(self.cycle_period_ms) / 1000.0
    }
}
