//! Vehicle state derivation and change-gated telemetry.
//!
//! Samples a sensor panel at a fixed cadence, derives the vehicle's
//! logical state (ignition, speed, position, brake, lamps, turn
//! signals), drives the indicator lamps, and reports each state change
//! to a remote telemetry service on a best-effort basis.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod cadence;
pub mod config;
pub mod driver;
pub mod engine;
pub mod pins;
pub mod telemetry;
pub mod thresholds;
