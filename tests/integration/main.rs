//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no real
//! panel or telemetry service.

mod mock_hw;
mod service_tests;
mod telemetry_tests;
