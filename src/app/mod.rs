//! Application core: port traits, outbound events, and the service
//! that runs one cycle at a time.
//!
//! All interaction with hardware, the network, and the clock happens
//! through the **port traits** defined in [`ports`], keeping this layer
//! fully testable without a real panel or telemetry backend.

pub mod events;
pub mod ports;
pub mod service;
