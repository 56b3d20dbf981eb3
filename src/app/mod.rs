//! Application core — pure loop logic, zero I/O.
//!
//! This module holds the monitor's rules: the per-cycle sequence, the lux
//! mapping, the serial line formats and the panel layout. All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod reading;
pub mod service;
