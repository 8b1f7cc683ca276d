//! Application core — pure domain logic, zero I/O.
//!
//! Business rules for the greenhouse: trend-based hysteresis for the fan
//! and window, and the mister duty cycle.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod engine;
pub mod events;
pub mod mist;
pub mod ports;
pub mod service;
