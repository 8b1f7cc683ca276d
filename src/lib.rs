//! Greenhouse climate controller library.
//!
//! Decides when to run the exhaust fan, open or close the motorised window
//! and dose the mister, from periodic temperature/humidity samples, trend
//! deltas and configured thresholds.  The decision core in [`app`] is pure
//! and driven through port traits; [`drivers`], [`sensors`] and
//! [`adapters`] provide the concrete edges.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod scheduler;
pub mod sensors;
pub mod timer;
pub mod trend;
