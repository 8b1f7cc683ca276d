//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters and a hand-advanced clock.  All tests run on the
//! host with no real hardware required.

mod admin_console_tests;
mod climate_service_tests;
mod mist_cycle_tests;
mod mock_hw;
