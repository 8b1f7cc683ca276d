//! Actuator drivers over `embedded-hal` output lines.

pub mod relay;
pub mod sim_pin;
pub mod window;

pub use relay::Relay;
pub use sim_pin::SimPin;
pub use window::WindowDriver;
