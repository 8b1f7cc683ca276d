//! Inbound commands to the application core.
//!
//! The admin console is read-only towards the actuators: it can ask for
//! status and history and toggle event logging, but never drive the fan,
//! window or mister.  Actuator state stays owned by the
//! [`ClimateService`](super::service::ClimateService).

use core::str::FromStr;

use crate::error::CommandError;

/// Commands an operator can type at the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    /// Current readings, deltas and actuator state.
    Status,
    /// Stored temperature samples, oldest first.
    History,
    /// Short and long trend deltas.
    Delta,
    /// Resume emitting decision events to the log.
    EnableEvents,
    /// Stop emitting decision events to the log.
    DisableEvents,
}

impl FromStr for AdminCommand {
    type Err = CommandError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_ascii_lowercase();
        match line.as_str() {
            "status" => Ok(Self::Status),
            "history" => Ok(Self::History),
            "delta" => Ok(Self::Delta),
            "enable logging" => Ok(Self::EnableEvents),
            "disable logging" => Ok(Self::DisableEvents),
            _ => Err(CommandError::Unknown(s.trim().to_string())),
        }
    }
}
