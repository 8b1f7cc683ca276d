//! Outbound application events.
//!
//! The [`ClimateService`](super::service::ClimateService) emits these through
//! the [`EventSink`](super::ports::EventSink) port whenever it decides an
//! actuator transition, plus a few lifecycle markers.

use core::fmt;

/// The three actuators under control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuator {
    Fan,
    Window,
    Mist,
}

/// A decided actuator change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FanOn,
    FanOff,
    WindowOpen,
    WindowClose,
    MistOn,
    MistOff,
}

impl Transition {
    pub fn actuator(self) -> Actuator {
        match self {
            Self::FanOn | Self::FanOff => Actuator::Fan,
            Self::WindowOpen | Self::WindowClose => Actuator::Window,
            Self::MistOn | Self::MistOff => Actuator::Mist,
        }
    }
}

/// Why a transition was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    ShortRiseLimit,
    LongRiseLimit,
    OverMaxTemp,
    ShortFallLimit,
    LongFallLimit,
    UnderMinTemp,
    HumidityLow,
    MistOffPeriod,
}

impl Reason {
    /// Stable tag for external audit logs.
    pub fn tag(self) -> &'static str {
        match self {
            Self::ShortRiseLimit => "short rise limit",
            Self::LongRiseLimit => "long rise limit",
            Self::OverMaxTemp => "over max temp",
            Self::ShortFallLimit => "short fall limit",
            Self::LongFallLimit => "long fall limit",
            Self::UnderMinTemp => "under min temp",
            Self::HumidityLow => "humidity low",
            Self::MistOffPeriod => "mist off period",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An accepted transition with its cause and the value that triggered it
/// (a temperature, a trend delta, or a humidity reading).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub transition: Transition,
    pub reason: Reason,
    pub trigger: f32,
}

impl Decision {
    pub const fn new(transition: Transition, reason: Reason, trigger: f32) -> Self {
        Self {
            transition,
            reason,
            trigger,
        }
    }
}

/// Structured events emitted by the climate core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Actuators were driven to their known startup state.
    Started,

    /// An actuator transition was decided and applied.
    Transition(Decision),

    /// The window's move time elapsed and its drive lines were released.
    WindowSettled { open: bool },

    /// Periodic "still running" status.
    Heartbeat(StatusReport),
}

/// Point-in-time view of the controller for heartbeats and the admin console.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub temperature_f: f32,
    pub humidity: f32,
    pub short_delta_f: f32,
    pub long_delta_f: f32,
    pub fan_on: bool,
    pub window_open: bool,
    /// A drive line is asserted; drops on the tick's settle step.
    pub window_moving: bool,
    pub mist_on: bool,
    pub samples: usize,
    pub tick_count: u64,
}
