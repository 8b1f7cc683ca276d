//! Port traits — the hexagonal boundary between the climate core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClimateService (domain)
//! ```
//!
//! Sensors, actuators, settings, the event sink and the clock are all
//! consumed through these traits.  The [`ClimateService`](super::service::ClimateService)
//! takes them via generics, so the decision core never touches hardware
//! directly and runs deterministically under test.

use crate::config::{
    DEFAULT_MAX_TEMP_F, DEFAULT_MIN_TEMP_F, DEFAULT_MIST_OFF_S, DEFAULT_MIST_ON_S,
    DEFAULT_TARGET_HUMIDITY, DEFAULT_TARGET_TEMP_F, DEFAULT_TEMP_LONG_DELTA_S,
    DEFAULT_TEMP_SHORT_DELTA_S,
};

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the temperature/humidity probe.
///
/// Implementations must never surface a failed read: on a transient
/// failure they return the last known good value instead.
pub trait SensorPort {
    /// Current air temperature (°F).
    fn current_temperature(&mut self) -> f32;

    /// Current relative humidity (%).
    fn current_humidity(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// On/off actuator — the exhaust fan and the mister.
///
/// Fire-and-forget: commands are assumed to succeed, physical failure is
/// not observable.
pub trait SwitchPort {
    fn turn_on(&mut self);

    fn turn_off(&mut self);

    fn is_on(&self) -> bool;

    fn is_off(&self) -> bool {
        !self.is_on()
    }
}

/// Motorised window without position feedback.
///
/// `open`/`close` start a timed move; [`settle`](WindowPort::settle) must be
/// polled every control tick so the drive lines drop once the move time
/// has elapsed.
pub trait WindowPort {
    fn open(&mut self, now_ms: u64);

    fn close(&mut self, now_ms: u64);

    /// Commanded position: `true` once `open` was called, until `close`.
    fn is_open(&self) -> bool;

    fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// True while a drive line is asserted.  The lines drop in
    /// [`settle`](WindowPort::settle), so after the move time has passed
    /// this stays true until the next settle call.
    fn is_moving(&self) -> bool;

    /// Stop the motor if the move time has elapsed.
    /// Returns `true` on the tick the window stops.
    fn settle(&mut self, now_ms: u64) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Settings port (driven adapter: remote settings → domain)
// ───────────────────────────────────────────────────────────────

/// Read-only threshold accessors.
///
/// Every accessor has a documented default, used by any implementation
/// that does not override it.
pub trait SettingsPort {
    /// Default: 70 °F.
    fn target_temp_f(&self) -> f32 {
        DEFAULT_TARGET_TEMP_F
    }

    /// Default: 80 °F.
    fn max_temp_f(&self) -> f32 {
        DEFAULT_MAX_TEMP_F
    }

    /// Default: 60 °F.
    fn min_temp_f(&self) -> f32 {
        DEFAULT_MIN_TEMP_F
    }

    /// Default: 5 minutes.
    fn temp_short_delta_s(&self) -> u32 {
        DEFAULT_TEMP_SHORT_DELTA_S
    }

    /// Default: 1 hour.
    fn temp_long_delta_s(&self) -> u32 {
        DEFAULT_TEMP_LONG_DELTA_S
    }

    /// Default: 60 %RH.
    fn target_humidity(&self) -> f32 {
        DEFAULT_TARGET_HUMIDITY
    }

    /// Default: 30 seconds.
    fn mist_on_s(&self) -> u32 {
        DEFAULT_MIST_ON_S
    }

    /// Default: 2 minutes.
    fn mist_off_s(&self) -> u32 {
        DEFAULT_MIST_OFF_S
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / audit)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go; a disabled or absent sink must not
/// change any decision.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Single monotonic time source for every timer in the system.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.  Never decreases.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the main loop)
// ───────────────────────────────────────────────────────────────

/// Jobs the [`Scheduler`](crate::scheduler::Scheduler) can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Run one control loop pass.
    Monitor,
    /// Log a "still running" status line.
    Heartbeat,
}

/// Callback trait that the scheduler invokes when a job is due.
pub trait SchedulerDelegate {
    /// Called once per due job, in registration order.
    fn on_job_due(&mut self, job: Job, now_ms: u64);
}
