//! Monotonic elapsed-time gate for actuators that cannot report their own state.
//!
//! An [`ActuatorTimer`] is armed when its actuator transitions and is then
//! polled from the control loop.  It never fires callbacks; callers ask
//! whether it is still [`active`](ActuatorTimer::is_active) or has
//! [`just expired`](ActuatorTimer::just_expired) and act on the answer.
//!
//! ```text
//!   clear()          arm(t0)                 t0 + duration        clear()
//!   ───────┬─────────────┬───────────────────────┬───────────────────┬────
//!   idle   │   idle      │        active         │   just expired    │ idle
//! ```
//!
//! All times are milliseconds from a single monotonic clock.

/// Elapsed-time gate with a one-shot expiry flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorTimer {
    started_at_ms: Option<u64>,
    duration_ms: u64,
}

impl ActuatorTimer {
    pub const fn new(duration_ms: u64) -> Self {
        Self {
            started_at_ms: None,
            duration_ms,
        }
    }

    /// Start (or restart) the timer at `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.started_at_ms = Some(now_ms);
    }

    /// Return the timer to the idle state.
    pub fn clear(&mut self) {
        self.started_at_ms = None;
    }

    /// Change the duration.  Takes effect on the next poll, including for a
    /// timer that is already running.
    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// True while armed and `now_ms < start + duration`.
    pub fn is_active(&self, now_ms: u64) -> bool {
        match self.started_at_ms {
            Some(start) => now_ms < start.saturating_add(self.duration_ms),
            None => false,
        }
    }

    /// True once the armed period has elapsed and until [`clear`](Self::clear)
    /// is called.  Callers clear (or re-arm) on detection, which makes this a
    /// one-shot per arm/clear cycle.
    pub fn just_expired(&self, now_ms: u64) -> bool {
        self.started_at_ms.is_some() && !self.is_active(now_ms)
    }

    /// Whether the timer has been armed and not yet cleared.
    pub fn is_armed(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }
}
