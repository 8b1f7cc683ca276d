//! Mister duty cycle.
//!
//! The mister alternates between a dose (on for `mist_on_s`) and a mandatory
//! pause (off for `mist_off_s`).  While either timer runs nothing else is
//! decided for the mister.  Once both have lapsed the cycle is at rest and
//! the humidity / temperature rule may start a new dose.
//!
//! ```text
//!           need_mist_on            on timer lapsed
//!   Rest ───────────────▶ Dosing ───────────────▶ Pausing
//!    ▲                                               │
//!    └──────────────── off timer lapsed ─────────────┘
//! ```

use log::debug;

use crate::timer::ActuatorTimer;

use super::engine::{ClimateInputs, need_mist_on};
use super::events::{Decision, Reason, Transition};
use super::ports::SettingsPort;

/// What the duty cycle wants done this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MistStep {
    /// A dose or a pause is still running.
    Hold,
    /// The dose is over: switch off and start the pause.
    Pause(Decision),
    /// At rest and the rule asks for mist: switch on and start a dose.
    Start(Decision),
    /// At rest, nothing to do.
    Idle,
}

/// Dose and pause timers for the mister.
#[derive(Debug, Clone)]
pub struct MistCycle {
    on_timer: ActuatorTimer,
    off_timer: ActuatorTimer,
}

impl MistCycle {
    pub fn new(mist_on_s: u32, mist_off_s: u32) -> Self {
        Self {
            on_timer: ActuatorTimer::new(secs_to_ms(mist_on_s)),
            off_timer: ActuatorTimer::new(secs_to_ms(mist_off_s)),
        }
    }

    /// Pick up changed durations.  A running timer keeps its start time, so a
    /// shortened dose may end on the next tick.
    pub fn update_durations(&mut self, settings: &impl SettingsPort) {
        self.on_timer.set_duration_ms(secs_to_ms(settings.mist_on_s()));
        self.off_timer
            .set_duration_ms(secs_to_ms(settings.mist_off_s()));
    }

    /// Decide the mister's next step.  Does not change any timer.
    pub fn step(&self, now_ms: u64, inputs: &ClimateInputs, mist_on: bool) -> MistStep {
        if self.on_timer.is_active(now_ms) || self.off_timer.is_active(now_ms) {
            return MistStep::Hold;
        }
        if self.on_timer.just_expired(now_ms) {
            return MistStep::Pause(Decision::new(
                Transition::MistOff,
                Reason::MistOffPeriod,
                inputs.humidity,
            ));
        }
        match need_mist_on(inputs, mist_on) {
            Some(decision) => MistStep::Start(decision),
            None => MistStep::Idle,
        }
    }

    /// Mister switched on: run the dose timer.
    pub fn begin_dose(&mut self, now_ms: u64) {
        self.off_timer.clear();
        self.on_timer.arm(now_ms);
        debug!("MistCycle: dose started at {} ms", now_ms);
    }

    /// Mister switched off after a dose: run the pause timer.
    pub fn begin_pause(&mut self, now_ms: u64) {
        self.on_timer.clear();
        self.off_timer.arm(now_ms);
        debug!("MistCycle: pause started at {} ms", now_ms);
    }

    /// Both timers lapsed: forget them.
    pub fn rest(&mut self) {
        self.on_timer.clear();
        self.off_timer.clear();
    }

    pub fn is_dosing(&self, now_ms: u64) -> bool {
        self.on_timer.is_active(now_ms)
    }

    pub fn is_pausing(&self, now_ms: u64) -> bool {
        self.off_timer.is_active(now_ms)
    }
}

fn secs_to_ms(secs: u32) -> u64 {
    u64::from(secs) * 1000
}
