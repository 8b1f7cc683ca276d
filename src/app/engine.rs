//! Decision engine — pure rules turning readings, trends and thresholds into
//! actuator transitions.
//!
//! Every rule returns `Option<Decision>`: `None` means "leave the actuator
//! alone".  Rules are hysteretic by construction:
//!
//! - an actuator already in the requested state is never re-triggered;
//! - switching off needs a *different* condition than switching on
//!   (a fall limit or the min threshold vs. a rise limit or the max).
//!
//! The absolute thresholds are checked alongside the trend rules and either
//! one alone is enough.  Non-finite inputs compare false everywhere, so an
//! undefined reading never causes a transition.

use crate::trend::TrendWindow;

use super::events::{Decision, Reason, Transition};
use super::ports::SettingsPort;

/// Everything one evaluation pass looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateInputs {
    pub temperature_f: f32,
    pub humidity: f32,
    /// Temperature change over the short (fan) window.
    pub short_delta_f: f32,
    /// Temperature change over the long (window) window.
    pub long_delta_f: f32,
    pub target_temp_f: f32,
    pub max_temp_f: f32,
    pub min_temp_f: f32,
    pub target_humidity: f32,
}

impl ClimateInputs {
    /// Snapshot readings, trend deltas and the current thresholds.
    pub fn gather(
        temperature_f: f32,
        humidity: f32,
        trend: &TrendWindow,
        settings: &impl SettingsPort,
    ) -> Self {
        Self {
            temperature_f,
            humidity,
            short_delta_f: trend.delta_over(settings.temp_short_delta_s()),
            long_delta_f: trend.delta_over(settings.temp_long_delta_s()),
            target_temp_f: settings.target_temp_f(),
            max_temp_f: settings.max_temp_f(),
            min_temp_f: settings.min_temp_f(),
            target_humidity: settings.target_humidity(),
        }
    }

    pub fn over_max_temp(&self) -> bool {
        self.temperature_f > self.max_temp_f
    }

    pub fn under_min_temp(&self) -> bool {
        self.temperature_f < self.min_temp_f
    }

    pub fn humidity_low(&self) -> bool {
        self.humidity < self.target_humidity
    }

    pub fn at_short_rise_limit(&self) -> bool {
        at_rise_limit(self.temperature_f, self.short_delta_f, self.target_temp_f)
    }

    pub fn at_long_rise_limit(&self) -> bool {
        at_rise_limit(self.temperature_f, self.long_delta_f, self.target_temp_f)
    }

    pub fn at_short_fall_limit(&self) -> bool {
        at_fall_limit(self.temperature_f, self.short_delta_f, self.target_temp_f)
    }

    pub fn at_long_fall_limit(&self) -> bool {
        at_fall_limit(self.temperature_f, self.long_delta_f, self.target_temp_f)
    }
}

/// Rising, and one more period at this rate reaches the target.
pub fn at_rise_limit(temperature_f: f32, delta_f: f32, target_f: f32) -> bool {
    delta_f > 0.0 && temperature_f + delta_f >= target_f
}

/// Falling, and one more period at this rate reaches the target.
pub fn at_fall_limit(temperature_f: f32, delta_f: f32, target_f: f32) -> bool {
    delta_f < 0.0 && temperature_f + delta_f <= target_f
}

// ── Fan ───────────────────────────────────────────────────────

/// Fan OFF → ON.  Only ever runs with the window open.
pub fn need_fan_on(inputs: &ClimateInputs, fan_on: bool, window_open: bool) -> Option<Decision> {
    if fan_on || !window_open {
        return None;
    }
    if inputs.at_short_rise_limit() {
        return Some(Decision::new(
            Transition::FanOn,
            Reason::ShortRiseLimit,
            inputs.short_delta_f,
        ));
    }
    if inputs.over_max_temp() {
        return Some(Decision::new(
            Transition::FanOn,
            Reason::OverMaxTemp,
            inputs.temperature_f,
        ));
    }
    None
}

/// Fan ON → OFF.
pub fn need_fan_off(inputs: &ClimateInputs, fan_on: bool) -> Option<Decision> {
    if !fan_on {
        return None;
    }
    if inputs.at_short_fall_limit() {
        return Some(Decision::new(
            Transition::FanOff,
            Reason::ShortFallLimit,
            inputs.short_delta_f,
        ));
    }
    if inputs.under_min_temp() {
        return Some(Decision::new(
            Transition::FanOff,
            Reason::UnderMinTemp,
            inputs.temperature_f,
        ));
    }
    None
}

pub fn decide_fan(inputs: &ClimateInputs, fan_on: bool, window_open: bool) -> Option<Decision> {
    need_fan_on(inputs, fan_on, window_open).or_else(|| need_fan_off(inputs, fan_on))
}

// ── Window ────────────────────────────────────────────────────

/// Window CLOSED → OPEN.
pub fn need_window_opened(inputs: &ClimateInputs, window_open: bool) -> Option<Decision> {
    if window_open {
        return None;
    }
    if inputs.at_long_rise_limit() {
        return Some(Decision::new(
            Transition::WindowOpen,
            Reason::LongRiseLimit,
            inputs.long_delta_f,
        ));
    }
    if inputs.over_max_temp() {
        return Some(Decision::new(
            Transition::WindowOpen,
            Reason::OverMaxTemp,
            inputs.temperature_f,
        ));
    }
    None
}

/// Window OPEN → CLOSED.
pub fn need_window_closed(inputs: &ClimateInputs, window_open: bool) -> Option<Decision> {
    if !window_open {
        return None;
    }
    if inputs.at_long_fall_limit() {
        return Some(Decision::new(
            Transition::WindowClose,
            Reason::LongFallLimit,
            inputs.long_delta_f,
        ));
    }
    if inputs.under_min_temp() {
        return Some(Decision::new(
            Transition::WindowClose,
            Reason::UnderMinTemp,
            inputs.temperature_f,
        ));
    }
    None
}

pub fn decide_window(inputs: &ClimateInputs, window_open: bool) -> Option<Decision> {
    need_window_opened(inputs, window_open).or_else(|| need_window_closed(inputs, window_open))
}

// ── Mist ──────────────────────────────────────────────────────

/// Mist OFF → ON, from the rest state of the duty cycle.
/// The timing side lives in [`MistCycle`](super::mist::MistCycle).
pub fn need_mist_on(inputs: &ClimateInputs, mist_on: bool) -> Option<Decision> {
    if mist_on {
        return None;
    }
    if inputs.humidity_low() {
        return Some(Decision::new(
            Transition::MistOn,
            Reason::HumidityLow,
            inputs.humidity,
        ));
    }
    if inputs.over_max_temp() {
        return Some(Decision::new(
            Transition::MistOn,
            Reason::OverMaxTemp,
            inputs.temperature_f,
        ));
    }
    None
}
