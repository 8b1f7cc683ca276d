//! Controller configuration.
//!
//! Two groups of tunables:
//!
//! - [`ClimateSettings`] — the greenhouse thresholds that the remote settings
//!   document may override (temperatures in °F, humidity in %RH).
//! - [`SystemConfig`] — timing of the controller itself (sample spacing,
//!   window travel time, loop cadence).
//!
//! Both deserialize from partial JSON: any missing key takes its default.

use serde::{Deserialize, Serialize};

use crate::app::ports::SettingsPort;
use crate::error::ConfigError;
use crate::trend::MAX_TREND_SAMPLES;

// Defaults for the remote settings document.
pub const DEFAULT_TARGET_TEMP_F: f32 = 70.0;
pub const DEFAULT_MAX_TEMP_F: f32 = 80.0;
pub const DEFAULT_MIN_TEMP_F: f32 = 60.0;
pub const DEFAULT_TEMP_SHORT_DELTA_S: u32 = 5 * 60;
pub const DEFAULT_TEMP_LONG_DELTA_S: u32 = 60 * 60;
pub const DEFAULT_TARGET_HUMIDITY: f32 = 60.0;
pub const DEFAULT_MIST_ON_S: u32 = 30;
pub const DEFAULT_MIST_OFF_S: u32 = 2 * 60;

/// Greenhouse thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateSettings {
    /// Temperature the greenhouse is steered towards.
    pub target_temp_f: f32,
    /// Above this the window opens and the fan runs regardless of trend.
    pub max_temp_f: f32,
    /// Below this the window closes and the fan stops regardless of trend.
    pub min_temp_f: f32,
    /// Look-back for the fan's rise/fall rule.
    #[serde(alias = "temp_short_detla_s")]
    pub temp_short_delta_s: u32,
    /// Look-back for the window's rise/fall rule.
    #[serde(alias = "temp_long_detla_s")]
    pub temp_long_delta_s: u32,
    /// Misting starts below this relative humidity.
    pub target_humidity: f32,
    /// Length of one misting dose.
    pub mist_on_s: u32,
    /// Mandatory pause after each dose.
    pub mist_off_s: u32,
}

impl Default for ClimateSettings {
    fn default() -> Self {
        Self {
            target_temp_f: DEFAULT_TARGET_TEMP_F,
            max_temp_f: DEFAULT_MAX_TEMP_F,
            min_temp_f: DEFAULT_MIN_TEMP_F,
            temp_short_delta_s: DEFAULT_TEMP_SHORT_DELTA_S,
            temp_long_delta_s: DEFAULT_TEMP_LONG_DELTA_S,
            target_humidity: DEFAULT_TARGET_HUMIDITY,
            mist_on_s: DEFAULT_MIST_ON_S,
            mist_off_s: DEFAULT_MIST_OFF_S,
        }
    }
}

impl ClimateSettings {
    /// Reject settings that would make the rules contradict each other.
    /// Values are never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let temps = [self.target_temp_f, self.max_temp_f, self.min_temp_f];
        if temps.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::ValidationFailed("temperatures must be finite"));
        }
        if self.min_temp_f >= self.target_temp_f {
            return Err(ConfigError::ValidationFailed(
                "min_temp_f must be below target_temp_f",
            ));
        }
        if self.target_temp_f >= self.max_temp_f {
            return Err(ConfigError::ValidationFailed(
                "target_temp_f must be below max_temp_f",
            ));
        }
        if !(0.0..=100.0).contains(&self.target_humidity) {
            return Err(ConfigError::ValidationFailed(
                "target_humidity must be within 0-100",
            ));
        }
        if self.temp_short_delta_s == 0 || self.temp_long_delta_s == 0 {
            return Err(ConfigError::ValidationFailed("delta windows must be non-zero"));
        }
        if self.temp_short_delta_s > self.temp_long_delta_s {
            return Err(ConfigError::ValidationFailed(
                "temp_short_delta_s must not exceed temp_long_delta_s",
            ));
        }
        if self.mist_on_s == 0 || self.mist_off_s == 0 {
            return Err(ConfigError::ValidationFailed("mist durations must be non-zero"));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus checks that both delta windows
    /// can be answered at `config`'s sample spacing.
    pub fn validate_for(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        self.validate()?;
        if self.temp_short_delta_s < config.collection_period_s {
            return Err(ConfigError::ValidationFailed(
                "temp_short_delta_s must span at least one collection period",
            ));
        }
        if u64::from(self.temp_long_delta_s) > config.max_delta_window_s() {
            return Err(ConfigError::ValidationFailed(
                "temp_long_delta_s exceeds the stored trend history",
            ));
        }
        Ok(())
    }
}

impl SettingsPort for ClimateSettings {
    fn target_temp_f(&self) -> f32 {
        self.target_temp_f
    }

    fn max_temp_f(&self) -> f32 {
        self.max_temp_f
    }

    fn min_temp_f(&self) -> f32 {
        self.min_temp_f
    }

    fn temp_short_delta_s(&self) -> u32 {
        self.temp_short_delta_s
    }

    fn temp_long_delta_s(&self) -> u32 {
        self.temp_long_delta_s
    }

    fn target_humidity(&self) -> f32 {
        self.target_humidity
    }

    fn mist_on_s(&self) -> u32 {
        self.mist_on_s
    }

    fn mist_off_s(&self) -> u32 {
        self.mist_off_s
    }
}

/// Controller timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Minimum spacing between recorded temperature samples (seconds).
    pub collection_period_s: u32,
    /// Time the window motor needs for a full open or close (seconds).
    pub window_move_s: u32,
    /// Cadence of the control loop (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Cadence of the "still running" heartbeat (seconds).
    pub heartbeat_interval_s: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            collection_period_s: 60,
            window_move_s: 20,
            control_loop_interval_ms: 1000, // 1 Hz
            heartbeat_interval_s: 10 * 60,
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection_period_s == 0 {
            return Err(ConfigError::ValidationFailed("collection_period_s must be non-zero"));
        }
        if self.window_move_s == 0 {
            return Err(ConfigError::ValidationFailed("window_move_s must be non-zero"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be non-zero",
            ));
        }
        if u64::from(self.control_loop_interval_ms) > u64::from(self.collection_period_s) * 1000 {
            return Err(ConfigError::ValidationFailed(
                "control loop must run at least once per collection period",
            ));
        }
        Ok(())
    }

    /// Longest delta window the trend history can answer.
    pub fn max_delta_window_s(&self) -> u64 {
        (MAX_TREND_SAMPLES as u64 - 1) * u64::from(self.collection_period_s)
    }

    pub fn window_move_ms(&self) -> u64 {
        u64::from(self.window_move_s) * 1000
    }
}
