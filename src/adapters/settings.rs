//! JSON settings adapter.
//!
//! Holds the last accepted settings document.  A new document is applied
//! only when its `Last-Modified` stamp differs from the current one, and a
//! malformed or invalid document leaves the current settings in place.
//! Delta windows are checked against the controller's sample spacing, so an
//! accepted document never asks for more history than the trend can hold.

use log::{debug, info, warn};

use crate::app::ports::SettingsPort;
use crate::config::{ClimateSettings, SystemConfig};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    current: ClimateSettings,
    last_modified: Option<String>,
    system: SystemConfig,
}

impl JsonSettings {
    /// Start from the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults, validating later documents against `system`.
    pub fn for_config(system: &SystemConfig) -> Self {
        Self {
            system: system.clone(),
            ..Self::default()
        }
    }

    /// Parse and validate a complete document against the default
    /// controller timing.
    pub fn from_json(body: &str) -> Result<Self, ConfigError> {
        let system = SystemConfig::default();
        let current = parse(body, &system)?;
        Ok(Self {
            current,
            last_modified: None,
            system,
        })
    }

    /// Apply a fetched document.
    ///
    /// Returns `Ok(false)` when `last_modified` matches the stamp of the
    /// current document, `Ok(true)` when the new settings were taken.  On
    /// error the current settings are kept.
    pub fn apply(&mut self, body: &str, last_modified: Option<&str>) -> Result<bool, ConfigError> {
        if let (Some(new), Some(old)) = (last_modified, self.last_modified.as_deref()) {
            if new == old {
                debug!("Settings unchanged (Last-Modified {})", new);
                return Ok(false);
            }
        }
        let settings = parse(body, &self.system).inspect_err(|e| {
            warn!("Rejected settings document: {}", e);
        })?;
        if settings != self.current {
            info!("Settings updated: {:?}", settings);
        }
        self.current = settings;
        self.last_modified = last_modified.map(str::to_string);
        Ok(true)
    }

    pub fn current(&self) -> &ClimateSettings {
        &self.current
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }
}

fn parse(body: &str, system: &SystemConfig) -> Result<ClimateSettings, ConfigError> {
    let settings: ClimateSettings = serde_json::from_str(body)?;
    settings.validate_for(system)?;
    Ok(settings)
}

impl SettingsPort for JsonSettings {
    fn target_temp_f(&self) -> f32 {
        self.current.target_temp_f
    }

    fn max_temp_f(&self) -> f32 {
        self.current.max_temp_f
    }

    fn min_temp_f(&self) -> f32 {
        self.current.min_temp_f
    }

    fn temp_short_delta_s(&self) -> u32 {
        self.current.temp_short_delta_s
    }

    fn temp_long_delta_s(&self) -> u32 {
        self.current.temp_long_delta_s
    }

    fn target_humidity(&self) -> f32 {
        self.current.target_humidity
    }

    fn mist_on_s(&self) -> u32 {
        self.current.mist_on_s
    }

    fn mist_off_s(&self) -> u32 {
        self.current.mist_off_s
    }
}
