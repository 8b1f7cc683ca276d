//! Simulated climate probe for the host binary and tests.
//!
//! Holds the values it will report.  A failing probe reports
//! [`SensorError::ReadFailed`] for every read until cleared.

use crate::error::SensorError;

use super::ClimateReader;

#[derive(Debug, Clone)]
pub struct SimClimateReader {
    temperature_f: f32,
    humidity: f32,
    failing: bool,
}

impl SimClimateReader {
    pub fn new(temperature_f: f32, humidity: f32) -> Self {
        Self {
            temperature_f,
            humidity,
            failing: false,
        }
    }

    pub fn set_temperature(&mut self, temperature_f: f32) {
        self.temperature_f = temperature_f;
    }

    pub fn set_humidity(&mut self, humidity: f32) {
        self.humidity = humidity;
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn temperature_f(&self) -> f32 {
        self.temperature_f
    }

    pub fn humidity(&self) -> f32 {
        self.humidity
    }
}

impl ClimateReader for SimClimateReader {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        if self.failing {
            return Err(SensorError::ReadFailed);
        }
        Ok(self.temperature_f)
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        if self.failing {
            return Err(SensorError::ReadFailed);
        }
        Ok(self.humidity)
    }
}
