//! Sensor subsystem — the raw probe trait and the last-known-good wrapper
//! the control loop reads through.
//!
//! A failed or implausible read must not stall the loop or force a
//! decision: [`LastGoodSensor`] keeps the previous good value and only logs
//! the failure.

pub mod sim;

use log::warn;

use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// A temperature/humidity probe that may fail.
pub trait ClimateReader {
    /// Air temperature in °F.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Relative humidity in %.
    fn read_humidity(&mut self) -> Result<f32, SensorError>;
}

/// [`SensorPort`] over a [`ClimateReader`], substituting the last good value
/// for any failed or non-finite read.  Before the first good read the value
/// is NaN, which every decision rule treats as "no transition".
pub struct LastGoodSensor<R> {
    reader: R,
    last_temperature_f: f32,
    last_humidity: f32,
    failures: u32,
}

impl<R: ClimateReader> LastGoodSensor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            last_temperature_f: f32::NAN,
            last_humidity: f32::NAN,
            failures: 0,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Total failed reads since creation.
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Accept `reading` into `last` if it is a finite value.
fn accept(
    reading: Result<f32, SensorError>,
    last: &mut f32,
    failures: &mut u32,
    what: &str,
) -> f32 {
    let checked = reading.and_then(|v| {
        if v.is_finite() {
            Ok(v)
        } else {
            Err(SensorError::NotFinite)
        }
    });
    match checked {
        Ok(v) => *last = v,
        Err(e) => {
            *failures = failures.saturating_add(1);
            warn!("{} read failed ({}), using last value {:.2}", what, e, *last);
        }
    }
    *last
}

impl<R: ClimateReader> SensorPort for LastGoodSensor<R> {
    fn current_temperature(&mut self) -> f32 {
        let reading = self.reader.read_temperature();
        accept(
            reading,
            &mut self.last_temperature_f,
            &mut self.failures,
            "Temperature",
        )
    }

    fn current_humidity(&mut self) -> f32 {
        let reading = self.reader.read_humidity();
        accept(reading, &mut self.last_humidity, &mut self.failures, "Humidity")
    }
}
