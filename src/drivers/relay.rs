//! On/off relay driver for the exhaust fan and the mister.
//!
//! One active-high output line per relay.  The commanded state is tracked in
//! software; a pin error is logged and the commanded state still changes,
//! since the switch has no feedback to tell us otherwise.

use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::app::ports::SwitchPort;

pub struct Relay<P> {
    name: &'static str,
    pin: P,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Wrap `pin`.  The line is left untouched until the first command.
    pub fn new(name: &'static str, pin: P) -> Self {
        Self {
            name,
            pin,
            on: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn drive(&mut self, high: bool) {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        let level = if high { "high" } else { "low" };
        if let Err(e) = result {
            warn!("{}: failed to drive relay line {}: {:?}", self.name, level, e);
        }
        self.on = high;
        debug!("{} relay line {}", self.name, level);
    }
}

impl<P: OutputPin> SwitchPort for Relay<P> {
    fn turn_on(&mut self) {
        self.drive(true);
    }

    fn turn_off(&mut self) {
        self.drive(false);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
