//! Motorised window driver.
//!
//! Two drive lines, one per direction, and no position sensor.  A move
//! asserts one line for a fixed time; the window is then assumed to be at
//! the end stop and both lines are released by [`settle`](WindowPort::settle).
//!
//! ## Line discipline
//!
//! The opposing line is always released before a line is asserted, so both
//! are never high at once.  Reversing mid-move is allowed and restarts the
//! move timer.

use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::app::ports::WindowPort;
use crate::timer::ActuatorTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Open,
    Close,
}

pub struct WindowDriver<PO, PC> {
    open_pin: PO,
    close_pin: PC,
    move_timer: ActuatorTimer,
    open: bool,
    last_opened_ms: Option<u64>,
}

impl<PO: OutputPin, PC: OutputPin> WindowDriver<PO, PC> {
    /// Driver assuming the window starts closed.  Call `close` once at
    /// startup to make that true.
    pub fn new(open_pin: PO, close_pin: PC, move_ms: u64) -> Self {
        Self {
            open_pin,
            close_pin,
            move_timer: ActuatorTimer::new(move_ms),
            open: false,
            last_opened_ms: None,
        }
    }

    /// When `open` was last commanded.
    pub fn last_opened_ms(&self) -> Option<u64> {
        self.last_opened_ms
    }

    /// Whole seconds since the window was last commanded open.
    pub fn seconds_since_open(&self, now_ms: u64) -> Option<u64> {
        self.last_opened_ms
            .map(|t| now_ms.saturating_sub(t) / 1000)
    }

    pub fn open_pin(&self) -> &PO {
        &self.open_pin
    }

    pub fn close_pin(&self) -> &PC {
        &self.close_pin
    }

    fn start_move(&mut self, line: Line, now_ms: u64) {
        let want_open = line == Line::Open;
        if self.open == want_open && self.move_timer.is_active(now_ms) {
            debug!("Window already moving {:?}, ignoring", line);
            return;
        }
        // Release the opposing line first.
        match line {
            Line::Open => {
                set_line(&mut self.close_pin, false, "close");
                set_line(&mut self.open_pin, true, "open");
                self.last_opened_ms = Some(now_ms);
            }
            Line::Close => {
                set_line(&mut self.open_pin, false, "open");
                set_line(&mut self.close_pin, true, "close");
            }
        }
        self.open = want_open;
        self.move_timer.arm(now_ms);
        info!("Window moving {:?} for {} ms", line, self.move_timer.duration_ms());
    }
}

fn set_line<P: OutputPin>(pin: &mut P, high: bool, which: &str) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        warn!("Window: failed to drive {} line: {:?}", which, e);
    }
}

impl<PO: OutputPin, PC: OutputPin> WindowPort for WindowDriver<PO, PC> {
    fn open(&mut self, now_ms: u64) {
        self.start_move(Line::Open, now_ms);
    }

    fn close(&mut self, now_ms: u64) {
        self.start_move(Line::Close, now_ms);
    }

    fn is_open(&self) -> bool {
        self.open
    }

    /// Drive line still asserted; clears on the `settle` after the move
    /// time, not the instant it passes.
    fn is_moving(&self) -> bool {
        self.move_timer.is_armed()
    }

    fn settle(&mut self, now_ms: u64) -> bool {
        if !self.move_timer.just_expired(now_ms) {
            return false;
        }
        set_line(&mut self.open_pin, false, "open");
        set_line(&mut self.close_pin, false, "close");
        self.move_timer.clear();
        true
    }
}
