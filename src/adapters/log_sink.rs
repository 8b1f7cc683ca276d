//! Log-based event sink adapters.
//!
//! [`LogEventSink`] writes structured application events through the `log`
//! facade.  It can be muted from the admin console; muting only affects
//! what is written, never what is decided.  [`NullEventSink`] drops
//! everything.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] while enabled.
pub struct LogEventSink {
    enabled: bool,
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if !self.enabled {
            return;
        }
        match event {
            AppEvent::Started => {
                info!("START | fan=off mist=off window=closing");
            }
            AppEvent::Transition(d) => {
                info!(
                    "ACT   | {:?} | reason={} | trigger={:.2}",
                    d.transition, d.reason, d.trigger
                );
            }
            AppEvent::WindowSettled { open } => {
                info!("ACT   | window stopped {}", if *open { "open" } else { "closed" });
            }
            AppEvent::Heartbeat(s) => {
                info!(
                    "BEAT  | greenhouse monitor running | T={:.1}F RH={:.0}% | \
                     dT short={:+.2} long={:+.2} | fan={} window={}{} mist={} | \
                     samples={} ticks={}",
                    s.temperature_f,
                    s.humidity,
                    s.short_delta_f,
                    s.long_delta_f,
                    on_off(s.fan_on),
                    if s.window_open { "open" } else { "closed" },
                    if s.window_moving { "(moving)" } else { "" },
                    on_off(s.mist_on),
                    s.samples,
                    s.tick_count,
                );
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: &AppEvent) {}
}
