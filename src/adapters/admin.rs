//! Admin console adapter.
//!
//! Parses an operator's command line into an [`AdminCommand`] and renders
//! the reply from the service's read-only queries.  The only state it
//! changes is whether the [`LogEventSink`] writes events.

use core::fmt::Write as _;

use log::info;

use crate::app::commands::AdminCommand;
use crate::app::ports::{SensorPort, SwitchPort, WindowPort};
use crate::app::service::ClimateService;
use crate::error::CommandError;

use super::log_sink::LogEventSink;

/// Stateless command handler; the service and sink are borrowed per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminConsole;

impl AdminConsole {
    pub fn new() -> Self {
        Self
    }

    /// Parse and run one command line, returning the text reply.
    pub fn execute<S, F, W, M>(
        &self,
        line: &str,
        service: &ClimateService<S, F, W, M>,
        sink: &mut LogEventSink,
    ) -> Result<String, CommandError>
    where
        S: SensorPort,
        F: SwitchPort,
        W: WindowPort,
        M: SwitchPort,
    {
        let cmd: AdminCommand = line.parse()?;
        info!("Admin command: {:?}", cmd);
        Ok(self.run(cmd, service, sink))
    }

    pub fn run<S, F, W, M>(
        &self,
        cmd: AdminCommand,
        service: &ClimateService<S, F, W, M>,
        sink: &mut LogEventSink,
    ) -> String
    where
        S: SensorPort,
        F: SwitchPort,
        W: WindowPort,
        M: SwitchPort,
    {
        match cmd {
            AdminCommand::Status => {
                let s = service.status();
                format!(
                    "temp {:.1}F humidity {:.0}% | fan {} | window {}{} | mist {} | \
                     {} samples, {} ticks",
                    s.temperature_f,
                    s.humidity,
                    if s.fan_on { "on" } else { "off" },
                    if s.window_open { "open" } else { "closed" },
                    if s.window_moving { " (moving)" } else { "" },
                    if s.mist_on { "on" } else { "off" },
                    s.samples,
                    s.tick_count,
                )
            }
            AdminCommand::History => {
                let trend = service.trend();
                let mut out = format!(
                    "{} samples every {} s, oldest first:",
                    trend.len(),
                    trend.collection_period_ms() / 1000
                );
                for value in trend.values() {
                    let _ = write!(out, " {:.1}", value);
                }
                out
            }
            AdminCommand::Delta => {
                let s = service.status();
                format!(
                    "short delta {:+.2}F | long delta {:+.2}F",
                    s.short_delta_f, s.long_delta_f
                )
            }
            AdminCommand::EnableEvents => {
                sink.set_enabled(true);
                "event logging enabled".to_string()
            }
            AdminCommand::DisableEvents => {
                sink.set_enabled(false);
                "event logging disabled".to_string()
            }
        }
    }
}
