//! Application service — the hexagonal core.
//!
//! [`ClimateService`] owns the temperature trend, the mister duty cycle and
//! the actuator adapters.  One [`monitor`](ClimateService::monitor) call is
//! one control tick.  Time and thresholds are passed in at the call site so
//! the whole service runs deterministically under test.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        ClimateService         │
//! SettingsPort ──▶│  Trend · Engine · MistCycle   │──▶ fan / window / mist
//!                 └──────────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::SystemConfig;
use crate::trend::TrendWindow;

use super::engine::{ClimateInputs, decide_fan, decide_window};
use super::events::{AppEvent, Decision, StatusReport, Transition};
use super::mist::{MistCycle, MistStep};
use super::ports::{EventSink, SensorPort, SettingsPort, SwitchPort, WindowPort};

// ───────────────────────────────────────────────────────────────
// ClimateContext
// ───────────────────────────────────────────────────────────────

/// The adapters the service drives.  Nothing outside the service writes
/// actuator state.
pub struct ClimateContext<S, F, W, M> {
    pub sensor: S,
    pub fan: F,
    pub window: W,
    pub mist: M,
}

// ───────────────────────────────────────────────────────────────
// ClimateService
// ───────────────────────────────────────────────────────────────

pub struct ClimateService<S, F, W, M> {
    ctx: ClimateContext<S, F, W, M>,
    trend: TrendWindow,
    mist_cycle: MistCycle,
    last_inputs: Option<ClimateInputs>,
    tick_count: u64,
}

impl<S, F, W, M> ClimateService<S, F, W, M>
where
    S: SensorPort,
    F: SwitchPort,
    W: WindowPort,
    M: SwitchPort,
{
    /// Build the service.  The trend window is sized for the longer of the
    /// two delta windows in `settings`.
    ///
    /// Does **not** touch the actuators — call [`start`](Self::start) next.
    pub fn new(
        ctx: ClimateContext<S, F, W, M>,
        settings: &impl SettingsPort,
        config: &SystemConfig,
    ) -> Self {
        let longest = settings
            .temp_short_delta_s()
            .max(settings.temp_long_delta_s());
        let trend = TrendWindow::for_longest_delta(longest, config.collection_period_s);
        info!(
            "ClimateService: trend window {} samples every {} s",
            trend.capacity(),
            config.collection_period_s
        );
        Self {
            ctx,
            trend,
            mist_cycle: MistCycle::new(settings.mist_on_s(), settings.mist_off_s()),
            last_inputs: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every actuator to a known state: fan off, mist off, window
    /// closing.  There is no position feedback, so this is the only point at
    /// which software and hardware state are guaranteed to agree.
    ///
    /// The mister starts at rest, not in a pause, so dry air gets a dose on
    /// the first tick.  A controller caught in a reboot loop therefore doses
    /// once per boot.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        self.ctx.fan.turn_off();
        self.ctx.mist.turn_off();
        self.ctx.window.close(now_ms);
        self.mist_cycle.rest();
        sink.emit(&AppEvent::Started);
        info!("ClimateService started: fan off, mist off, window closing");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control tick: sample → trend → fan → window → mist → window
    /// self-timeout.
    ///
    /// The window decision is evaluated before the fan so the fan can follow
    /// a window opening in the same tick; transitions are still applied fan
    /// first.
    pub fn monitor(
        &mut self,
        now_ms: u64,
        settings: &impl SettingsPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. One consistent reading per tick.  The windows may have changed
        // since the last tick, so the history is grown to answer both.
        self.trend.ensure_capacity_for(
            settings
                .temp_short_delta_s()
                .max(settings.temp_long_delta_s()),
        );
        let temperature_f = self.ctx.sensor.current_temperature();
        let humidity = self.ctx.sensor.current_humidity();
        if self.trend.add_if_ready(now_ms, temperature_f) {
            debug!("Trend sample {:.2} F ({} stored)", temperature_f, self.trend.len());
        }

        // 2. Decisions
        let inputs = ClimateInputs::gather(temperature_f, humidity, &self.trend, settings);
        self.last_inputs = Some(inputs);

        let window_open = self.ctx.window.is_open();
        let window_decision = decide_window(&inputs, window_open);
        let window_open_after = match window_decision {
            Some(d) => d.transition == Transition::WindowOpen,
            None => window_open,
        };
        let fan_decision = decide_fan(&inputs, self.ctx.fan.is_on(), window_open_after);

        // 3. Apply: fan, then window, then mist
        if let Some(decision) = fan_decision {
            self.apply(decision, now_ms, sink);
        }
        if let Some(decision) = window_decision {
            self.apply(decision, now_ms, sink);
        }
        self.mist_cycle.update_durations(settings);
        match self.mist_cycle.step(now_ms, &inputs, self.ctx.mist.is_on()) {
            MistStep::Hold => {}
            MistStep::Pause(decision) => self.apply(decision, now_ms, sink),
            MistStep::Start(decision) => {
                self.mist_cycle.rest();
                self.apply(decision, now_ms, sink);
            }
            MistStep::Idle => self.mist_cycle.rest(),
        }

        // 4. Window self-timeout, every tick
        if self.ctx.window.settle(now_ms) {
            let open = self.ctx.window.is_open();
            info!("Window stopped ({})", if open { "open" } else { "closed" });
            sink.emit(&AppEvent::WindowSettled { open });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the last tick's readings and the current actuator state.
    /// Readings are NaN before the first tick.
    pub fn status(&self) -> StatusReport {
        let (temperature_f, humidity, short_delta_f, long_delta_f) = match self.last_inputs {
            Some(i) => (i.temperature_f, i.humidity, i.short_delta_f, i.long_delta_f),
            None => (f32::NAN, f32::NAN, 0.0, 0.0),
        };
        StatusReport {
            temperature_f,
            humidity,
            short_delta_f,
            long_delta_f,
            fan_on: self.ctx.fan.is_on(),
            window_open: self.ctx.window.is_open(),
            window_moving: self.ctx.window.is_moving(),
            mist_on: self.ctx.mist.is_on(),
            samples: self.trend.len(),
            tick_count: self.tick_count,
        }
    }

    /// Inputs evaluated on the last tick.
    pub fn last_inputs(&self) -> Option<&ClimateInputs> {
        self.last_inputs.as_ref()
    }

    pub fn trend(&self) -> &TrendWindow {
        &self.trend
    }

    pub fn mist_cycle(&self) -> &MistCycle {
        &self.mist_cycle
    }

    pub fn context(&self) -> &ClimateContext<S, F, W, M> {
        &self.ctx
    }

    /// Mutable access to the adapters, for simulations that feed the sensor.
    pub fn context_mut(&mut self) -> &mut ClimateContext<S, F, W, M> {
        &mut self.ctx
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate a decision into port calls.
    fn apply(&mut self, decision: Decision, now_ms: u64, sink: &mut impl EventSink) {
        let Decision {
            transition,
            reason,
            trigger,
        } = decision;
        match transition {
            Transition::FanOn => {
                info!("Turning fan on: {} ({:.2})", reason, trigger);
                self.ctx.fan.turn_on();
            }
            Transition::FanOff => {
                info!("Turning fan off: {} ({:.2})", reason, trigger);
                self.ctx.fan.turn_off();
            }
            Transition::WindowOpen => {
                info!("Opening window: {} ({:.2})", reason, trigger);
                self.ctx.window.open(now_ms);
            }
            Transition::WindowClose => {
                info!("Closing window: {} ({:.2})", reason, trigger);
                self.ctx.window.close(now_ms);
            }
            Transition::MistOn => {
                info!("Turning mist on: {} ({:.2})", reason, trigger);
                self.ctx.mist.turn_on();
                self.mist_cycle.begin_dose(now_ms);
            }
            Transition::MistOff => {
                info!("Turning mist off: {} ({:.2})", reason, trigger);
                self.ctx.mist.turn_off();
                self.mist_cycle.begin_pause(now_ms);
            }
        }
        sink.emit(&AppEvent::Transition(decision));
    }
}
