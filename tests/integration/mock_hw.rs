//! Mock hardware for integration tests.
//!
//! Switches count every command so tests can assert that an actuator was
//! not re-triggered.  The window is the real [`WindowDriver`] over
//! [`SimPin`]s so the drive lines can be inspected.

use greenhouse::adapters::time::SimClock;
use greenhouse::app::events::{Actuator, AppEvent, Decision, Transition};
use greenhouse::app::ports::{Clock, EventSink, SwitchPort, WindowPort};
use greenhouse::app::service::{ClimateContext, ClimateService};
use greenhouse::config::{ClimateSettings, SystemConfig};
use greenhouse::drivers::{SimPin, WindowDriver};
use greenhouse::sensors::LastGoodSensor;
use greenhouse::sensors::sim::SimClimateReader;

pub const SECOND_MS: u64 = 1_000;
pub const MINUTE_MS: u64 = 60 * SECOND_MS;

// ── CountingSwitch ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CountingSwitch {
    on: bool,
    pub on_calls: u32,
    pub off_calls: u32,
}

impl SwitchPort for CountingSwitch {
    fn turn_on(&mut self) {
        self.on = true;
        self.on_calls += 1;
    }

    fn turn_off(&mut self) {
        self.on = false;
        self.off_calls += 1;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn decisions(&self) -> Vec<Decision> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Transition(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.decisions().iter().map(|d| d.transition).collect()
    }

    pub fn transitions_for(&self, actuator: Actuator) -> Vec<Transition> {
        self.transitions()
            .into_iter()
            .filter(|t| t.actuator() == actuator)
            .collect()
    }

    pub fn settled_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::WindowSettled { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestService = ClimateService<
    LastGoodSensor<SimClimateReader>,
    CountingSwitch,
    WindowDriver<SimPin, SimPin>,
    CountingSwitch,
>;

/// A started service on a manual clock at t = 0.
pub struct Harness {
    pub service: TestService,
    pub settings: ClimateSettings,
    pub sink: RecordingSink,
    pub clock: SimClock,
}

#[allow(dead_code)]
impl Harness {
    pub fn new(temperature_f: f32, humidity: f32) -> Self {
        Self::with_settings(temperature_f, humidity, ClimateSettings::default())
    }

    pub fn with_settings(temperature_f: f32, humidity: f32, settings: ClimateSettings) -> Self {
        let config = SystemConfig::default();
        let ctx = ClimateContext {
            sensor: LastGoodSensor::new(SimClimateReader::new(temperature_f, humidity)),
            fan: CountingSwitch::default(),
            window: WindowDriver::new(SimPin::new(), SimPin::new(), config.window_move_ms()),
            mist: CountingSwitch::default(),
        };
        let mut service = ClimateService::new(ctx, &settings, &config);
        let clock = SimClock::new(0);
        let mut sink = RecordingSink::default();
        service.start(clock.now_ms(), &mut sink);
        Self {
            service,
            settings,
            sink,
            clock,
        }
    }

    pub fn reader(&mut self) -> &mut SimClimateReader {
        self.service.context_mut().sensor.reader_mut()
    }

    pub fn set_temperature(&mut self, temperature_f: f32) {
        self.reader().set_temperature(temperature_f);
    }

    pub fn set_humidity(&mut self, humidity: f32) {
        self.reader().set_humidity(humidity);
    }

    /// Advance the clock by `ms` and run one control tick.
    pub fn tick_after(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.service
            .monitor(self.clock.now_ms(), &self.settings, &mut self.sink);
    }

    /// `count` ticks one minute apart at `temperature_f`.
    pub fn minutes_at(&mut self, count: usize, temperature_f: f32) {
        self.set_temperature(temperature_f);
        for _ in 0..count {
            self.tick_after(MINUTE_MS);
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn fan(&self) -> &CountingSwitch {
        &self.service.context().fan
    }

    pub fn mist(&self) -> &CountingSwitch {
        &self.service.context().mist
    }

    pub fn window(&self) -> &WindowDriver<SimPin, SimPin> {
        &self.service.context().window
    }

    pub fn window_open(&self) -> bool {
        self.window().is_open()
    }
}
