//! Greenhouse controller — host simulation entry point.
//!
//! Runs the real control core against simulated pins and a crude greenhouse
//! thermal model.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  LastGoodSensor    Relay / WindowDriver   JsonSettings         │
//! │  (SensorPort)      (Switch/WindowPort)    (SettingsPort)       │
//! │  LogEventSink      MonotonicClock         AdminConsole         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ClimateService (pure logic)                 │    │
//! │  │  Trend · Engine · MistCycle                            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven): Monitor · Heartbeat              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `greenhouse-sim [SETTINGS_JSON] [--fast]`
//!
//! Without `--fast` the loop runs in real time and reads admin commands
//! (`status`, `history`, `delta`, `enable logging`, `disable logging`)
//! from stdin.  With `--fast` two simulated days run as quickly as
//! possible.
#![deny(unused_must_use)]

use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use std::{env, fs, io, thread};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use greenhouse::adapters::admin::AdminConsole;
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::settings::JsonSettings;
use greenhouse::adapters::time::{MonotonicClock, SimClock};
use greenhouse::app::commands::AdminCommand;
use greenhouse::app::events::{AppEvent, StatusReport};
use greenhouse::app::ports::{Clock, EventSink, Job, SchedulerDelegate};
use greenhouse::app::service::{ClimateContext, ClimateService};
use greenhouse::config::SystemConfig;
use greenhouse::drivers::{Relay, SimPin, WindowDriver};
use greenhouse::scheduler::{Schedule, Scheduler};
use greenhouse::sensors::LastGoodSensor;
use greenhouse::sensors::sim::SimClimateReader;

type SimService = ClimateService<
    LastGoodSensor<SimClimateReader>,
    Relay<SimPin>,
    WindowDriver<SimPin, SimPin>,
    Relay<SimPin>,
>;

const FAST_RUN_MS: u64 = 48 * 60 * 60 * 1000;

// ── Command line ──────────────────────────────────────────────

struct Args {
    settings_path: Option<PathBuf>,
    fast: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        settings_path: None,
        fast: false,
    };
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--fast" => args.fast = true,
            opt if opt.starts_with("--") => bail!("unknown option '{}'", opt),
            path => {
                if args.settings_path.is_some() {
                    bail!("only one settings file may be given");
                }
                args.settings_path = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

/// Apply the settings file, stamped with its modification time so an
/// unchanged file is skipped on reload.
fn load_settings(path: &Path, settings: &mut JsonSettings) -> Result<bool> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("reading settings file {}", path.display()))?;
    let stamp = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(|t| format!("{:?}", t));
    settings
        .apply(&body, stamp.as_deref())
        .with_context(|| format!("applying settings from {}", path.display()))
}

// ── Thermal model ─────────────────────────────────────────────
//
// Not physics, just enough to exercise every rule: the sun heats the
// house during the day, the window and fan pull it towards the outside
// temperature, the mister cools a little and raises humidity.

struct ThermalModel {
    outside_f: f32,
    dry_humidity: f32,
}

impl ThermalModel {
    fn step(
        &self,
        reader: &mut SimClimateReader,
        now_ms: u64,
        dt_s: f32,
        status: &StatusReport,
    ) {
        let hour = (now_ms as f32 / 3_600_000.0) % 24.0;
        let sun = (((hour - 6.0) / 14.0) * PI).sin().max(0.0) * 0.012;

        let mut loss = 0.0004;
        if status.window_open {
            loss += 0.0015;
        }
        if status.fan_on {
            loss += 0.003;
        }
        let mut temp = reader.temperature_f();
        temp += (sun - loss * (temp - self.outside_f)) * dt_s;
        if status.mist_on {
            temp -= 0.01 * dt_s;
        }

        let mut humidity = reader.humidity();
        let humidity_rate = if status.mist_on { 0.15 } else { -0.004 };
        humidity += humidity_rate * dt_s;
        if status.window_open {
            humidity -= 0.004 * dt_s;
        }

        reader.set_temperature(temp);
        reader.set_humidity(humidity.clamp(self.dry_humidity, 100.0));
    }
}

// ── Scheduler delegate ────────────────────────────────────────
//
// Bridges the scheduler (which knows nothing about the service) to the
// control tick and the heartbeat.

struct SimApp {
    service: SimService,
    settings: JsonSettings,
    settings_path: Option<PathBuf>,
    sink: LogEventSink,
    model: ThermalModel,
    last_monitor_ms: Option<u64>,
}

impl SchedulerDelegate for SimApp {
    fn on_job_due(&mut self, job: Job, now_ms: u64) {
        match job {
            Job::Monitor => {
                let dt_s = self
                    .last_monitor_ms
                    .map_or(0.0, |last| now_ms.saturating_sub(last) as f32 / 1000.0);
                self.last_monitor_ms = Some(now_ms);

                let status = self.service.status();
                let reader = self.service.context_mut().sensor.reader_mut();
                self.model.step(reader, now_ms, dt_s, &status);

                self.service.monitor(now_ms, &self.settings, &mut self.sink);
            }
            Job::Heartbeat => {
                if let Some(path) = &self.settings_path {
                    if let Err(e) = load_settings(path, &mut self.settings) {
                        warn!("Settings reload failed, keeping current: {:#}", e);
                    }
                }
                self.sink.emit(&AppEvent::Heartbeat(self.service.status()));
            }
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    info!("Greenhouse controller v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args()?;
    let config = SystemConfig::default();
    config.validate().context("system config")?;

    let mut settings = JsonSettings::for_config(&config);
    if let Some(path) = &args.settings_path {
        load_settings(path, &mut settings)?;
        info!("Settings loaded from {}", path.display());
    }

    let ctx = ClimateContext {
        sensor: LastGoodSensor::new(SimClimateReader::new(62.0, 55.0)),
        fan: Relay::new("fan", SimPin::new()),
        window: WindowDriver::new(SimPin::new(), SimPin::new(), config.window_move_ms()),
        mist: Relay::new("mist", SimPin::new()),
    };
    let service = ClimateService::new(ctx, &settings, &config);

    let mut app = SimApp {
        service,
        settings,
        settings_path: args.settings_path,
        sink: LogEventSink::new(),
        model: ThermalModel {
            outside_f: 55.0,
            dry_humidity: 35.0,
        },
        last_monitor_ms: None,
    };

    let mut sched = Scheduler::new();
    sched.add(Schedule::every(
        "monitor",
        Job::Monitor,
        u64::from(config.control_loop_interval_ms),
    ));
    sched.add(Schedule::every(
        "heartbeat",
        Job::Heartbeat,
        u64::from(config.heartbeat_interval_s) * 1000,
    ));

    if args.fast {
        run_fast(&mut sched, &mut app);
        Ok(())
    } else {
        run_realtime(&mut sched, &mut app)
    }
}

/// Two simulated days on a hand-advanced clock, then a final status line.
fn run_fast(sched: &mut Scheduler, app: &mut SimApp) {
    let clock = SimClock::new(0);
    app.service.start(clock.now_ms(), &mut app.sink);

    while clock.now_ms() <= FAST_RUN_MS {
        let now = clock.now_ms();
        sched.tick(now, app);
        let next = sched.next_due_ms().unwrap_or(now + 1000);
        clock.advance(next.saturating_sub(now).max(1));
    }

    let reply = AdminConsole::new().run(AdminCommand::Status, &app.service, &mut app.sink);
    info!("Simulation finished: {}", reply);
}

/// Wall-clock loop with admin commands read from stdin.
fn run_realtime(sched: &mut Scheduler, app: &mut SimApp) -> Result<()> {
    let clock = MonotonicClock::new();
    let console = AdminConsole::new();

    let (tx, rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("admin-stdin".into())
        .spawn(move || {
            for line in io::stdin().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("spawning admin console reader")?;

    app.service.start(clock.now_ms(), &mut app.sink);
    info!("System ready. Entering control loop.");

    loop {
        let now = clock.now_ms();
        sched.tick(now, app);

        while let Ok(line) = rx.try_recv() {
            if line.trim().is_empty() {
                continue;
            }
            match console.execute(&line, &app.service, &mut app.sink) {
                Ok(reply) => println!("{}", reply),
                Err(e) => warn!("Admin console: {}", e),
            }
        }

        let next = sched.next_due_ms().unwrap_or(now + 1000);
        let wait = next.saturating_sub(clock.now_ms()).max(1);
        thread::sleep(Duration::from_millis(wait));
    }
}
