//! End-to-end tests of the control tick: sample → trend → decisions →
//! actuators, on a manual clock.

use crate::mock_hw::{Harness, MINUTE_MS, SECOND_MS};

use greenhouse::adapters::log_sink::NullEventSink;
use greenhouse::app::events::{Actuator, AppEvent, Reason, Transition};
use greenhouse::app::ports::{SwitchPort, WindowPort};
use greenhouse::config::ClimateSettings;

// ── Startup ──────────────────────────────────────────────────

#[test]
fn start_drives_known_state() {
    let h = Harness::new(70.0, 65.0);
    assert!(matches!(h.sink.events.first(), Some(AppEvent::Started)));
    assert!(h.fan().is_off());
    assert_eq!(h.fan().off_calls, 1);
    assert!(h.mist().is_off());
    assert!(!h.window_open());
    assert!(h.window().is_moving());
    assert!(h.window().close_pin().is_high());
}

// ── Window self-timeout ──────────────────────────────────────

#[test]
fn window_move_self_terminates_without_decisions() {
    let mut h = Harness::new(70.0, 65.0);
    h.sink.clear();

    h.tick_after(10 * SECOND_MS);
    assert!(h.window().is_moving());
    assert_eq!(h.sink.settled_count(), 0);

    h.tick_after(10 * SECOND_MS);
    assert!(!h.window().is_moving());
    assert!(!h.window().close_pin().is_high());
    assert!(!h.window().open_pin().is_high());
    assert!(matches!(
        h.sink.events.last(),
        Some(AppEvent::WindowSettled { open: false })
    ));
    assert!(h.sink.transitions().is_empty());

    // Reported once only.
    h.tick_after(MINUTE_MS);
    assert_eq!(h.sink.settled_count(), 1);
}

// ── Spike scenario ───────────────────────────────────────────

#[test]
fn flat_history_then_spike_opens_window_and_starts_fan_together() {
    let mut h = Harness::new(70.0, 65.0);
    h.tick_after(0);
    h.minutes_at(29, 70.0);

    assert_eq!(h.service.trend().len(), 30);
    assert_eq!(h.service.trend().delta_over(1800), 0.0);
    assert!(h.sink.transitions().is_empty());

    h.sink.clear();
    h.minutes_at(1, 85.0);

    assert_eq!(h.service.trend().len(), 31);
    assert_eq!(h.service.trend().delta_over(60), 15.0);
    assert!(h.service.last_inputs().is_some_and(|i| i.over_max_temp()));

    let decisions = h.sink.decisions();
    let fan_window: Vec<_> = decisions
        .iter()
        .filter(|d| d.transition.actuator() != Actuator::Mist)
        .collect();
    assert_eq!(fan_window.len(), 2);
    assert_eq!(fan_window[0].transition, Transition::FanOn);
    assert_eq!(fan_window[0].reason, Reason::ShortRiseLimit);
    assert_eq!(fan_window[0].trigger, 15.0);
    assert_eq!(fan_window[1].transition, Transition::WindowOpen);
    assert_eq!(fan_window[1].reason, Reason::OverMaxTemp);
    assert_eq!(fan_window[1].trigger, 85.0);

    assert!(h.fan().is_on());
    assert!(h.window_open());
    assert!(h.window().open_pin().is_high());
}

// ── Hysteresis ───────────────────────────────────────────────

#[test]
fn actuators_hold_between_thresholds() {
    let mut h = Harness::new(70.0, 65.0);
    h.tick_after(0);
    h.minutes_at(29, 70.0);
    h.minutes_at(1, 85.0);
    assert!(h.fan().is_on() && h.window_open());

    // Still over max: nothing is re-triggered.
    h.sink.clear();
    h.minutes_at(10, 85.0);
    assert_eq!(h.fan().on_calls, 1);
    assert!(h.sink.transitions_for(Actuator::Fan).is_empty());
    assert!(h.sink.transitions_for(Actuator::Window).is_empty());

    // Falling: the fan stops, the window stays open.
    h.sink.clear();
    h.minutes_at(1, 75.0);
    let decisions = h.sink.decisions();
    let fan_off = decisions
        .iter()
        .find(|d| d.transition == Transition::FanOff)
        .expect("fan should stop");
    assert_eq!(fan_off.reason, Reason::ShortFallLimit);
    assert_eq!(fan_off.trigger, -10.0);
    assert!(h.window_open());

    // Warm plateau above target: no chatter either way.
    h.sink.clear();
    h.minutes_at(10, 75.0);
    assert!(h.fan().is_off());
    assert!(h.window_open());
    assert_eq!(h.fan().on_calls, 1);
    assert!(h.sink.transitions_for(Actuator::Fan).is_empty());
    assert!(h.sink.transitions_for(Actuator::Window).is_empty());

    // Cold snap: the window closes on the absolute threshold.
    h.sink.clear();
    h.minutes_at(1, 58.0);
    let decisions = h.sink.decisions();
    let close = decisions
        .iter()
        .find(|d| d.transition == Transition::WindowClose)
        .expect("window should close");
    assert_eq!(close.reason, Reason::UnderMinTemp);
    assert_eq!(close.trigger, 58.0);
    assert!(!h.window_open());
    assert!(h.sink.transitions_for(Actuator::Fan).is_empty());
}

#[test]
fn fan_waits_for_window() {
    let mut h = Harness::new(70.0, 65.0);
    h.tick_after(0);
    h.minutes_at(10, 70.0);
    // Rising fast but below max: the short window fires, the long window
    // has no answer yet.
    h.minutes_at(1, 72.0);
    assert!(h.service.last_inputs().is_some_and(|i| i.at_short_rise_limit()));
    assert!(!h.window_open());
    assert!(h.fan().is_off());
    assert!(h.sink.transitions_for(Actuator::Fan).is_empty());
}

#[test]
fn long_rise_opens_window() {
    let settings = ClimateSettings {
        temp_short_delta_s: 120,
        temp_long_delta_s: 600,
        ..ClimateSettings::default()
    };
    let mut h = Harness::with_settings(70.0, 65.0, settings);
    assert_eq!(h.service.trend().capacity(), 11);

    h.tick_after(0);
    h.minutes_at(10, 70.0);
    h.sink.clear();
    h.minutes_at(1, 75.0);

    let decisions = h.sink.decisions();
    let open = decisions
        .iter()
        .find(|d| d.transition == Transition::WindowOpen)
        .expect("window should open");
    assert_eq!(open.reason, Reason::LongRiseLimit);
    assert_eq!(open.trigger, 5.0);
    assert!(h.fan().is_on());
}

#[test]
fn comfortable_greenhouse_stays_idle() {
    let mut h = Harness::new(70.0, 65.0);
    h.sink.clear();
    h.tick_after(0);
    h.minutes_at(120, 70.0);
    assert!(h.sink.transitions().is_empty());
    assert_eq!(h.service.tick_count(), 121);
    // Trend keeps one hour plus the reference sample.
    assert_eq!(h.service.trend().len(), 61);
}

// ── Sensor failures ──────────────────────────────────────────

#[test]
fn sensor_dead_from_boot_never_actuates() {
    let mut h = Harness::new(95.0, 10.0);
    h.reader().set_failing(true);
    h.sink.clear();
    h.tick_after(0);
    h.minutes_at(5, 95.0);

    assert!(h.sink.transitions().is_empty());
    assert!(h.service.trend().is_empty());
    assert!(h.service.status().temperature_f.is_nan());
}

#[test]
fn sensor_failure_holds_last_good_value() {
    let mut h = Harness::new(85.0, 65.0);
    h.tick_after(0);
    assert!(h.fan().is_on() && h.window_open());

    h.reader().set_failing(true);
    h.set_temperature(50.0);
    h.sink.clear();
    h.minutes_at(5, 50.0);

    assert!(h.fan().is_on());
    assert!(h.window_open());
    assert_eq!(h.service.status().temperature_f, 85.0);
    assert!(h.service.context().sensor.failures() >= 10);
}

// ── Settings ─────────────────────────────────────────────────

#[test]
fn raised_max_threshold_changes_decision() {
    let mut h = Harness::new(85.0, 65.0);
    h.settings.max_temp_f = 90.0;
    h.sink.clear();
    h.tick_after(0);
    assert!(!h.window_open());
    assert!(h.fan().is_off());

    h.settings.max_temp_f = 80.0;
    h.tick_after(SECOND_MS);
    assert!(h.window_open());
    assert!(h.fan().is_on());
}

#[test]
fn long_window_raised_at_runtime_still_opens_window() {
    let mut h = Harness::new(62.0, 65.0);
    assert_eq!(h.service.trend().capacity(), 61);

    h.settings.temp_long_delta_s = 2 * 60 * 60;
    for i in 0..130 {
        h.minutes_at(1, 62.0 + 0.05 * i as f32);
    }

    assert_eq!(h.service.trend().capacity(), 121);
    assert!((h.service.status().long_delta_f - 6.0).abs() < 1e-3);
    assert!(h.window_open());
    let open = h
        .sink
        .decisions()
        .into_iter()
        .find(|d| d.transition == Transition::WindowOpen)
        .expect("window should open on the two-hour rise");
    assert_eq!(open.reason, Reason::LongRiseLimit);
    assert!((open.trigger - 6.0).abs() < 1e-3);
}

#[test]
fn event_sink_does_not_influence_decisions() {
    let mut recorded = Harness::new(70.0, 50.0);
    let mut silent = Harness::new(70.0, 50.0);
    let temps = [70.0, 72.0, 78.0, 86.0, 84.0, 75.0, 66.0, 59.0];

    for (i, t) in temps.iter().enumerate() {
        let now = i as u64 * MINUTE_MS;
        recorded.set_temperature(*t);
        recorded.service.monitor(now, &recorded.settings, &mut recorded.sink);
        silent.set_temperature(*t);
        silent
            .service
            .monitor(now, &silent.settings, &mut NullEventSink);
        assert_eq!(recorded.service.status(), silent.service.status());
    }
}

// ── Status ───────────────────────────────────────────────────

#[test]
fn status_reflects_last_tick() {
    let mut h = Harness::new(72.5, 48.0);
    h.tick_after(0);
    let s = h.service.status();
    assert_eq!(s.temperature_f, 72.5);
    assert_eq!(s.humidity, 48.0);
    assert_eq!(s.samples, 1);
    assert_eq!(s.tick_count, 1);
    assert!(s.mist_on);
    assert!(s.window_moving);
}
