//! Mister duty cycle through the full control tick.

use crate::mock_hw::{Harness, MINUTE_MS, SECOND_MS};

use greenhouse::app::events::{Actuator, Reason, Transition};
use greenhouse::app::ports::SwitchPort;
use greenhouse::config::ClimateSettings;

#[test]
fn dry_air_alternates_dose_and_pause() {
    let mut h = Harness::new(70.0, 40.0);
    h.sink.clear();

    h.tick_after(0);
    assert!(h.mist().is_on());

    h.tick_after(10 * SECOND_MS);
    assert!(h.mist().is_on());

    // t = 31 s: dose over.
    h.tick_after(21 * SECOND_MS);
    assert!(h.mist().is_off());

    // t = 91 s: pausing, still dry.
    h.tick_after(MINUTE_MS);
    assert!(h.mist().is_off());

    // t = 151 s: pause over, next dose.
    h.tick_after(MINUTE_MS);
    assert!(h.mist().is_on());

    assert_eq!(
        h.sink.transitions_for(Actuator::Mist),
        vec![Transition::MistOn, Transition::MistOff, Transition::MistOn]
    );
    let decisions = h.sink.decisions();
    assert_eq!(decisions[0].reason, Reason::HumidityLow);
    assert_eq!(decisions[0].trigger, 40.0);
    assert_eq!(decisions[1].reason, Reason::MistOffPeriod);
}

#[test]
fn pause_is_not_cut_short_by_dry_air() {
    let mut h = Harness::new(70.0, 20.0);
    h.tick_after(0);
    h.tick_after(30 * SECOND_MS);
    assert!(h.mist().is_off());
    assert!(h.service.mist_cycle().is_pausing(h.now_ms()));

    for _ in 0..119 {
        h.tick_after(SECOND_MS);
        assert!(h.mist().is_off(), "mist restarted at {} ms", h.now_ms());
    }
    h.tick_after(SECOND_MS);
    assert!(h.mist().is_on());
}

#[test]
fn humid_air_after_pause_stays_off() {
    let mut h = Harness::new(70.0, 40.0);
    h.tick_after(0);
    h.tick_after(30 * SECOND_MS);
    h.set_humidity(75.0);
    h.tick_after(2 * MINUTE_MS);
    h.tick_after(MINUTE_MS);
    assert!(h.mist().is_off());
    assert_eq!(h.mist().on_calls, 1);
    assert!(!h.service.mist_cycle().is_pausing(h.now_ms()));
}

#[test]
fn dose_runs_full_length_even_if_humidity_recovers() {
    let mut h = Harness::new(70.0, 40.0);
    h.tick_after(0);
    h.set_humidity(90.0);
    h.tick_after(20 * SECOND_MS);
    assert!(h.mist().is_on());
    h.tick_after(10 * SECOND_MS);
    assert!(h.mist().is_off());
}

#[test]
fn heat_starts_mist_even_when_humid() {
    let mut h = Harness::new(85.0, 80.0);
    h.sink.clear();
    h.tick_after(0);
    let mist = h
        .sink
        .decisions()
        .into_iter()
        .find(|d| d.transition == Transition::MistOn)
        .expect("mist should start");
    assert_eq!(mist.reason, Reason::OverMaxTemp);
    assert_eq!(mist.trigger, 85.0);
}

#[test]
fn durations_follow_settings() {
    let settings = ClimateSettings {
        mist_on_s: 5,
        mist_off_s: 10,
        ..ClimateSettings::default()
    };
    let mut h = Harness::with_settings(70.0, 40.0, settings);
    h.tick_after(0);
    h.tick_after(5 * SECOND_MS);
    assert!(h.mist().is_off());
    h.tick_after(9 * SECOND_MS);
    assert!(h.mist().is_off());
    h.tick_after(SECOND_MS);
    assert!(h.mist().is_on());
}
