//! Admin console against a running service.

use crate::mock_hw::{Harness, MINUTE_MS};

use greenhouse::adapters::admin::AdminConsole;
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::error::CommandError;

#[test]
fn status_reports_readings_and_actuators() {
    let mut h = Harness::new(85.0, 65.0);
    h.tick_after(0);
    let mut sink = LogEventSink::new();
    let reply = AdminConsole::new()
        .execute("status", &h.service, &mut sink)
        .unwrap();
    assert!(reply.contains("temp 85.0F"), "{reply}");
    assert!(reply.contains("fan on"), "{reply}");
    assert!(reply.contains("window open (moving)"), "{reply}");
}

#[test]
fn history_lists_samples_oldest_first() {
    let mut h = Harness::new(70.0, 65.0);
    h.tick_after(0);
    h.minutes_at(1, 71.0);
    h.minutes_at(1, 72.5);
    let reply = AdminConsole::new()
        .execute("history", &h.service, &mut LogEventSink::new())
        .unwrap();
    assert_eq!(reply, "3 samples every 60 s, oldest first: 70.0 71.0 72.5");
}

#[test]
fn delta_reports_both_windows() {
    let mut h = Harness::new(70.0, 65.0);
    h.tick_after(0);
    h.minutes_at(4, 70.0);
    h.tick_after(MINUTE_MS);
    h.minutes_at(1, 73.0);
    let reply = AdminConsole::new()
        .execute("delta", &h.service, &mut LogEventSink::new())
        .unwrap();
    assert_eq!(reply, "short delta +3.00F | long delta +0.00F");
}

#[test]
fn logging_toggle_only_touches_sink() {
    let mut h = Harness::new(70.0, 65.0);
    h.tick_after(0);
    let before = h.service.status();
    let console = AdminConsole::new();
    let mut sink = LogEventSink::new();

    console.execute("disable logging", &h.service, &mut sink).unwrap();
    assert!(!sink.is_enabled());
    console.execute("enable logging", &h.service, &mut sink).unwrap();
    assert!(sink.is_enabled());
    assert_eq!(h.service.status(), before);
}

#[test]
fn unknown_command_is_rejected() {
    let h = Harness::new(70.0, 65.0);
    let err = AdminConsole::new()
        .execute("fan", &h.service, &mut LogEventSink::new())
        .unwrap_err();
    assert_eq!(err, CommandError::Unknown("fan".into()));
}
