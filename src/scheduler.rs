//! Periodic job scheduler.
//!
//! One `now_ms` reading per loop iteration drives every job.  The scheduler
//! notifies a [`SchedulerDelegate`] when a job is due; the main loop
//! implements the delegate and runs the control tick or the heartbeat.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Clock                             │
//! │                          │ now_ms                        │
//! │                          ▼                               │
//! │  ┌──────────────┐  ┌──────────────┐                      │
//! │  │ Monitor      │  │ Heartbeat    │   (periodic jobs)    │
//! │  │ every 1 s    │  │ every 10 min │                      │
//! │  └──────┬───────┘  └──────┬───────┘                      │
//! │         ▼                 ▼                              │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │               SchedulerDelegate                    │  │
//! │  └───────────────────────┬────────────────────────────┘  │
//! │                          ▼                               │
//! │               ClimateService.monitor()                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

use crate::app::ports::{Job, SchedulerDelegate};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single periodic schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label (e.g., "monitor").
    pub label: &'static str,
    /// Job handed to the delegate when due.
    pub job: Job,
    /// Minimum spacing between fires.
    pub interval_ms: u64,
    /// Whether this schedule is currently enabled.
    pub enabled: bool,
}

impl Schedule {
    pub fn every(label: &'static str, job: Job, interval_ms: u64) -> Self {
        Self {
            label,
            job,
            interval_ms,
            enabled: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
const MAX_SCHEDULES: usize = 4;

/// The scheduler engine.
///
/// Decoupled from the control loop: when a schedule fires it invokes the
/// [`SchedulerDelegate`] callback, so the scheduler is testable on its own.
pub struct Scheduler {
    schedules: [Option<ScheduleEntry>; MAX_SCHEDULES],
    /// Global enable flag.
    enabled: bool,
}

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// `None` until the first fire; a new schedule is due immediately.
    last_fired_ms: Option<u64>,
}

impl ScheduleEntry {
    fn due_at_ms(&self) -> u64 {
        self.last_fired_ms
            .map_or(0, |t| t.saturating_add(self.schedule.interval_ms))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            schedules: [None, None, None, None],
            enabled: true,
        }
    }

    /// Add a schedule.  Returns the slot index, or `None` if full.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        for (i, slot) in self.schedules.iter_mut().enumerate() {
            if slot.is_none() {
                info!(
                    "Scheduler: added '{}' at slot {} (every {} ms)",
                    schedule.label, i, schedule.interval_ms
                );
                *slot = Some(ScheduleEntry {
                    schedule,
                    last_fired_ms: None,
                });
                return Some(i);
            }
        }
        None // All slots full.
    }

    /// Remove a schedule by slot index.
    pub fn remove(&mut self, slot: usize) {
        if slot < MAX_SCHEDULES {
            if let Some(entry) = &self.schedules[slot] {
                info!("Scheduler: removed '{}' from slot {}", entry.schedule.label, slot);
            }
            self.schedules[slot] = None;
        }
    }

    /// Enable or disable the entire scheduler.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Tick the scheduler.  Call once per loop iteration with a single
    /// clock reading.
    ///
    /// Every due job is handed to `delegate.on_job_due()` in slot order.
    /// A job fires at most once per call however late the call is, and
    /// its next fire is measured from `now_ms`.
    pub fn tick(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) {
        if !self.enabled {
            return;
        }

        for slot in &mut self.schedules {
            let entry = match slot {
                Some(e) if e.schedule.enabled => e,
                _ => continue,
            };
            if now_ms < entry.due_at_ms() {
                continue;
            }
            debug!("Scheduler: '{}' due at {} ms", entry.schedule.label, now_ms);
            entry.last_fired_ms = Some(now_ms);
            delegate.on_job_due(entry.schedule.job, now_ms);
        }
    }

    /// Earliest time any enabled schedule is due, for sleeping between ticks.
    pub fn next_due_ms(&self) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        self.schedules
            .iter()
            .flatten()
            .filter(|e| e.schedule.enabled)
            .map(ScheduleEntry::due_at_ms)
            .min()
    }

    /// Number of active (enabled) schedules.
    pub fn active_count(&self) -> usize {
        self.schedules
            .iter()
            .filter(|s| s.as_ref().is_some_and(|e| e.schedule.enabled))
            .count()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
