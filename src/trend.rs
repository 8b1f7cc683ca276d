//! Bounded, time-gated temperature history.
//!
//! The [`TrendWindow`] records at most one sample per collection period into
//! a fixed-capacity ring (oldest evicted first) and answers "how much has the
//! temperature moved over the last N seconds".  Unanswerable queries return
//! `0.0`, which every rate-based rule treats as "no trend".

use heapless::Deque;
use log::{debug, info, warn};

/// Hard upper bound on stored samples: 24 h at one sample per minute, plus
/// the reference sample needed to answer a full 24 h delta.
pub const MAX_TREND_SAMPLES: usize = 24 * 60 + 1;

/// Temperature history ring with rate-limited ingestion.
#[derive(Debug, Clone)]
pub struct TrendWindow {
    samples: Deque<f32, MAX_TREND_SAMPLES>,
    capacity: usize,
    collection_period_ms: u64,
    last_collection_ms: Option<u64>,
}

impl TrendWindow {
    /// Window holding up to `capacity` samples spaced `collection_period_s`
    /// apart.  Capacity is clamped to `1..=MAX_TREND_SAMPLES` and a zero
    /// period is treated as one second.
    pub fn new(capacity: usize, collection_period_s: u32) -> Self {
        let clamped = capacity.clamp(1, MAX_TREND_SAMPLES);
        if clamped != capacity {
            warn!(
                "TrendWindow: capacity {} clamped to {} samples",
                capacity, clamped
            );
        }
        Self {
            samples: Deque::new(),
            capacity: clamped,
            collection_period_ms: u64::from(collection_period_s.max(1)) * 1000,
            last_collection_ms: None,
        }
    }

    /// Window sized so that a delta over `longest_delta_s` is answerable
    /// once enough history has accumulated.
    pub fn for_longest_delta(longest_delta_s: u32, collection_period_s: u32) -> Self {
        let period = collection_period_s.max(1);
        Self::new((longest_delta_s / period) as usize + 1, period)
    }

    /// Grow the window so a delta over `longest_delta_s` can be answered.
    /// Never shrinks, so recorded history is kept.  Returns whether the
    /// capacity changed.
    pub fn ensure_capacity_for(&mut self, longest_delta_s: u32) -> bool {
        let period_s = self.collection_period_ms / 1000;
        let wanted = (u64::from(longest_delta_s) / period_s.max(1)) as usize + 1;
        let wanted = wanted.min(MAX_TREND_SAMPLES);
        if wanted <= self.capacity {
            return false;
        }
        info!(
            "TrendWindow: capacity {} -> {} samples for {}s look-back",
            self.capacity, wanted, longest_delta_s
        );
        self.capacity = wanted;
        true
    }

    /// Record `temp` if a full collection period has passed since the last
    /// accepted sample.  The very first sample is always accepted.
    /// Returns whether the sample was recorded.
    pub fn add_if_ready(&mut self, now_ms: u64, temp: f32) -> bool {
        if let Some(last) = self.last_collection_ms {
            if now_ms.saturating_sub(last) < self.collection_period_ms {
                return false;
            }
        }
        if !temp.is_finite() {
            debug!("TrendWindow: skipping non-finite sample");
            return false;
        }
        self.add_value(temp);
        self.last_collection_ms = Some(now_ms);
        true
    }

    /// Append unconditionally, evicting the oldest sample when full.
    pub fn add_value(&mut self, temp: f32) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        // Cannot fail: len < capacity <= MAX_TREND_SAMPLES after the eviction above.
        let _ = self.samples.push_back(temp);
    }

    /// `latest - sample recorded `seconds` ago`; positive means rising.
    ///
    /// Returns `0.0` when the look-back exceeds the window's capacity or when
    /// not enough samples have been collected yet.
    pub fn delta_over(&self, seconds: u32) -> f32 {
        let k = (u64::from(seconds) * 1000 / self.collection_period_ms) as usize;
        if k >= self.capacity {
            warn!(
                "TrendWindow: delta over {}s needs {} periods, history holds {}",
                seconds, k, self.capacity
            );
            return 0.0;
        }
        let len = self.samples.len();
        if len <= k {
            debug!(
                "TrendWindow: not enough data for delta over {}s ({} of {} samples)",
                seconds,
                len,
                k + 1
            );
            return 0.0;
        }
        match (self.sample_at(len - 1), self.sample_at(len - 1 - k)) {
            (Some(latest), Some(start)) => latest - start,
            _ => 0.0,
        }
    }

    /// Most recent recorded sample.
    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    /// Samples oldest-first.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        let (head, tail) = self.samples.as_slices();
        head.iter().chain(tail.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn collection_period_ms(&self) -> u64 {
        self.collection_period_ms
    }

    fn sample_at(&self, index: usize) -> Option<f32> {
        let (head, tail) = self.samples.as_slices();
        if index < head.len() {
            head.get(index).copied()
        } else {
            tail.get(index - head.len()).copied()
        }
    }
}
