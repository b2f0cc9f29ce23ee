//! Sliding window of recent samples for the instantaneous speed.

use std::time::{Duration, Instant};

/// Default number of samples kept in the window.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Smallest usable window: the granule filters compare against the sample
/// before the latest one, which needs a second slot.
pub const MIN_WINDOW_SIZE: usize = 2;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub(crate) processed: u64,
    pub(crate) at: Instant,
}

/// Fixed ring of `(processed, instant)` samples plus a monotonic counter.
///
/// Sample `k` lives in slot `k % len`. Once `counter >= len` the slot the
/// next sample would overwrite holds the oldest sample in the window.
#[derive(Debug)]
pub(crate) struct SpeedWindow {
    slots: Vec<Option<Sample>>,
    counter: u64,
}

impl SpeedWindow {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size.max(MIN_WINDOW_SIZE)],
            counter: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: u64) -> usize {
        (index % self.slots.len() as u64) as usize
    }

    pub(crate) fn record(&mut self, processed: u64, at: Instant) {
        let slot = self.slot(self.counter);
        self.slots[slot] = Some(Sample { processed, at });
        self.counter += 1;
    }

    /// Number of samples recorded since the last clear.
    #[cfg(test)]
    pub(crate) fn recorded(&self) -> u64 {
        self.counter
    }

    /// Processed count of the sample recorded just before the latest one.
    pub(crate) fn previous(&self) -> Option<u64> {
        if self.counter < 2 {
            return None;
        }
        self.slots[self.slot(self.counter - 2)].map(|s| s.processed)
    }

    /// Oldest sample, available only once the ring has been filled.
    pub(crate) fn oldest(&self) -> Option<Sample> {
        if self.counter < self.slots.len() as u64 {
            return None;
        }
        self.slots[self.slot(self.counter)]
    }

    /// Units per second between the oldest sample and `(processed, now)`.
    pub(crate) fn speed(&self, processed: u64, now: Instant) -> Option<u64> {
        let oldest = self.oldest()?;
        per_second(
            processed.saturating_sub(oldest.processed),
            now.saturating_duration_since(oldest.at),
        )
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.counter = 0;
    }
}

/// `amount / elapsed` in whole units per second; `None` for a zero interval.
pub(crate) fn per_second(amount: u64, elapsed: Duration) -> Option<u64> {
    if elapsed.is_zero() {
        return None;
    }
    Some((amount as f64 / elapsed.as_secs_f64()) as u64)
}
